//! Form submissions and their expansion into log rows.

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  fact::{Category, SheetRow},
};

pub const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=10;
pub const PRICE_RANGE: std::ops::RangeInclusive<u32> = 0..=30;

/// What one attendee filled in for one wine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
  pub name:         String,
  pub item:         String,
  pub rating:       u8,
  /// Euros per glass.
  pub price:        u32,
  /// Checked notes from the palette.
  #[serde(default)]
  pub notes:        Vec<String>,
  /// Free text; one note per line.
  #[serde(default)]
  pub custom_notes: String,
}

impl Submission {
  /// Expand into the rows to append, in order: rating, price, checked notes,
  /// then one row per non-blank line of the free text.
  ///
  /// Validation happens up front; on error nothing should be written.
  pub fn into_rows(self) -> Result<Vec<SheetRow>> {
    let name = self.name.trim();
    if name.is_empty() {
      return Err(Error::EmptySubmitter);
    }
    let item = self.item.trim();
    if item.is_empty() {
      return Err(Error::EmptyItem);
    }
    if !RATING_RANGE.contains(&self.rating) {
      return Err(Error::RatingOutOfRange(self.rating));
    }
    if !PRICE_RANGE.contains(&self.price) {
      return Err(Error::PriceOutOfRange(self.price));
    }

    let mut rows = vec![
      SheetRow::numeric(name, item, Category::Rating, self.rating),
      SheetRow::numeric(name, item, Category::Price, self.price),
    ];

    let notes = self
      .notes
      .iter()
      .map(String::as_str)
      .chain(self.custom_notes.lines())
      .map(str::trim)
      .filter(|n| !n.is_empty());
    rows.extend(notes.map(|n| SheetRow::taste(name, item, n)));

    Ok(rows)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn beth() -> Submission {
    Submission {
      name:         "Beth".into(),
      item:         "Riesling".into(),
      rating:       6,
      price:        15,
      notes:        vec!["Lemon".into(), "Lime".into()],
      custom_notes: String::new(),
    }
  }

  #[test]
  fn expands_in_form_order() {
    let rows = beth().into_rows().unwrap();
    assert_eq!(rows, vec![
      SheetRow::numeric("Beth", "Riesling", Category::Rating, 6),
      SheetRow::numeric("Beth", "Riesling", Category::Price, 15),
      SheetRow::taste("Beth", "Riesling", "Lemon"),
      SheetRow::taste("Beth", "Riesling", "Lime"),
    ]);
  }

  #[test]
  fn custom_notes_split_per_line() {
    let mut s = beth();
    s.notes.clear();
    s.custom_notes = "  petrol \n\n honeyed\r\n".into();
    let rows = s.into_rows().unwrap();
    let notes: Vec<_> = rows[2..].iter().map(|r| r.taste.as_str()).collect();
    assert_eq!(notes, ["petrol", "honeyed"]);
  }

  #[test]
  fn name_is_trimmed() {
    let mut s = beth();
    s.name = "  Beth ".into();
    let rows = s.into_rows().unwrap();
    assert!(rows.iter().all(|r| r.name == "Beth"));
  }

  #[test]
  fn blank_name_is_rejected() {
    let mut s = beth();
    s.name = " \t ".into();
    assert!(matches!(s.into_rows(), Err(Error::EmptySubmitter)));
  }

  #[test]
  fn out_of_range_values_are_rejected() {
    let mut s = beth();
    s.rating = 0;
    assert!(matches!(s.into_rows(), Err(Error::RatingOutOfRange(0))));

    let mut s = beth();
    s.price = 31;
    assert!(matches!(s.into_rows(), Err(Error::PriceOutOfRange(31))));
  }
}
