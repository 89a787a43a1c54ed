//! Fact types: the atomic unit of the tasting log.
//!
//! The store holds [`SheetRow`]s: five plain-text cells laid out like the
//! spreadsheet the log was first kept in (`Name, Wine, Rating, Category,
//! Taste`). Rows are never updated; a correction is simply a newer row. Nothing
//! about a row is trusted until it is validated into a [`Fact`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::{Error, Result};

// ─── Category ─────────────────────────────────────────────────────────────────

/// What kind of datum a row carries. The category decides which of the two
/// value cells is authoritative.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Category {
  Rating,
  Price,
  Taste,
}

impl Category {
  /// Whether rows of this category carry a number in the value cell.
  pub fn is_numeric(self) -> bool { !matches!(self, Self::Taste) }
}

// ─── SheetRow ─────────────────────────────────────────────────────────────────

/// One row of the event log, exactly as stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SheetRow {
  pub name:     String,
  pub item:     String,
  /// Numeric cell; blank for taste rows.
  pub value:    String,
  pub category: String,
  /// Free-text cell; blank for rating and price rows.
  pub taste:    String,
}

impl SheetRow {
  /// A rating or price row.
  pub fn numeric(
    name: impl Into<String>,
    item: impl Into<String>,
    category: Category,
    value: impl ToString,
  ) -> Self {
    Self {
      name:     name.into(),
      item:     item.into(),
      value:    value.to_string(),
      category: category.to_string(),
      taste:    String::new(),
    }
  }

  /// A tasting-note row.
  pub fn taste(
    name: impl Into<String>,
    item: impl Into<String>,
    note: impl Into<String>,
  ) -> Self {
    Self {
      name:     name.into(),
      item:     item.into(),
      value:    String::new(),
      category: Category::Taste.to_string(),
      taste:    note.into(),
    }
  }
}

// ─── Entry ────────────────────────────────────────────────────────────────────

/// A [`SheetRow`] as persisted by an [`EventLogStore`](crate::store::EventLogStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
  /// Append position; strictly increasing in store order.
  pub seq:         i64,
  /// Server-assigned timestamp; never changes after creation.
  pub recorded_at: DateTime<Utc>,
  #[serde(flatten)]
  pub row:         SheetRow,
}

// ─── Fact ─────────────────────────────────────────────────────────────────────

/// The typed payload of a validated row.
///
/// Numeric payloads are `None` when the cell did not hold a finite number.
/// Such facts still count as "the latest answer" during normalization but
/// never contribute to averages or pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", content = "value")]
pub enum FactValue {
  Rating(Option<f64>),
  Price(Option<f64>),
  Taste(String),
}

impl FactValue {
  pub fn category(&self) -> Category {
    match self {
      Self::Rating(_) => Category::Rating,
      Self::Price(_) => Category::Price,
      Self::Taste(_) => Category::Taste,
    }
  }

  /// The parsed number for rating and price facts.
  pub fn number(&self) -> Option<f64> {
    match self {
      Self::Rating(n) | Self::Price(n) => *n,
      Self::Taste(_) => None,
    }
  }
}

/// A row that passed validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fact {
  pub submitter: String,
  pub item:      String,
  pub value:     FactValue,
}

impl Fact {
  /// Validate a stored row.
  ///
  /// Fails on an unknown category or a blank submitter/item. A numeric cell
  /// that does not parse is *not* an error; it becomes `None`.
  pub fn from_row(row: &SheetRow) -> Result<Self> {
    let category: Category = row
      .category
      .trim()
      .parse()
      .map_err(|_| Error::UnknownCategory(row.category.clone()))?;

    let submitter = row.name.trim();
    if submitter.is_empty() {
      return Err(Error::EmptySubmitter);
    }
    let item = row.item.trim();
    if item.is_empty() {
      return Err(Error::EmptyItem);
    }

    let value = match category {
      Category::Rating => FactValue::Rating(parse_number(&row.value)),
      Category::Price => FactValue::Price(parse_number(&row.value)),
      Category::Taste => FactValue::Taste(row.taste.clone()),
    };

    Ok(Self {
      submitter: submitter.to_owned(),
      item: item.to_owned(),
      value,
    })
  }

  pub fn category(&self) -> Category { self.value.category() }
}

/// Parse a numeric cell. Blank, non-numeric, and non-finite cells are absent
/// data rather than zero.
pub fn parse_number(cell: &str) -> Option<f64> {
  cell.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn category_parses_case_insensitively() {
    assert_eq!("Rating".parse::<Category>().unwrap(), Category::Rating);
    assert_eq!("price".parse::<Category>().unwrap(), Category::Price);
    assert_eq!("TASTE".parse::<Category>().unwrap(), Category::Taste);
    assert!("Aroma".parse::<Category>().is_err());
  }

  #[test]
  fn parse_number_treats_garbage_as_absent() {
    assert_eq!(parse_number("12"), Some(12.0));
    assert_eq!(parse_number(" 7.5 "), Some(7.5));
    assert_eq!(parse_number(""), None);
    assert_eq!(parse_number("n/a"), None);
    assert_eq!(parse_number("NaN"), None);
    assert_eq!(parse_number("inf"), None);
  }

  #[test]
  fn from_row_reads_authoritative_cell() {
    let mut row = SheetRow::numeric("Beth", "Riesling", Category::Rating, 6);
    row.taste = "ignored".into();
    let fact = Fact::from_row(&row).unwrap();
    assert_eq!(fact.value, FactValue::Rating(Some(6.0)));

    let fact = Fact::from_row(&SheetRow::taste(" Beth ", "Riesling", "Lime")).unwrap();
    assert_eq!(fact.submitter, "Beth");
    assert_eq!(fact.value, FactValue::Taste("Lime".into()));
  }

  #[test]
  fn from_row_keeps_unparseable_numbers_as_none() {
    let row = SheetRow::numeric("Beth", "Riesling", Category::Price, "n/a");
    let fact = Fact::from_row(&row).unwrap();
    assert_eq!(fact.value, FactValue::Price(None));
    assert_eq!(fact.value.number(), None);
  }

  #[test]
  fn from_row_rejects_bad_rows() {
    let mut row = SheetRow::numeric("Beth", "Riesling", Category::Rating, 6);
    row.category = "Mood".into();
    assert!(matches!(Fact::from_row(&row), Err(Error::UnknownCategory(_))));

    let row = SheetRow::numeric("   ", "Riesling", Category::Rating, 6);
    assert!(matches!(Fact::from_row(&row), Err(Error::EmptySubmitter)));

    let row = SheetRow::taste("Beth", "", "Lime");
    assert!(matches!(Fact::from_row(&row), Err(Error::EmptyItem)));
  }
}
