//! The option lists behind the submission form.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A named group of tasting notes, e.g. "Mineral".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteGroup {
  pub name:  String,
  pub notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
  #[serde(default)]
  pub submitters: Vec<String>,
  /// Wines on the menu. Empty means any item is accepted.
  #[serde(default)]
  pub items:      Vec<String>,
  #[serde(default)]
  pub palette:    Vec<NoteGroup>,
}

fn owned(xs: &[&str]) -> Vec<String> { xs.iter().map(|s| (*s).to_owned()).collect() }

fn group(name: &str, notes: &[&str]) -> NoteGroup {
  NoteGroup { name: name.to_owned(), notes: owned(notes) }
}

impl Default for Catalog {
  fn default() -> Self {
    Self {
      submitters: owned(&[
        "Seamus", "Aleks", "Beth", "Becky", "Ella", "Hannah", "Knut", "Moon",
        "Jack", "Maria", "Guro", "Chris", "Luke", "Olwyn",
      ]),
      items:      owned(&["Prosecco", "Cremant", "Italian Natural", "Bolly"]),
      palette:    default_palette(),
    }
  }
}

/// A sparkling-wine aroma wheel grouped by family.
pub fn default_palette() -> Vec<NoteGroup> {
  vec![
    group("Fruits", &[
      "Green Apple",
      "Pear",
      "Lemon",
      "Lime",
      "White Peach",
      "Apricot",
    ]),
    group("Floral", &["Elderflower", "Honeysuckle", "Acacia", "Chamomile"]),
    group("Yeasty / Bready", &[
      "Brioche",
      "Toast",
      "Biscuit",
      "Pastry",
      "Bread Dough",
    ]),
    group("Mineral", &["Chalk", "Flint", "Wet Stone", "Saline"]),
    group("Other", &["Honey", "Almond", "Marzipan", "Cream", "Vanilla"]),
  ]
}

impl Catalog {
  /// Resolve `item` to the menu's spelling, matching case-insensitively.
  ///
  /// An open menu accepts any item and returns it trimmed.
  pub fn canonical_item(&self, item: &str) -> Result<String> {
    let item = item.trim();
    if self.items.is_empty() {
      return Ok(item.to_owned());
    }
    self
      .items
      .iter()
      .find(|i| i.eq_ignore_ascii_case(item))
      .cloned()
      .ok_or_else(|| Error::UnknownItem(item.to_owned()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_catalog_lists_menu() {
    let c = Catalog::default();
    assert_eq!(c.items.len(), 4);
    assert_eq!(c.palette.len(), 5);
    assert!(c.palette.iter().any(|g| g.notes.contains(&"Chalk".to_owned())));
  }

  #[test]
  fn items_resolve_to_menu_spelling() {
    let c = Catalog::default();
    assert_eq!(c.canonical_item("cremant").unwrap(), "Cremant");
    assert_eq!(c.canonical_item(" ITALIAN natural ").unwrap(), "Italian Natural");
    assert!(matches!(c.canonical_item("Merlot"), Err(Error::UnknownItem(_))));
  }

  #[test]
  fn open_menu_accepts_anything() {
    let c = Catalog { items: Vec::new(), ..Catalog::default() };
    assert_eq!(c.canonical_item(" riesling ").unwrap(), "riesling");
  }
}
