//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings. Row cells are stored verbatim.

use chrono::{DateTime, Utc};
use tasting_core::fact::{Entry, SheetRow};

use crate::{Error, Result};

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ────────────────────────────────────────────────────────────────

/// Raw values read directly from an `entries` row.
pub struct RawEntry {
  pub seq:         i64,
  pub recorded_at: String,
  pub name:        String,
  pub item:        String,
  pub value:       String,
  pub category:    String,
  pub taste:       String,
}

impl RawEntry {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      seq:         row.get(0)?,
      recorded_at: row.get(1)?,
      name:        row.get(2)?,
      item:        row.get(3)?,
      value:       row.get(4)?,
      category:    row.get(5)?,
      taste:       row.get(6)?,
    })
  }

  pub fn into_entry(self) -> Result<Entry> {
    Ok(Entry {
      seq:         self.seq,
      recorded_at: decode_dt(&self.recorded_at)?,
      row:         SheetRow {
        name:     self.name,
        item:     self.item,
        value:    self.value,
        category: self.category,
        taste:    self.taste,
      },
    })
  }
}
