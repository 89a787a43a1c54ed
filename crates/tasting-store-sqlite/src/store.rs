//! [`SqliteStore`]: the SQLite implementation of [`EventLogStore`].

use std::path::Path;

use chrono::Utc;
use tasting_core::{
  fact::{Entry, SheetRow},
  store::EventLogStore,
};

use crate::{
  Result,
  encode::{RawEntry, encode_dt},
  schema::SCHEMA,
};

const SELECT_ENTRIES: &str =
  "SELECT seq, recorded_at, name, item, value, category, taste
   FROM entries
   ORDER BY seq";

const INSERT_ENTRY: &str =
  "INSERT INTO entries (recorded_at, name, item, value, category, taste)
   VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

// ─── Store ────────────────────────────────────────────────────────────────────

/// A tasting log backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Insert `rows` in one transaction, all stamped with the same
  /// `recorded_at`. Returns the new entries in insertion order.
  async fn insert_rows(&self, rows: Vec<SheetRow>) -> Result<Vec<Entry>> {
    let recorded_at = Utc::now();
    let at_str = encode_dt(recorded_at);

    let seqs: Vec<i64> = self
      .conn
      .call({
        let rows = rows.clone();
        move |conn| {
          let tx = conn.transaction()?;
          let mut seqs = Vec::with_capacity(rows.len());
          {
            let mut stmt = tx.prepare(INSERT_ENTRY)?;
            for row in &rows {
              stmt.execute(rusqlite::params![
                at_str,
                row.name,
                row.item,
                row.value,
                row.category,
                row.taste,
              ])?;
              seqs.push(tx.last_insert_rowid());
            }
          }
          tx.commit()?;
          Ok(seqs)
        }
      })
      .await?;

    tracing::debug!(count = seqs.len(), "appended rows");

    Ok(
      seqs
        .into_iter()
        .zip(rows)
        .map(|(seq, row)| Entry { seq, recorded_at, row })
        .collect(),
    )
  }
}

// ─── EventLogStore impl ───────────────────────────────────────────────────────

impl EventLogStore for SqliteStore {
  type Error = crate::Error;

  async fn append(&self, row: SheetRow) -> Result<Entry> {
    let mut entries = self.insert_rows(vec![row]).await?;
    // One row in, one row out.
    Ok(entries.remove(0))
  }

  async fn append_all(&self, rows: Vec<SheetRow>) -> Result<Vec<Entry>> {
    if rows.is_empty() {
      return Ok(Vec::new());
    }
    self.insert_rows(rows).await
  }

  async fn fetch_all(&self) -> Result<Vec<Entry>> {
    let raws: Vec<RawEntry> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(SELECT_ENTRIES)?;
        let rows = stmt
          .query_map([], RawEntry::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawEntry::into_entry).collect()
  }
}
