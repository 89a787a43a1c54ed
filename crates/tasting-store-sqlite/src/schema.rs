//! SQL schema for the tasting SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- The event log is strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
-- Columns mirror the sheet header: Name, Wine, Rating, Category, Taste.
CREATE TABLE IF NOT EXISTS entries (
    seq         INTEGER PRIMARY KEY AUTOINCREMENT,
    recorded_at TEXT NOT NULL,            -- ISO 8601 UTC; server-assigned
    name        TEXT NOT NULL,
    item        TEXT NOT NULL,
    value       TEXT NOT NULL DEFAULT '', -- number as typed, or blank
    category    TEXT NOT NULL,            -- 'Rating' | 'Price' | 'Taste'
    taste       TEXT NOT NULL DEFAULT ''  -- note text, or blank
);

CREATE INDEX IF NOT EXISTS entries_item_idx ON entries(item);

PRAGMA user_version = 1;
";
