//! Record normalization: duplicate removal and latest-wins resolution.
//!
//! Corrections are appended as new rows, so the log routinely holds several
//! answers for the same (submitter, item, category). Only the latest rating
//! and price count. Tasting notes are never collapsed by key; several notes
//! from one person for one wine are all meaningful.

use std::collections::{HashMap, HashSet};

use crate::fact::{Category, Entry, Fact, SheetRow};

/// Validate every entry without any deduplication.
///
/// Rows that fail validation are skipped. This is the input the note
/// summarizer wants: every note ever written.
pub fn parse_facts(entries: &[Entry]) -> Vec<Fact> {
  entries.iter().filter_map(validate).collect()
}

/// Produce the normalized fact set for `entries`, which must be in append
/// order.
///
/// - Exact duplicate rows are dropped; the first occurrence stays in place.
/// - Among rating (or price) facts sharing a submitter and item, only the last
///   in input order survives. `recorded_at` is informational and never
///   consulted, so a clock step cannot reorder corrections.
/// - Taste facts pass through.
///
/// Surviving facts keep their input order.
pub fn normalize(entries: &[Entry]) -> Vec<Fact> {
  let mut seen: HashSet<&SheetRow> = HashSet::new();
  let facts: Vec<Fact> = entries
    .iter()
    .filter(|e| seen.insert(&e.row))
    .filter_map(validate)
    .collect();

  let mut winners: HashMap<(&str, &str, Category), usize> = HashMap::new();
  for (i, fact) in facts.iter().enumerate() {
    if fact.category().is_numeric() {
      winners.insert(key(fact), i);
    }
  }

  let keep: Vec<bool> = facts
    .iter()
    .enumerate()
    .map(|(i, fact)| {
      !fact.category().is_numeric() || winners.get(&key(fact)) == Some(&i)
    })
    .collect();

  facts
    .into_iter()
    .zip(keep)
    .filter_map(|(fact, keep)| keep.then_some(fact))
    .collect()
}

fn key(fact: &Fact) -> (&str, &str, Category) {
  (fact.submitter.as_str(), fact.item.as_str(), fact.category())
}

fn validate(entry: &Entry) -> Option<Fact> {
  match Fact::from_row(&entry.row) {
    Ok(fact) => Some(fact),
    Err(e) => {
      tracing::debug!(seq = entry.seq, error = %e, "skipping invalid row");
      None
    }
  }
}
