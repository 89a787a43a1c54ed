//! The dashboard read model. Never stored, always derived.
//!
//! [`render`] is the single entry point: the caller fetches the whole log and
//! every derived view is rebuilt from it. Nothing is cached between calls.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{
  aggregate::{ItemSummary, summarize},
  fact::Entry,
  histogram::Histogram,
  normalize::{normalize, parse_facts},
  notes::{NoteFrequencies, note_frequencies},
  pairing::{PairedObservation, pair_samples, pair_samples_for_item},
};

/// Drill-down for a single item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemFocus {
  pub item:             String,
  pub pairs:            Vec<PairedObservation>,
  pub rating_histogram: Histogram,
  pub price_histogram:  Histogram,
  pub notes:            NoteFrequencies,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
  /// Every item that appears anywhere in the log, sorted.
  pub items:     Vec<String>,
  pub summaries: Vec<ItemSummary>,
  /// Rating/price pairs across all items.
  pub pairs:     Vec<PairedObservation>,
  /// `None` only when the log is empty.
  pub focus:     Option<ItemFocus>,
}

/// Rebuild the dashboard from the full log.
///
/// `selected` picks the drill-down item; without it the first item is used.
/// Selecting an item with no data yields an empty focus, not an error.
pub fn render(entries: &[Entry], selected: Option<&str>) -> DashboardView {
  let normalized = normalize(entries);
  let raw = parse_facts(entries);

  let items: Vec<String> = raw
    .iter()
    .map(|f| f.item.as_str())
    .collect::<BTreeSet<_>>()
    .into_iter()
    .map(str::to_owned)
    .collect();

  let focus_item = selected
    .map(str::to_owned)
    .or_else(|| items.first().cloned());

  let focus = focus_item.map(|item| {
    let pairs = pair_samples_for_item(&normalized, &item);
    ItemFocus {
      rating_histogram: Histogram::ratings(pairs.iter().map(|p| p.rating)),
      price_histogram: Histogram::prices(pairs.iter().map(|p| p.price)),
      notes: note_frequencies(&raw, &item),
      pairs,
      item,
    }
  });

  DashboardView {
    items,
    summaries: summarize(&normalized),
    pairs: pair_samples(&normalized),
    focus,
  }
}
