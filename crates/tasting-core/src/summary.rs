//! Tasting-note summaries from an external text generator.

use std::{fmt::Write as _, future::Future};

use crate::{aggregate::ItemSummary, notes::ranked, view::ItemFocus};

/// How many of the most frequent notes go into a prompt.
const PROMPT_NOTES: usize = 10;

/// A text-generation backend.
///
/// `generate` never fails: a backend that cannot produce a summary returns a
/// human-readable message explaining why, and callers show it as-is.
pub trait SummaryGenerator: Send + Sync {
  fn generate<'a>(
    &'a self,
    prompt: &'a str,
  ) -> impl Future<Output = String> + Send + 'a;
}

/// Build the prompt describing one item's tasting results.
pub fn summary_prompt(focus: &ItemFocus, summary: Option<&ItemSummary>) -> String {
  let mut prompt = format!(
    "You are writing a short wine-bar menu entry for \"{}\" based on a group \
     tasting.\n",
    focus.item
  );

  let rating = summary.and_then(|s| s.average_rating);
  let price = summary.and_then(|s| s.average_price);
  match rating {
    Some(r) => {
      let _ = writeln!(prompt, "Average rating: {r:.2} out of 10.");
    }
    None => prompt.push_str("Nobody has rated it yet.\n"),
  }
  if let Some(p) = price {
    let _ = writeln!(prompt, "Suggested price per glass: {p:.2} EUR.");
  }
  let _ = writeln!(prompt, "Tasters who gave both: {}.", focus.pairs.len());

  let notes = ranked(&focus.notes);
  if notes.is_empty() {
    prompt.push_str("No tasting notes were recorded.\n");
  } else {
    prompt.push_str("Tasting notes (times mentioned):\n");
    for (note, count) in notes.into_iter().take(PROMPT_NOTES) {
      let _ = writeln!(prompt, "- {note} ({count})");
    }
  }

  prompt.push_str(
    "Write two or three sentences describing the wine for the menu. Do not \
     invent notes that are not listed.",
  );
  prompt
}
