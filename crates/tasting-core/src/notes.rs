//! Tasting-note frequencies for the word cloud.

use std::collections::BTreeMap;

use crate::fact::{Fact, FactValue};

/// Note → number of times it was written for an item.
pub type NoteFrequencies = BTreeMap<String, usize>;

/// Spaces that spreadsheets and phone keyboards like to sneak in.
const ODD_SPACES: [char; 3] = ['\u{00A0}', '\u{202F}', '\u{2007}'];

/// Canonical form of a note: odd spaces become plain spaces, whitespace runs
/// collapse to one, the ends are trimmed and each word is title-cased.
///
/// Returns `None` when nothing is left.
pub fn normalize_note(raw: &str) -> Option<String> {
  let spaced = raw.replace(ODD_SPACES, " ");
  let collapsed = spaced.split_whitespace().collect::<Vec<_>>().join(" ");
  if collapsed.is_empty() {
    return None;
  }
  Some(title_case(&collapsed))
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
/// `"wet-STONE"` becomes `"Wet-Stone"`.
pub fn title_case(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  let mut in_word = false;
  for c in s.chars() {
    if c.is_alphabetic() {
      if in_word {
        out.extend(c.to_lowercase());
      } else {
        out.extend(c.to_uppercase());
      }
      in_word = true;
    } else {
      out.push(c);
      in_word = false;
    }
  }
  out
}

/// Count normalized notes for `item`.
///
/// Takes *raw* facts (see [`crate::normalize::parse_facts`]); every note ever
/// written counts. An empty map means nobody has written a note yet.
pub fn note_frequencies(facts: &[Fact], item: &str) -> NoteFrequencies {
  let mut counts = NoteFrequencies::new();
  for fact in facts.iter().filter(|f| f.item == item) {
    if let FactValue::Taste(note) = &fact.value
      && let Some(note) = normalize_note(note)
    {
      *counts.entry(note).or_default() += 1;
    }
  }
  counts
}

/// Notes ordered by descending frequency, ties alphabetical.
pub fn ranked(freqs: &NoteFrequencies) -> Vec<(&str, usize)> {
  let mut ranked: Vec<(&str, usize)> =
    freqs.iter().map(|(k, v)| (k.as_str(), *v)).collect();
  ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
  ranked
}
