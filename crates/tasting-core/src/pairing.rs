//! Paired rating/price samples for scatter plots.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::fact::{Fact, FactValue};

/// One submitter's rating and price for one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairedObservation {
  pub submitter: String,
  pub item:      String,
  pub rating:    f64,
  pub price:     f64,
}

/// Pair each submitter's rating with their price for the same item.
///
/// A scatter point needs both coordinates, so a (submitter, item) with only
/// one readable value is dropped. Expects normalized facts; if a key still
/// holds several values the first one is used. Output is sorted by item,
/// then submitter.
pub fn pair_samples(facts: &[Fact]) -> Vec<PairedObservation> {
  pair(facts.iter())
}

/// [`pair_samples`] restricted to a single item.
pub fn pair_samples_for_item(facts: &[Fact], item: &str) -> Vec<PairedObservation> {
  pair(facts.iter().filter(|f| f.item == item))
}

fn pair<'a>(facts: impl Iterator<Item = &'a Fact>) -> Vec<PairedObservation> {
  let mut slots: BTreeMap<(&str, &str), (Option<f64>, Option<f64>)> =
    BTreeMap::new();

  for fact in facts {
    let slot = slots
      .entry((fact.item.as_str(), fact.submitter.as_str()))
      .or_default();
    match fact.value {
      FactValue::Rating(n) => slot.0 = slot.0.or(n),
      FactValue::Price(n) => slot.1 = slot.1.or(n),
      FactValue::Taste(_) => {}
    }
  }

  slots
    .into_iter()
    .filter_map(|((item, submitter), slot)| match slot {
      (Some(rating), Some(price)) => Some(PairedObservation {
        submitter: submitter.to_owned(),
        item: item.to_owned(),
        rating,
        price,
      }),
      _ => None,
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    fact::{Category, SheetRow},
    normalize::{normalize, tests::entries},
  };

  fn facts(rows: Vec<SheetRow>) -> Vec<Fact> { normalize(&entries(rows)) }

  #[test]
  fn complete_pair_is_emitted() {
    let pairs = pair_samples(&facts(vec![
      SheetRow::numeric("A", "X", Category::Rating, 8),
      SheetRow::numeric("A", "X", Category::Price, 12),
    ]));
    assert_eq!(pairs, vec![PairedObservation {
      submitter: "A".into(),
      item:      "X".into(),
      rating:    8.0,
      price:     12.0,
    }]);
  }

  #[test]
  fn incomplete_pair_is_dropped() {
    let pairs = pair_samples(&facts(vec![SheetRow::numeric(
      "A",
      "X",
      Category::Rating,
      8,
    )]));
    assert!(pairs.is_empty());
  }

  #[test]
  fn unreadable_price_breaks_the_pair() {
    let pairs = pair_samples(&facts(vec![
      SheetRow::numeric("A", "X", Category::Rating, 8),
      SheetRow::numeric("A", "X", Category::Price, "n/a"),
    ]));
    assert!(pairs.is_empty());
  }

  #[test]
  fn pairs_use_latest_values() {
    let pairs = pair_samples(&facts(vec![
      SheetRow::numeric("A", "X", Category::Rating, 3),
      SheetRow::numeric("A", "X", Category::Price, 5),
      SheetRow::numeric("A", "X", Category::Rating, 9),
    ]));
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].rating, 9.0);
    assert_eq!(pairs[0].price, 5.0);
  }

  #[test]
  fn item_filter_restricts_input() {
    let all = facts(vec![
      SheetRow::numeric("A", "X", Category::Rating, 8),
      SheetRow::numeric("A", "X", Category::Price, 12),
      SheetRow::numeric("A", "Y", Category::Rating, 4),
      SheetRow::numeric("A", "Y", Category::Price, 6),
    ]);
    assert_eq!(pair_samples(&all).len(), 2);
    let only_y = pair_samples_for_item(&all, "Y");
    assert_eq!(only_y.len(), 1);
    assert_eq!(only_y[0].item, "Y");
    assert!(pair_samples_for_item(&all, "Z").is_empty());
  }
}
