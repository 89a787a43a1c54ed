//! Per-item averages.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::fact::{Fact, FactValue};

/// Average rating and price for one item, rounded to two decimals.
///
/// An average is `None` when the item has no readable fact of that kind; it
/// is shown blank, never as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSummary {
  pub item:           String,
  pub average_rating: Option<f64>,
  pub average_price:  Option<f64>,
}

#[derive(Default)]
struct Mean {
  sum:   f64,
  count: usize,
}

impl Mean {
  fn push(&mut self, n: Option<f64>) {
    if let Some(n) = n {
      self.sum += n;
      self.count += 1;
    }
  }

  fn value(&self) -> Option<f64> {
    (self.count > 0).then(|| self.sum / self.count as f64)
  }
}

/// One [`ItemSummary`] per item with at least one rating or price fact,
/// sorted by item.
///
/// Expects normalized facts; taste facts are ignored.
pub fn summarize(facts: &[Fact]) -> Vec<ItemSummary> {
  let mut items: BTreeMap<&str, (Mean, Mean)> = BTreeMap::new();

  for fact in facts {
    match fact.value {
      FactValue::Rating(n) => items.entry(fact.item.as_str()).or_default().0.push(n),
      FactValue::Price(n) => items.entry(fact.item.as_str()).or_default().1.push(n),
      FactValue::Taste(_) => {}
    }
  }

  items
    .into_iter()
    .map(|(item, (rating, price))| ItemSummary {
      item:           item.to_owned(),
      average_rating: rating.value().map(round2),
      average_price:  price.value().map(round2),
    })
    .collect()
}

/// Round to two decimal places for display.
pub fn round2(n: f64) -> f64 { (n * 100.0).round() / 100.0 }
