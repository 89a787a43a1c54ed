//! Fixed-width histograms for the scatter plot margins.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bin {
  pub lower: f64,
  pub upper: f64,
  pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
  pub start: f64,
  pub end:   f64,
  pub size:  f64,
  pub bins:  Vec<Bin>,
}

impl Histogram {
  /// Count `values` into bins `[lower, lower + size)` covering `start..=end`.
  ///
  /// The last bin is closed on the right so a value equal to `end` counts.
  /// Values outside the range are ignored.
  pub fn build(
    values: impl IntoIterator<Item = f64>,
    start: f64,
    end: f64,
    size: f64,
  ) -> Self {
    let n = if size > 0.0 && end > start {
      ((end - start) / size).ceil() as usize
    } else {
      0
    };

    let mut bins: Vec<Bin> = (0..n)
      .map(|i| {
        let lower = start + i as f64 * size;
        Bin { lower, upper: (lower + size).min(end), count: 0 }
      })
      .collect();

    if n > 0 {
      for v in values {
        if !(start..=end).contains(&v) {
          continue;
        }
        let i = (((v - start) / size).floor() as usize).min(n - 1);
        bins[i].count += 1;
      }
    }

    Self { start, end, size, bins }
  }

  /// One bin per whole rating: `[0.5, 1.5)`, …, `[9.5, 10.5]`.
  pub fn ratings(values: impl IntoIterator<Item = f64>) -> Self {
    Self::build(values, 0.5, 10.5, 1.0)
  }

  /// Five-euro price bands over `[0, 30]`.
  pub fn prices(values: impl IntoIterator<Item = f64>) -> Self {
    Self::build(values, 0.0, 30.0, 5.0)
  }

  pub fn total(&self) -> usize { self.bins.iter().map(|b| b.count).sum() }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rating_bins_center_on_whole_numbers() {
    let h = Histogram::ratings([1.0, 5.0, 5.0, 10.0]);
    assert_eq!(h.bins.len(), 10);
    assert_eq!(h.bins[0].lower, 0.5);
    assert_eq!(h.bins[0].count, 1);
    assert_eq!(h.bins[4].count, 2);
    assert_eq!(h.bins[9].count, 1);
  }

  #[test]
  fn price_upper_edge_lands_in_last_bin() {
    let h = Histogram::prices([0.0, 4.99, 5.0, 30.0]);
    assert_eq!(h.bins.len(), 6);
    assert_eq!(h.bins[0].count, 2);
    assert_eq!(h.bins[1].count, 1);
    assert_eq!(h.bins[5].count, 1);
    assert_eq!(h.bins[5].upper, 30.0);
  }

  #[test]
  fn out_of_range_values_are_ignored() {
    let h = Histogram::prices([-1.0, 31.0, 12.0]);
    assert_eq!(h.total(), 1);
  }

  #[test]
  fn empty_input_gives_empty_bins() {
    let h = Histogram::ratings(std::iter::empty());
    assert_eq!(h.bins.len(), 10);
    assert_eq!(h.total(), 0);
  }
}
