//! Error types for `tasting-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("Please enter a valid name before submitting.")]
  EmptySubmitter,

  #[error("item name must not be empty")]
  EmptyItem,

  #[error("rating {0} is outside 1..=10")]
  RatingOutOfRange(u8),

  #[error("price {0} is outside 0..=30")]
  PriceOutOfRange(u32),

  #[error("unknown item: {0:?}")]
  UnknownItem(String),

  #[error("unknown fact category: {0:?}")]
  UnknownCategory(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
