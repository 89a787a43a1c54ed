//! The `EventLogStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `tasting-store-sqlite`).
//! Higher layers (`tasting-api`, `tasting-server`) depend on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use crate::fact::{Entry, SheetRow};

/// Abstraction over the append-only event log.
///
/// The log is the system of record. Rows are never updated or deleted; every
/// derived view is recomputed from [`fetch_all`](Self::fetch_all).
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait EventLogStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Append one row and return it as persisted. `seq` and `recorded_at` are
  /// assigned by the store.
  fn append(
    &self,
    row: SheetRow,
  ) -> impl Future<Output = Result<Entry, Self::Error>> + Send + '_;

  /// Append several rows atomically: either all are written, in order, or
  /// none are.
  fn append_all(
    &self,
    rows: Vec<SheetRow>,
  ) -> impl Future<Output = Result<Vec<Entry>, Self::Error>> + Send + '_;

  /// Return every entry in append order.
  fn fetch_all(
    &self,
  ) -> impl Future<Output = Result<Vec<Entry>, Self::Error>> + Send + '_;
}
