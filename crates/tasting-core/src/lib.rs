//! Core types, traits, and the aggregation pipeline for the tasting log.
//!
//! No HTTP or database dependencies. Every pipeline function is a pure
//! function of the rows it is given; storage and text generation sit behind
//! the [`store::EventLogStore`] and [`summary::SummaryGenerator`] traits.

pub mod aggregate;
pub mod catalog;
pub mod error;
pub mod fact;
pub mod histogram;
pub mod normalize;
pub mod notes;
pub mod pairing;
pub mod store;
pub mod submission;
pub mod summary;
pub mod view;

pub use error::{Error, Result};
