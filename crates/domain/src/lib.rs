//! samachar domain crate
//!
//! This crate contains the core aggregation logic following hexagonal
//! architecture:
//! - `model`: Canonical article schema, categories and query descriptors
//! - `ports`: Trait definition for provider adapters
//! - `merge`: Pure dedup/sort/truncate pipeline
//! - `usecases`: The multi-provider aggregator

pub mod merge;
pub mod model;
pub mod ports;
pub mod usecases;

pub use model::*;
pub use ports::*;
pub use usecases::{AggregateError, Aggregator};
