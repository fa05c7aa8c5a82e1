//! Application use cases

pub mod aggregate;

pub use aggregate::{AggregateError, Aggregator};
