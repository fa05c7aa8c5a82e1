//! samachar adapters crate
//!
//! Infrastructure adapters implementing the domain's provider port:
//! - `providers`: one adapter per upstream news API, plus an offline stub
//! - `http`: the shared bounded-timeout transport helper
//! - `registry`: credential-driven construction of the provider set

pub mod http;
pub mod providers;
pub mod registry;

pub use registry::{ProviderCredentials, build_providers};
