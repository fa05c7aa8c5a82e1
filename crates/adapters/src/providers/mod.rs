//! Provider adapters
//!
//! One module per upstream news API, each implementing the
//! `NewsProvider` port. Category maps are provider-specific and asymmetric
//! on purpose: the same canonical category translates to different section
//! vocabulary per provider, and an unmapped category simply omits the filter.

pub mod currents;
pub mod gnews;
pub mod guardian;
pub mod mediastack;
pub mod newsapi;
pub mod newsdata;
pub mod nyt;
pub mod stub;

pub use currents::CurrentsProvider;
pub use gnews::GnewsProvider;
pub use guardian::GuardianProvider;
pub use mediastack::MediaStackProvider;
pub use newsapi::NewsApiProvider;
pub use newsdata::NewsDataProvider;
pub use nyt::NytProvider;
pub use stub::StubProvider;
