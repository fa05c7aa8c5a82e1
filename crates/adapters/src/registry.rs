//! Credential-driven provider registry
//!
//! Builds the adapter set once at startup: a provider is registered exactly
//! when its API key is present and non-empty. Running with zero providers is
//! legal; the aggregator then reports `NoProviders` per call.

use std::sync::Arc;

use samachar_domain::NewsProvider;
use secrecy::{ExposeSecret, SecretString};

use crate::providers::{
    CurrentsProvider, GnewsProvider, GuardianProvider, MediaStackProvider, NewsApiProvider,
    NewsDataProvider, NytProvider, StubProvider,
};

/// Per-provider API credentials; `None` or an empty string disables that
/// provider.
#[derive(Debug, Clone, Default)]
pub struct ProviderCredentials {
    pub newsapi: Option<SecretString>,
    pub guardian: Option<SecretString>,
    pub nyt: Option<SecretString>,
    pub currents: Option<SecretString>,
    pub gnews: Option<SecretString>,
    pub mediastack: Option<SecretString>,
    pub newsdata: Option<SecretString>,
    /// Registers the offline stub provider alongside any real ones
    pub stub: bool,
}

fn present(credential: &Option<SecretString>) -> Option<SecretString> {
    credential
        .as_ref()
        .filter(|key| !key.expose_secret().trim().is_empty())
        .cloned()
}

/// Construct one adapter per configured credential.
pub fn build_providers(credentials: &ProviderCredentials) -> Vec<Arc<dyn NewsProvider>> {
    let mut providers: Vec<Arc<dyn NewsProvider>> = Vec::new();

    if let Some(key) = present(&credentials.newsapi) {
        providers.push(Arc::new(NewsApiProvider::new(key)));
    }
    if let Some(key) = present(&credentials.guardian) {
        providers.push(Arc::new(GuardianProvider::new(key)));
    }
    if let Some(key) = present(&credentials.nyt) {
        providers.push(Arc::new(NytProvider::new(key)));
    }
    if let Some(key) = present(&credentials.currents) {
        providers.push(Arc::new(CurrentsProvider::new(key)));
    }
    if let Some(key) = present(&credentials.gnews) {
        providers.push(Arc::new(GnewsProvider::new(key)));
    }
    if let Some(key) = present(&credentials.mediastack) {
        providers.push(Arc::new(MediaStackProvider::new(key)));
    }
    if let Some(key) = present(&credentials.newsdata) {
        providers.push(Arc::new(NewsDataProvider::new(key)));
    }
    if credentials.stub {
        providers.push(Arc::new(StubProvider::new()));
    }

    tracing::info!(count = providers.len(), "Initialized news providers");
    providers
}
