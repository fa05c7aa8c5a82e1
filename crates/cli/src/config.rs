//! Configuration loading and management

use anyhow::{Context, Result};
use samachar_adapters::ProviderCredentials;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub providers: ProvidersConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Query defaults applied when a CLI flag is not given.
#[derive(Debug, Clone, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_country")]
    pub country: String,

    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

/// API credentials per provider; a missing or empty key disables that
/// provider.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub newsapi_api_key: Option<SecretString>,

    #[serde(default)]
    pub guardian_api_key: Option<SecretString>,

    #[serde(default)]
    pub nyt_api_key: Option<SecretString>,

    #[serde(default)]
    pub currents_api_key: Option<SecretString>,

    #[serde(default)]
    pub gnews_api_key: Option<SecretString>,

    #[serde(default)]
    pub mediastack_api_key: Option<SecretString>,

    #[serde(default)]
    pub newsdata_api_key: Option<SecretString>,

    /// Register the deterministic offline stub provider
    #[serde(default)]
    pub stub: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_country() -> String {
    "in".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_page_size() -> usize {
    100
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            country: default_country(),
            language: default_language(),
            page_size: default_page_size(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        // Try default config path if none specified
        let default_path = PathBuf::from("./config.toml");
        let path = config_path.unwrap_or(&default_path);

        if path.exists() {
            builder = builder.add_source(config::File::from(path));
        } else if config_path.is_some() {
            // User specified a path that doesn't exist
            anyhow::bail!("Config file not found: {}", path.display());
        }

        // Add environment variable overrides
        builder = builder.add_source(
            config::Environment::with_prefix("SAMACHAR")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Translate the provider section into registry credentials.
    pub fn credentials(&self) -> ProviderCredentials {
        ProviderCredentials {
            newsapi: self.providers.newsapi_api_key.clone(),
            guardian: self.providers.guardian_api_key.clone(),
            nyt: self.providers.nyt_api_key.clone(),
            currents: self.providers.currents_api_key.clone(),
            gnews: self.providers.gnews_api_key.clone(),
            mediastack: self.providers.mediastack_api_key.clone(),
            newsdata: self.providers.newsdata_api_key.clone(),
            stub: self.providers.stub,
        }
    }

    /// Effective configuration with secrets redacted, for `config show`.
    pub fn redacted_json(&self) -> serde_json::Value {
        fn redact(key: &Option<SecretString>) -> serde_json::Value {
            match key {
                Some(secret) if !secret.expose_secret().trim().is_empty() => {
                    serde_json::Value::String("***".to_string())
                }
                _ => serde_json::Value::Null,
            }
        }

        serde_json::json!({
            "general": {
                "log_level": self.general.log_level,
            },
            "defaults": {
                "country": self.defaults.country,
                "language": self.defaults.language,
                "page_size": self.defaults.page_size,
            },
            "providers": {
                "newsapi_api_key": redact(&self.providers.newsapi_api_key),
                "guardian_api_key": redact(&self.providers.guardian_api_key),
                "nyt_api_key": redact(&self.providers.nyt_api_key),
                "currents_api_key": redact(&self.providers.currents_api_key),
                "gnews_api_key": redact(&self.providers.gnews_api_key),
                "mediastack_api_key": redact(&self.providers.mediastack_api_key),
                "newsdata_api_key": redact(&self.providers.newsdata_api_key),
                "stub": self.providers.stub,
            },
        })
    }

    /// Generate example configuration as TOML string
    pub fn example_toml() -> String {
        r#"# samachar configuration

[general]
log_level = "info"

# Query defaults applied when a CLI flag is not given
[defaults]
country = "in"
language = "en"
page_size = 100

# A provider is registered exactly when its API key is set and non-empty.
# Keys can also come from the environment, e.g.
#   SAMACHAR__PROVIDERS__NEWSAPI_API_KEY=...
[providers]
# newsapi_api_key = ""
# guardian_api_key = ""
# nyt_api_key = ""
# currents_api_key = ""
# gnews_api_key = ""
# mediastack_api_key = ""
# newsdata_api_key = ""
# Offline stub provider for testing without credentials
stub = false
"#
        .to_string()
    }
}
