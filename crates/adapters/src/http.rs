//! Shared HTTP transport helper used by every provider adapter
//!
//! One bounded GET per adapter call: transport failures, timeouts, non-2xx
//! statuses and undecodable bodies are all captured as `FetchError` so no
//! provider integration can let a fault escape past its own boundary.

use reqwest::Client;
use samachar_domain::FetchError;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Per-request timeout shared by all providers.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the reqwest client every adapter uses.
pub fn build_client() -> Client {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .expect("Failed to build HTTP client")
}

/// Execute one GET with query parameters and decode the JSON body.
pub async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    params: &[(&str, String)],
) -> Result<T, FetchError> {
    let response = client.get(url).query(params).send().await.map_err(|e| {
        if e.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Network(e.to_string())
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(FetchError::Api {
            status: status.as_u16(),
            message: truncate(&message, 200),
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| FetchError::Payload(e.to_string()))
}

fn truncate(text: &str, max: usize) -> String {
    if text.len() <= max {
        text.to_string()
    } else {
        let mut end = max;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        text[..end].to_string()
    }
}
