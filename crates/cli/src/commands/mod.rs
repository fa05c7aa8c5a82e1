//! CLI command implementations

pub mod config;
pub mod headlines;
pub mod search;
pub mod sources;

use anyhow::{Context, Result};
use samachar_domain::{AggregateError, AggregateResponse, Article};
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// JSON envelope printed by the fetching commands.
#[derive(Serialize)]
struct ResponseEnvelope<'a> {
    status: &'static str,
    fetched_at: String,
    total_results: usize,
    sources_used: usize,
    articles: &'a [Article],
}

pub(crate) fn print_response(response: &AggregateResponse) -> Result<()> {
    let fetched_at = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .context("Failed to format timestamp")?;

    let envelope = ResponseEnvelope {
        status: "ok",
        fetched_at,
        total_results: response.total_results,
        sources_used: response.sources_used,
        articles: &response.articles,
    };

    let json = serde_json::to_string_pretty(&envelope).context("Failed to serialize response")?;
    println!("{}", json);

    Ok(())
}

/// Emit the error envelope on stdout and terminate with a non-zero code.
///
/// Aggregate errors are part of the command output contract, so they go to
/// stdout as `status = "error"` JSON rather than through the anyhow chain.
pub(crate) fn fail_with_aggregate_error(error: &AggregateError) -> ! {
    tracing::error!(%error, "Aggregation failed");

    let envelope = serde_json::json!({
        "status": "error",
        "message": error.to_string(),
    });
    println!("{:#}", envelope);

    std::process::exit(1);
}
