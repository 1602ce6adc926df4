//! Remote actor document fetching
//!
//! Retrieves the ActivityPub actor object behind a resolved URL. The
//! document is returned as raw JSON; shape tolerance is the normalizer's
//! job.

use std::time::Duration;

use crate::error::{AppError, FetchError};
use crate::resolver::transport_reason;

/// Accept header for ActivityPub object fetches
const ACTIVITYPUB_ACCEPT: &str =
    "application/activity+json, application/ld+json; profile=\"https://www.w3.org/ns/activitystreams\"";

/// Fetch an actor document.
///
/// The request carries `Cache-Control: no-store` so the response is
/// neither served from nor written to an intermediate HTTP cache: actor
/// documents change and must reflect current remote state. Dropping the
/// returned future aborts the request.
///
/// # Arguments
/// * `actor_url` - ActivityPub actor URL
/// * `http_client` - HTTP client
/// * `timeout` - Per-request bound, after which the fetch fails
///
/// # Returns
/// The parsed JSON document, unvalidated.
pub async fn fetch_actor(
    actor_url: &str,
    http_client: &reqwest::Client,
    timeout: Duration,
) -> Result<serde_json::Value, AppError> {
    tracing::debug!(url = %actor_url, "Fetching actor document");

    let response = http_client
        .get(actor_url)
        .header(reqwest::header::ACCEPT, ACTIVITYPUB_ACCEPT)
        .header(reqwest::header::CACHE_CONTROL, "no-store")
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| AppError::Fetch(FetchError::Transport(transport_reason(&e))))?;

    let status = response.status();
    if !status.is_success() {
        tracing::debug!(url = %actor_url, status = %status, "Actor fetch rejected");
        return Err(AppError::Fetch(FetchError::HttpStatus(status.as_u16())));
    }

    response
        .json()
        .await
        .map_err(|e| AppError::Fetch(FetchError::MalformedBody(e.to_string())))
}
