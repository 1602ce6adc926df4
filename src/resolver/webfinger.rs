//! WebFinger protocol implementation
//!
//! Used to discover ActivityPub actor URIs from addresses.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{AppError, DiscoveryError};
use crate::resolver::handle::Handle;
use crate::resolver::transport_reason;

/// Media type substring that marks an ActivityPub self link
const ACTIVITY_JSON_MARKER: &str = "activity+json";

/// Accept header for WebFinger requests
const WEBFINGER_ACCEPT: &str = "application/jrd+json, application/json";

/// WebFinger JRD response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WebFingerResponse {
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aliases: Option<Vec<String>>,
    #[serde(default)]
    pub links: Vec<WebFingerLink>,
}

/// WebFinger link
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WebFingerLink {
    pub rel: String,
    #[serde(rename = "type")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

/// WebFinger endpoint URL for a handle.
///
/// The `resource` value is percent-encoded as a unit, so the separator
/// appears as `%40`.
pub fn webfinger_url(handle: &Handle) -> String {
    webfinger_url_at(&format!("https://{}", handle.domain), handle)
}

fn webfinger_url_at(origin: &str, handle: &Handle) -> String {
    format!(
        "{}/.well-known/webfinger?resource=acct:{}",
        origin.trim_end_matches('/'),
        urlencoding::encode(&handle.acct())
    )
}

/// Pick the actor URL out of a JRD document.
///
/// The first link with `rel == "self"` and a type containing
/// `activity+json` wins; its `href` is returned verbatim. Whether that
/// href is a well-formed URL is deferred to the fetch step.
pub fn select_actor_url(response: &WebFingerResponse) -> Result<String, AppError> {
    let self_link = response.links.iter().find(|link| {
        link.rel == "self"
            && link
                .link_type
                .as_deref()
                .is_some_and(|t| t.contains(ACTIVITY_JSON_MARKER))
    });

    self_link
        .and_then(|link| link.href.clone())
        .ok_or(AppError::Discovery(DiscoveryError::NoSelfLink))
}

/// Resolve a handle to its ActivityPub actor URL.
///
/// Issues a single GET to `https://{domain}/.well-known/webfinger` with
/// no retries. Dropping the returned future aborts the request.
///
/// # Arguments
/// * `handle` - Parsed account handle
/// * `http_client` - HTTP client
/// * `timeout` - Per-request bound, after which discovery fails
pub async fn resolve_webfinger(
    handle: &Handle,
    http_client: &reqwest::Client,
    timeout: Duration,
) -> Result<String, AppError> {
    let origin = format!("https://{}", handle.domain);
    resolve_webfinger_at(&origin, handle, http_client, timeout).await
}

/// Same as [`resolve_webfinger`] against an explicit origin.
///
/// Split out so the discovery flow can be exercised against a local
/// fixture server.
pub(crate) async fn resolve_webfinger_at(
    origin: &str,
    handle: &Handle,
    http_client: &reqwest::Client,
    timeout: Duration,
) -> Result<String, AppError> {
    let url = webfinger_url_at(origin, handle);
    tracing::debug!(handle = %handle, %url, "WebFinger lookup");

    let response = http_client
        .get(&url)
        .header(reqwest::header::ACCEPT, WEBFINGER_ACCEPT)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| AppError::Discovery(DiscoveryError::Transport(transport_reason(&e))))?;

    let status = response.status();
    if !status.is_success() {
        tracing::debug!(handle = %handle, status = %status, "WebFinger lookup rejected");
        return Err(AppError::Discovery(DiscoveryError::HttpStatus(
            status.as_u16(),
        )));
    }

    let document: WebFingerResponse = response
        .json()
        .await
        .map_err(|e| AppError::Discovery(DiscoveryError::MalformedBody(e.to_string())))?;

    select_actor_url(&document)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(rel: &str, link_type: Option<&str>, href: Option<&str>) -> WebFingerLink {
        WebFingerLink {
            rel: rel.to_string(),
            link_type: link_type.map(str::to_string),
            href: href.map(str::to_string),
            template: None,
        }
    }

    fn jrd(links: Vec<WebFingerLink>) -> WebFingerResponse {
        WebFingerResponse {
            subject: Some("acct:alice@example.com".to_string()),
            aliases: None,
            links,
        }
    }

    #[test]
    fn webfinger_url_percent_encodes_the_resource() {
        let handle = Handle::parse("@alice@example.com").unwrap();
        assert_eq!(
            webfinger_url(&handle),
            "https://example.com/.well-known/webfinger?resource=acct:alice%40example.com"
        );
    }

    #[test]
    fn selects_first_activity_json_self_link() {
        let response = jrd(vec![
            link(
                "http://webfinger.net/rel/profile-page",
                Some("text/html"),
                Some("https://example.com/@alice"),
            ),
            link(
                "self",
                Some("application/activity+json"),
                Some("https://example.com/users/alice"),
            ),
            link(
                "self",
                Some("application/ld+json; profile=\"https://www.w3.org/ns/activitystreams\""),
                Some("https://example.com/actors/alice"),
            ),
        ]);

        assert_eq!(
            select_actor_url(&response).unwrap(),
            "https://example.com/users/alice"
        );
    }

    #[test]
    fn rejects_self_link_with_wrong_type() {
        let response = jrd(vec![link(
            "self",
            Some("text/html"),
            Some("http://wrong"),
        )]);

        assert!(matches!(
            select_actor_url(&response),
            Err(AppError::Discovery(DiscoveryError::NoSelfLink))
        ));
    }

    #[test]
    fn rejects_self_link_without_href() {
        let response = jrd(vec![link(
            "self",
            Some("application/activity+json"),
            None,
        )]);

        assert!(matches!(
            select_actor_url(&response),
            Err(AppError::Discovery(DiscoveryError::NoSelfLink))
        ));
    }

    #[test]
    fn rejects_empty_links() {
        assert!(matches!(
            select_actor_url(&jrd(vec![])),
            Err(AppError::Discovery(DiscoveryError::NoSelfLink))
        ));
    }

    #[test]
    fn untyped_self_link_does_not_match() {
        let response = jrd(vec![link("self", None, Some("https://example.com/u/a"))]);

        assert!(select_actor_url(&response).is_err());
    }

    #[test]
    fn jrd_parses_with_missing_optional_fields() {
        let document: WebFingerResponse = serde_json::from_str("{}").unwrap();
        assert!(document.links.is_empty());
        assert!(document.subject.is_none());
    }
}
