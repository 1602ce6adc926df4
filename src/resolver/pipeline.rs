//! Resolution orchestration
//!
//! Sequences the steps that turn an identifier into a displayable
//! profile: WebFinger discovery (skipped when the identifier is already
//! a URL), actor fetch, then normalization. Each step's failure
//! short-circuits the rest and is surfaced with its classification
//! intact.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::metrics::{ERRORS_TOTAL, RESOLUTION_DURATION_SECONDS, RESOLUTIONS_TOTAL};
use crate::resolver::handle::{Handle, is_actor_url};
use crate::resolver::profile::{RemoteProfile, normalize};
use crate::resolver::{actor, webfinger};

/// Remote profile resolver
///
/// Cheap to clone; resolutions are independent and may run concurrently
/// without coordination. Dropping the future returned by [`resolve`]
/// aborts whichever HTTP request is in flight, so no result is ever
/// delivered for an abandoned resolution.
///
/// [`resolve`]: ProfileResolver::resolve
#[derive(Clone)]
pub struct ProfileResolver {
    http_client: Arc<reqwest::Client>,
    /// Per-request bound for each of the two network steps
    request_timeout: Duration,
    /// Discovery origin override, used by local fixtures
    webfinger_origin: Option<String>,
}

impl ProfileResolver {
    /// Create a resolver around an existing HTTP client
    pub fn new(http_client: Arc<reqwest::Client>, request_timeout: Duration) -> Self {
        Self {
            http_client,
            request_timeout,
            webfinger_origin: None,
        }
    }

    /// Build a resolver and its HTTP client from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(&config.http.user_agent)
            .timeout(config.http.timeout())
            .build()
            .map_err(|e| AppError::Internal(e.into()))?;

        Ok(Self::new(Arc::new(http_client), config.http.timeout()))
    }

    /// Point WebFinger discovery at an explicit origin instead of
    /// `https://{domain}`. Fixture servers only.
    pub(crate) fn with_webfinger_origin(mut self, origin: impl Into<String>) -> Self {
        self.webfinger_origin = Some(origin.into());
        self
    }

    /// Resolve an identifier (actor URL or handle) to a normalized profile.
    ///
    /// # Errors
    /// * `InvalidHandle` - identifier is neither a URL nor `user@domain`;
    ///   detected before any network access
    /// * `Discovery` - WebFinger step failed
    /// * `Fetch` - actor document step failed
    pub async fn resolve(&self, identifier: &str) -> Result<RemoteProfile> {
        let started = Instant::now();
        let result = self.resolve_inner(identifier).await;

        RESOLUTION_DURATION_SECONDS
            .with_label_values(&["total"])
            .observe(started.elapsed().as_secs_f64());

        match &result {
            Ok(profile) => {
                RESOLUTIONS_TOTAL.with_label_values(&["success"]).inc();
                tracing::info!(
                    identifier = %identifier,
                    username = %profile.username,
                    source_url = %profile.source_url,
                    "Profile resolved"
                );
            }
            Err(error) => {
                RESOLUTIONS_TOTAL.with_label_values(&["failure"]).inc();
                ERRORS_TOTAL
                    .with_label_values(&[error.metric_label()])
                    .inc();
                tracing::warn!(
                    identifier = %identifier,
                    %error,
                    "Profile resolution failed"
                );
            }
        }

        result
    }

    async fn resolve_inner(&self, identifier: &str) -> Result<RemoteProfile> {
        // Direct actor references skip discovery entirely. The WebFinger
        // call, when needed, completes before the actor fetch begins.
        let actor_url = if is_actor_url(identifier) {
            identifier.to_string()
        } else {
            let handle = Handle::parse(identifier)?;
            self.discover(&handle).await?
        };

        let timer = RESOLUTION_DURATION_SECONDS
            .with_label_values(&["fetch"])
            .start_timer();
        let doc = actor::fetch_actor(&actor_url, &self.http_client, self.request_timeout).await?;
        timer.observe_duration();

        Ok(normalize(&doc, &actor_url))
    }

    async fn discover(&self, handle: &Handle) -> Result<String> {
        let timer = RESOLUTION_DURATION_SECONDS
            .with_label_values(&["webfinger"])
            .start_timer();

        let actor_url = match &self.webfinger_origin {
            Some(origin) => {
                webfinger::resolve_webfinger_at(
                    origin,
                    handle,
                    &self.http_client,
                    self.request_timeout,
                )
                .await?
            }
            None => {
                webfinger::resolve_webfinger(handle, &self.http_client, self.request_timeout)
                    .await?
            }
        };

        timer.observe_duration();
        Ok(actor_url)
    }
}
