//! Error types for ActorLens
//!
//! Every failure a resolution can produce is classified here so that
//! callers can present distinct, actionable messages. No step downgrades
//! a failure into a generic one.

use thiserror::Error;

/// Application-wide error type
///
/// The first three variants are the complete failure taxonomy of a
/// resolution: `InvalidHandle` is detected synchronously before any
/// network access, `Discovery` covers the WebFinger step, and `Fetch`
/// covers the actor document step.
#[derive(Debug, Error)]
pub enum AppError {
    /// The identifier is neither an absolute URL nor a `user@domain` handle
    #[error("Invalid handle: {0}")]
    InvalidHandle(String),

    /// WebFinger discovery failed
    #[error("WebFinger discovery failed: {0}")]
    Discovery(DiscoveryError),

    /// Actor document fetch failed
    #[error("Actor fetch failed: {0}")]
    Fetch(FetchError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (client construction, etc.)
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Reasons a WebFinger lookup can fail
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Remote server answered with a non-2xx status
    #[error("HTTP status {0}")]
    HttpStatus(u16),

    /// Request never completed (connect error, timeout, ...)
    #[error("transport error: {0}")]
    Transport(String),

    /// 2xx response whose body was not valid JSON
    #[error("malformed JRD body: {0}")]
    MalformedBody(String),

    /// JRD parsed but contained no usable self/activity+json link
    #[error("no ActivityPub self link")]
    NoSelfLink,
}

/// Reasons an actor document fetch can fail
#[derive(Debug, Error)]
pub enum FetchError {
    /// Remote server answered with a non-2xx status
    #[error("HTTP status {0}")]
    HttpStatus(u16),

    /// Request never completed (connect error, timeout, ...)
    #[error("transport error: {0}")]
    Transport(String),

    /// 2xx response whose body was not valid JSON
    #[error("malformed body: {0}")]
    MalformedBody(String),
}

impl AppError {
    /// Stable label for the error metric
    pub fn metric_label(&self) -> &'static str {
        match self {
            AppError::InvalidHandle(_) => "invalid_handle",
            AppError::Discovery(_) => "discovery",
            AppError::Fetch(_) => "fetch",
            AppError::Config(_) => "config",
            AppError::Internal(_) => "internal",
        }
    }

    /// HTTP status carried by the failure, if the remote answered at all
    pub fn http_status(&self) -> Option<u16> {
        match self {
            AppError::Discovery(DiscoveryError::HttpStatus(status))
            | AppError::Fetch(FetchError::HttpStatus(status)) => Some(*status),
            _ => None,
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_is_exposed_for_both_network_steps() {
        let discovery = AppError::Discovery(DiscoveryError::HttpStatus(404));
        let fetch = AppError::Fetch(FetchError::HttpStatus(502));

        assert_eq!(discovery.http_status(), Some(404));
        assert_eq!(fetch.http_status(), Some(502));
        assert_eq!(
            AppError::InvalidHandle("nope".to_string()).http_status(),
            None
        );
    }

    #[test]
    fn metric_labels_are_distinct_per_class() {
        assert_eq!(
            AppError::InvalidHandle("x".into()).metric_label(),
            "invalid_handle"
        );
        assert_eq!(
            AppError::Discovery(DiscoveryError::NoSelfLink).metric_label(),
            "discovery"
        );
        assert_eq!(
            AppError::Fetch(FetchError::MalformedBody("eof".into())).metric_label(),
            "fetch"
        );
    }
}
