//! Remote actor resolution
//!
//! Handles:
//! - Handle parsing (`@user@domain`)
//! - WebFinger discovery
//! - Actor document fetching
//! - Profile normalization
//! - Resolution orchestration
//! - Profile caching

mod actor;
mod cache;
mod handle;
mod pipeline;
mod profile;
mod webfinger;

pub use actor::fetch_actor;
pub use cache::{CachedProfile, ProfileCache};
pub use handle::{Handle, is_actor_url};
pub use pipeline::ProfileResolver;
pub use profile::{RemoteProfile, normalize};
pub use webfinger::{
    WebFingerLink, WebFingerResponse, resolve_webfinger, select_actor_url, webfinger_url,
};

/// Human-readable reason for a transport-level reqwest error
pub(crate) fn transport_reason(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "request timed out".to_string()
    } else {
        error.to_string()
    }
}
