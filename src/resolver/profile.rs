//! Actor document normalization
//!
//! Remote servers publish actor objects with wildly inconsistent shapes:
//! fields go missing, `icon` is sometimes a bare string and sometimes an
//! object. This module maps any JSON document into a stable
//! [`RemoteProfile`] that the display layer can consume as-is.

use serde::Serialize;
use serde_json::Value;

/// Username used when the document carries no usable name field
const UNKNOWN_USERNAME: &str = "unknown";

/// Normalized, display-ready remote profile
///
/// Constructed fresh on each resolution and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteProfile {
    /// `preferredUsername`, falling back to `name`, then `"unknown"`
    pub username: String,
    /// First usable URL out of `icon` then `image`, else empty
    pub avatar_url: String,
    /// `summary` verbatim (may contain HTML), else empty
    pub bio: String,
    /// The URL that was actually fetched, not necessarily `doc.id`
    pub source_url: String,
}

/// An `icon`/`image` value as remote servers actually publish it
#[derive(Debug, Clone, PartialEq, Eq)]
enum ImageRef<'a> {
    /// Bare URL string
    StringRef(&'a str),
    /// Object carrying a `url` field
    ObjectRef(Option<&'a str>),
    /// Absent or some other shape
    Missing,
}

impl<'a> ImageRef<'a> {
    fn classify(value: Option<&'a Value>) -> Self {
        match value {
            Some(Value::String(s)) => ImageRef::StringRef(s),
            Some(Value::Object(map)) => ImageRef::ObjectRef(map.get("url").and_then(Value::as_str)),
            _ => ImageRef::Missing,
        }
    }

    fn url(&self) -> Option<&'a str> {
        match self {
            ImageRef::StringRef(url) => Some(*url).filter(|u| !u.is_empty()),
            ImageRef::ObjectRef(url) => url.filter(|u| !u.is_empty()),
            ImageRef::Missing => None,
        }
    }
}

/// First non-empty string field out of the given keys
fn first_string<'a>(doc: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|key| doc.get(*key).and_then(Value::as_str))
        .find(|value| !value.is_empty())
}

/// Normalize an actor document into a [`RemoteProfile`].
///
/// Total over any JSON value: absent or misshapen fields degrade to
/// defaults, never to an error. Field priority is fixed:
/// `preferredUsername` then `name` for the username, `icon` then `image`
/// for the avatar.
///
/// # Arguments
/// * `doc` - Raw actor document
/// * `source_url` - URL the document was fetched from
pub fn normalize(doc: &Value, source_url: &str) -> RemoteProfile {
    let username = first_string(doc, &["preferredUsername", "name"])
        .unwrap_or(UNKNOWN_USERNAME)
        .to_string();

    let avatar_url = ImageRef::classify(doc.get("icon"))
        .url()
        .or_else(|| ImageRef::classify(doc.get("image")).url())
        .unwrap_or_default()
        .to_string();

    let bio = doc
        .get("summary")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    RemoteProfile {
        username,
        avatar_url,
        bio,
        source_url: source_url.to_string(),
    }
}

impl RemoteProfile {
    /// Host of the source URL, for `@user@host` display
    pub fn host(&self) -> Option<String> {
        url::Url::parse(&self.source_url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
    }

    /// Bio with all HTML stripped, for plain-text contexts.
    ///
    /// Remote summaries are usually HTML fragments.
    pub fn bio_text(&self) -> String {
        ammonia::Builder::empty()
            .clean(&self.bio)
            .to_string()
    }
}
