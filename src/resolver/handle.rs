//! Handle parsing
//!
//! A handle is the human-facing `@user@domain` identifier of a federated
//! account. Parsing is a pure precondition check and performs no network
//! access.

use std::fmt;

use crate::error::AppError;

/// Parsed `user@domain` handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handle {
    /// Local part (before the `@`)
    pub user: String,
    /// Domain part (after the `@`)
    pub domain: String,
}

impl Handle {
    /// Parse a handle from user input.
    ///
    /// One leading `@` is stripped if present. The remainder must split
    /// into exactly two non-empty segments on `@`; anything else is
    /// `InvalidHandle`. A handle with more than one remaining separator
    /// (e.g. `a@b@c`) is rejected.
    pub fn parse(input: &str) -> Result<Self, AppError> {
        let cleaned = input.strip_prefix('@').unwrap_or(input);

        let mut segments = cleaned.split('@');
        let user = segments.next().unwrap_or_default();
        let domain = segments.next().unwrap_or_default();

        if user.is_empty() || domain.is_empty() || segments.next().is_some() {
            return Err(AppError::InvalidHandle(input.to_string()));
        }

        Ok(Self {
            user: user.to_string(),
            domain: domain.to_string(),
        })
    }

    /// The `user@domain` form, without the `acct:` scheme or leading `@`
    pub fn acct(&self) -> String {
        format!("{}@{}", self.user, self.domain)
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}@{}", self.user, self.domain)
    }
}

/// Whether an identifier is already an absolute actor URL.
///
/// Identifiers that pass skip WebFinger discovery entirely.
pub fn is_actor_url(identifier: &str) -> bool {
    identifier.starts_with("http://") || identifier.starts_with("https://")
}
