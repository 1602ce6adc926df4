//! In-memory profile cache
//!
//! The resolution pipeline itself is cache-free; this layer is owned by
//! the caller (a display layer, a CLI session) and has process lifetime.
//! Volatile, cleared on restart. Uses Moka for high-performance
//! concurrent caching.

use chrono::{DateTime, Utc};
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;
use crate::resolver::pipeline::ProfileResolver;
use crate::resolver::profile::RemoteProfile;

/// A cached profile plus the time it was fetched
#[derive(Debug, Clone)]
pub struct CachedProfile {
    pub profile: RemoteProfile,
    /// When this profile was resolved
    pub fetched_at: DateTime<Utc>,
}

/// Profile cache keyed by identifier (handle or actor URL)
///
/// TTL and capacity bounded. Failed resolutions are not cached, so a
/// transient remote failure does not stick for a whole TTL.
pub struct ProfileCache {
    profiles: Cache<String, Arc<CachedProfile>>,
    /// Concurrent resolutions during warming
    warm_concurrency: usize,
}

impl ProfileCache {
    /// Create a new profile cache
    ///
    /// # Arguments
    /// * `ttl` - How long a cached profile stays valid
    /// * `max_entries` - Maximum cached profiles (LRU eviction beyond this)
    /// * `warm_concurrency` - Concurrent resolutions in [`warm`](Self::warm)
    pub fn new(ttl: Duration, max_entries: u64, warm_concurrency: usize) -> Self {
        let profiles = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .build();

        Self {
            profiles,
            warm_concurrency: warm_concurrency.max(1),
        }
    }

    /// Get a cached profile by identifier
    pub async fn get(&self, identifier: &str) -> Option<Arc<CachedProfile>> {
        let result = self.profiles.get(identifier).await;

        use crate::metrics::{CACHE_HITS_TOTAL, CACHE_MISSES_TOTAL};
        if result.is_some() {
            CACHE_HITS_TOTAL.with_label_values(&["profile"]).inc();
        } else {
            CACHE_MISSES_TOTAL.with_label_values(&["profile"]).inc();
        }

        result
    }

    /// Insert or update a profile, returning the cached entry
    pub async fn insert(&self, identifier: &str, profile: RemoteProfile) -> Arc<CachedProfile> {
        let entry = Arc::new(CachedProfile {
            profile,
            fetched_at: Utc::now(),
        });
        self.profiles
            .insert(identifier.to_string(), entry.clone())
            .await;

        use crate::metrics::CACHE_SIZE;
        CACHE_SIZE
            .with_label_values(&["profile"])
            .set(self.profiles.entry_count() as i64);

        entry
    }

    /// Drop a cached profile, forcing the next access to re-resolve
    pub async fn invalidate(&self, identifier: &str) {
        self.profiles.invalidate(identifier).await;
    }

    /// Get a profile, resolving and caching it on a miss.
    ///
    /// Failures propagate with their classification intact and leave the
    /// cache untouched.
    pub async fn get_or_resolve(
        &self,
        identifier: &str,
        resolver: &ProfileResolver,
    ) -> Result<Arc<CachedProfile>> {
        if let Some(cached) = self.get(identifier).await {
            return Ok(cached);
        }

        let profile = resolver.resolve(identifier).await?;
        Ok(self.insert(identifier, profile).await)
    }

    /// Resolve a batch of identifiers with bounded concurrency.
    ///
    /// Individual failures are logged and skipped; warming is best-effort.
    pub async fn warm(&self, identifiers: &[String], resolver: &ProfileResolver) {
        use futures::stream::{self, StreamExt};

        stream::iter(identifiers)
            .map(|identifier| async move {
                match resolver.resolve(identifier).await {
                    Ok(profile) => {
                        self.insert(identifier, profile).await;
                    }
                    Err(error) => {
                        tracing::debug!(identifier = %identifier, %error, "Warm resolution failed");
                    }
                }
            })
            .buffer_unordered(self.warm_concurrency)
            .collect::<Vec<_>>()
            .await;

        tracing::info!(
            requested = identifiers.len(),
            cached = self.profiles.entry_count(),
            "Profile cache warmed"
        );
    }

    /// Number of live entries
    pub fn len(&self) -> u64 {
        self.profiles.entry_count()
    }

    /// Whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
