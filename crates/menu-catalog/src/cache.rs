//! The process-wide catalog cache.
//!
//! A single slot holds the last successful aggregation. Requests inside
//! the TTL window are served straight from the slot; once the entry goes
//! stale the next request triggers a refresh, and a failed refresh falls
//! back to the stale data instead of erroring, as long as any previous
//! entry exists.
//!
//! The slot is shared mutable state without single-flight: concurrent
//! misses may each refresh ("stampede"), which is accepted. The entry is
//! replaced by whole-value swap and never mutated in place, so readers
//! always observe a complete snapshot.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::{debug, warn};

use menu_gateway_types::catalog::MenuItem;
use menu_gateway_types::env::env_var_or;

use crate::error::{CatalogError, StaleReason};

/// Default entry lifetime in seconds (can be overridden by env).
const DEFAULT_TTL_SECS: u64 = 300;

/// One cached aggregation result.
#[derive(Debug, Clone)]
struct CacheEntry {
    data: Arc<Vec<MenuItem>>,
    created: Instant,
    updated_at: DateTime<Utc>,
}

impl CacheEntry {
    fn new(items: Vec<MenuItem>) -> Self {
        Self {
            data: Arc::new(items),
            created: Instant::now(),
            updated_at: Utc::now(),
        }
    }
}

/// How the served data relates to the upstream source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// Served from a cache entry inside its TTL; no upstream call made.
    Fresh,
    /// A refresh ran and replaced the cache.
    Refreshed,
    /// The refresh failed; this is the last good data.
    Stale(StaleReason),
}

/// A successful cache reply.
#[derive(Debug, Clone)]
pub struct Served {
    pub data: Arc<Vec<MenuItem>>,
    pub updated_at: DateTime<Utc>,
    pub state: CacheState,
}

/// TTL cache over catalog aggregation with a stale-on-failure fallback.
pub struct CatalogCache {
    slot: RwLock<Option<CacheEntry>>,
    ttl: Duration,
}

impl CatalogCache {
    /// Create an empty cache with the given entry lifetime.
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: RwLock::new(None),
            ttl,
        }
    }

    /// Create a cache with the env-overridable default TTL.
    pub fn from_env() -> Self {
        Self::new(Duration::from_secs(env_var_or(
            "MENU_CACHE_TTL_SECS",
            DEFAULT_TTL_SECS,
        )))
    }

    /// The entry, if it is still inside its TTL. Staleness is recomputed
    /// lazily per request; there is no timer.
    fn fresh_entry(&self) -> Option<CacheEntry> {
        let slot = self.slot.read();
        slot.as_ref()
            .filter(|entry| entry.created.elapsed() < self.ttl)
            .cloned()
    }

    /// The last good entry regardless of age.
    fn any_entry(&self) -> Option<CacheEntry> {
        self.slot.read().clone()
    }

    /// Serve the catalog, refreshing through `refresh` when the cached
    /// entry is absent or past its TTL.
    ///
    /// The refresh runs without holding the slot lock, so concurrent
    /// misses may each trigger their own refresh.
    pub async fn serve_with<F, Fut>(&self, refresh: F) -> Result<Served, CatalogError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<MenuItem>, CatalogError>>,
    {
        if let Some(entry) = self.fresh_entry() {
            return Ok(Served {
                data: entry.data,
                updated_at: entry.updated_at,
                state: CacheState::Fresh,
            });
        }

        match refresh().await {
            Ok(items) => {
                let entry = CacheEntry::new(items);
                let served = Served {
                    data: entry.data.clone(),
                    updated_at: entry.updated_at,
                    state: CacheState::Refreshed,
                };
                // Whole-value swap; never mutated field-by-field.
                *self.slot.write() = Some(entry);
                debug!(items = served.data.len(), "catalog cache refreshed");
                Ok(served)
            }
            Err(err) => match self.any_entry() {
                Some(entry) => {
                    let reason = err.stale_reason();
                    warn!(error = %err, reason = reason.as_str(), "refresh failed; serving stale catalog");
                    Ok(Served {
                        data: entry.data,
                        updated_at: entry.updated_at,
                        state: CacheState::Stale(reason),
                    })
                }
                None => Err(err),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn sample_items(marker: &str) -> Vec<MenuItem> {
        vec![MenuItem {
            id: None,
            name: Some(marker.to_string()),
            category: None,
            description: None,
            popular: false,
            variants: Vec::new(),
        }]
    }

    #[tokio::test]
    async fn fresh_entry_skips_the_refresh() {
        let cache = CatalogCache::new(Duration::from_secs(600));
        let calls = AtomicUsize::new(0);

        let refresh = || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(sample_items("first")) }
        };
        let first = cache.serve_with(refresh).await.unwrap();
        assert_eq!(first.state, CacheState::Refreshed);

        let second = cache
            .serve_with(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok(sample_items("second")) }
            })
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1, "no second fan-out inside the TTL");
        assert_eq!(second.state, CacheState::Fresh);
        assert_eq!(second.data, first.data, "bit-identical cached data");
        assert_eq!(second.updated_at, first.updated_at);
    }

    #[tokio::test]
    async fn stale_entry_is_replaced_on_successful_refresh() {
        let cache = CatalogCache::new(Duration::ZERO);

        let first = cache
            .serve_with(|| async { Ok(sample_items("first")) })
            .await
            .unwrap();
        let second = cache
            .serve_with(|| async { Ok(sample_items("second")) })
            .await
            .unwrap();

        assert_eq!(second.state, CacheState::Refreshed);
        assert_ne!(second.data, first.data);
        assert_eq!(second.data[0].name.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn failed_refresh_falls_back_to_stale_data() {
        let cache = CatalogCache::new(Duration::ZERO);

        cache
            .serve_with(|| async { Ok(sample_items("good")) })
            .await
            .unwrap();

        let served = cache
            .serve_with(|| async { Err(CatalogError::Upstream { status: Some(502) }) })
            .await
            .unwrap();

        assert_eq!(served.state, CacheState::Stale(StaleReason::UpstreamFailed));
        assert_eq!(served.data[0].name.as_deref(), Some("good"));
    }

    #[tokio::test]
    async fn missing_config_reports_its_own_stale_reason() {
        let cache = CatalogCache::new(Duration::ZERO);

        cache
            .serve_with(|| async { Ok(sample_items("good")) })
            .await
            .unwrap();

        let served = cache
            .serve_with(|| async {
                Err(CatalogError::MissingConfig {
                    missing: vec!["BASEROW_TOKEN".to_string()],
                })
            })
            .await
            .unwrap();

        assert_eq!(served.state, CacheState::Stale(StaleReason::MissingEnv));
    }

    #[tokio::test]
    async fn cold_failure_surfaces_the_error() {
        let cache = CatalogCache::new(Duration::from_secs(600));

        let err = cache
            .serve_with(|| async { Err(CatalogError::Upstream { status: None }) })
            .await
            .unwrap_err();

        assert_eq!(err, CatalogError::Upstream { status: None });
    }
}
