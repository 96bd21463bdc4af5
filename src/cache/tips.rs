//! Opt-in cache for model-generated development tips.
//!
//! Tips depend on the personality type alone, so the cache is keyed by
//! [`PersonalityType`] and holds at most four entries in practice. Only tips
//! the model actually produced are inserted; the static fallback table is
//! already deterministic and never cached, so a later request still gets a
//! chance at model output.

use std::time::Duration;

use moka::future::Cache;

use crate::telemetry;
use crate::types::{DevelopmentTip, PersonalityType};

/// Configuration for the tip cache.
///
/// ```rust
/// # use tetoegen::cache::CacheConfig;
/// # use std::time::Duration;
/// let config = CacheConfig::new()
///     .max_entries(4)
///     .ttl(Duration::from_secs(600));
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached entries. Default: 16.
    pub max_entries: u64,
    /// Time-to-live for cached entries. Default: 1 hour.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 16,
            ttl: Duration::from_secs(3600),
        }
    }
}

impl CacheConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of cached entries.
    pub fn max_entries(mut self, n: u64) -> Self {
        self.max_entries = n;
        self
    }

    /// Set the time-to-live for cached entries.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// In-memory LRU + TTL cache of development tips.
pub struct TipCache {
    cache: Cache<PersonalityType, DevelopmentTip>,
}

impl TipCache {
    pub fn new(config: &CacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_live(config.ttl)
            .build();
        Self { cache }
    }

    /// Look up cached tips. Emits cache hit/miss metrics.
    pub async fn get(&self, label: PersonalityType) -> Option<DevelopmentTip> {
        match self.cache.get(&label).await {
            Some(tip) => {
                metrics::counter!(telemetry::TIP_CACHE_HITS_TOTAL).increment(1);
                Some(tip)
            }
            None => {
                metrics::counter!(telemetry::TIP_CACHE_MISSES_TOTAL).increment(1);
                None
            }
        }
    }

    pub async fn insert(&self, label: PersonalityType, tip: DevelopmentTip) {
        self.cache.insert(label, tip).await;
    }
}
