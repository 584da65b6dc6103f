//! Cache key trait and statistics.

use notehub_core::{QueryKey, NOTES_NAMESPACE};
use std::hash::Hash;

/// A key the query cache can index results by.
///
/// Every key belongs to exactly one namespace; invalidation works per
/// namespace, never per key.
pub trait CacheKey: Clone + Eq + Hash + Send + Sync + 'static {
    fn namespace(&self) -> &str;
}

impl CacheKey for QueryKey {
    fn namespace(&self) -> &str {
        NOTES_NAMESPACE
    }
}

/// Statistics about cache usage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Reads that found an entry (fresh or stale).
    pub hits: u64,
    /// Reads that found nothing.
    pub misses: u64,
    /// Number of entries currently in cache.
    pub entry_count: u64,
    /// Entries dropped to stay under the capacity limit.
    pub evictions: u64,
    /// Namespace invalidations performed.
    pub invalidations: u64,
}

impl CacheStats {
    /// Calculate the hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_stats_hit_rate() {
        let stats = CacheStats {
            hits: 80,
            misses: 20,
            ..Default::default()
        };
        assert!((stats.hit_rate() - 0.8).abs() < 0.001);

        let empty_stats = CacheStats::default();
        assert!((empty_stats.hit_rate() - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_query_key_namespace() {
        assert_eq!(CacheKey::namespace(&QueryKey::default()), "notes");
    }
}
