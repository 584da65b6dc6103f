//! Query-key indexed result cache.
//!
//! The cache is a cloneable handle over shared state. The application
//! creates one at startup, hands clones to every component that reads or
//! invalidates results, and clears it on shutdown.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use notehub_core::CacheError;

use super::freshness::{age_since, CacheRead, Freshness};
use super::traits::{CacheKey, CacheStats};
use super::watermark::{NamespaceJournal, Watermark};

pub type CacheResult<T> = Result<T, CacheError>;

/// Configuration for the query cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Entries older than this are served as stale and revalidated.
    pub max_staleness: Duration,
    /// Maximum number of entries; the oldest entry is evicted beyond it.
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_staleness: Duration::from_secs(60),
            max_entries: 256,
        }
    }
}

impl CacheConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_staleness(mut self, duration: Duration) -> Self {
        self.max_staleness = duration;
        self
    }

    pub fn with_max_entries(mut self, max: usize) -> Self {
        self.max_entries = max.max(1);
        self
    }
}

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    cached_at: DateTime<Utc>,
    watermark: Watermark,
}

#[derive(Debug)]
struct CacheState<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    journal: NamespaceJournal,
    stats: CacheStats,
}

/// Shared, cloneable query cache.
#[derive(Debug)]
pub struct QueryCache<K, V> {
    state: Arc<RwLock<CacheState<K, V>>>,
    config: CacheConfig,
}

impl<K, V> Clone for QueryCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            config: self.config.clone(),
        }
    }
}

impl<K, V> QueryCache<K, V>
where
    K: CacheKey,
    V: Clone,
{
    pub fn new(config: CacheConfig) -> Self {
        Self {
            state: Arc::new(RwLock::new(CacheState {
                entries: HashMap::new(),
                journal: NamespaceJournal::new(),
                stats: CacheStats::default(),
            })),
            config,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(CacheConfig::default())
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Read an entry and classify its freshness now.
    pub fn get(&self, key: &K) -> CacheResult<Option<CacheRead<V>>> {
        self.get_at(key, Utc::now())
    }

    /// Read an entry and classify its freshness as of `now`.
    pub fn get_at(&self, key: &K, now: DateTime<Utc>) -> CacheResult<Option<CacheRead<V>>> {
        let mut state = self.state.write().map_err(|_| CacheError::LockPoisoned)?;
        let read = state.entries.get(key).map(|entry| {
            let invalidated = state.journal.is_invalidated(key.namespace(), entry.watermark);
            let freshness = Freshness::classify(
                invalidated,
                age_since(entry.cached_at, now),
                self.config.max_staleness,
            );
            CacheRead::new(entry.value.clone(), entry.cached_at, freshness)
        });
        if read.is_some() {
            state.stats.hits += 1;
        } else {
            state.stats.misses += 1;
        }
        Ok(read)
    }

    /// Store a result fetched now.
    pub fn put(&self, key: K, value: V) -> CacheResult<()> {
        self.put_at(key, value, Utc::now())
    }

    /// Store a result fetched at `cached_at`, replacing any previous entry.
    pub fn put_at(&self, key: K, value: V, cached_at: DateTime<Utc>) -> CacheResult<()> {
        self.insert(key, value, cached_at, None)
    }

    /// Store a result whose request was issued when the key's namespace stood
    /// at `observed`. An invalidation that landed while the request was in
    /// flight leaves the entry stale.
    pub fn put_observed(&self, key: K, value: V, observed: Watermark) -> CacheResult<()> {
        self.insert(key, value, Utc::now(), Some(observed))
    }

    /// Current watermark of the namespace `key` belongs to.
    pub fn watermark(&self, key: &K) -> CacheResult<Watermark> {
        let state = self.state.read().map_err(|_| CacheError::LockPoisoned)?;
        Ok(state.journal.current(key.namespace()))
    }

    fn insert(
        &self,
        key: K,
        value: V,
        cached_at: DateTime<Utc>,
        observed: Option<Watermark>,
    ) -> CacheResult<()> {
        let mut state = self.state.write().map_err(|_| CacheError::LockPoisoned)?;
        let current = state.journal.current(key.namespace());
        let watermark = observed.map_or(current, |mark| mark.min(current));
        state.entries.insert(
            key,
            CacheEntry {
                value,
                cached_at,
                watermark,
            },
        );
        while state.entries.len() > self.config.max_entries {
            let oldest = state
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.cached_at)
                .map(|(k, _)| k.clone());
            match oldest {
                Some(k) => {
                    state.entries.remove(&k);
                    state.stats.evictions += 1;
                }
                None => break,
            }
        }
        state.stats.entry_count = state.entries.len() as u64;
        Ok(())
    }

    /// Mark every entry under `namespace` stale. Values are left untouched.
    ///
    /// Returns the number of entries affected.
    pub fn invalidate_namespace(&self, namespace: &str) -> CacheResult<u64> {
        let mut state = self.state.write().map_err(|_| CacheError::LockPoisoned)?;
        let affected = state
            .entries
            .keys()
            .filter(|k| k.namespace() == namespace)
            .count() as u64;
        let mark = state.journal.advance(namespace);
        state.stats.invalidations += 1;
        tracing::debug!(namespace, affected, watermark = mark.sequence(), "Cache namespace invalidated");
        Ok(affected)
    }

    pub fn contains(&self, key: &K) -> CacheResult<bool> {
        let state = self.state.read().map_err(|_| CacheError::LockPoisoned)?;
        Ok(state.entries.contains_key(key))
    }

    pub fn len(&self) -> CacheResult<usize> {
        let state = self.state.read().map_err(|_| CacheError::LockPoisoned)?;
        Ok(state.entries.len())
    }

    pub fn is_empty(&self) -> CacheResult<bool> {
        Ok(self.len()? == 0)
    }

    pub fn stats(&self) -> CacheResult<CacheStats> {
        let state = self.state.read().map_err(|_| CacheError::LockPoisoned)?;
        Ok(state.stats.clone())
    }

    /// Drop every entry and watermark. Called when the application shuts down.
    pub fn clear(&self) -> CacheResult<()> {
        let mut state = self.state.write().map_err(|_| CacheError::LockPoisoned)?;
        state.entries.clear();
        state.journal.clear();
        state.stats.entry_count = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::freshness::StaleReason;
    use notehub_core::{NoteTag, QueryKey, NOTES_NAMESPACE};

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    struct OtherKey(u32);

    impl CacheKey for OtherKey {
        fn namespace(&self) -> &str {
            "other"
        }
    }

    fn cache() -> QueryCache<QueryKey, String> {
        QueryCache::new(CacheConfig::default())
    }

    #[test]
    fn test_miss_then_hit() {
        let cache = cache();
        let key = QueryKey::default();
        assert!(cache.get(&key).unwrap().is_none());

        cache.put(key.clone(), "page".to_string()).unwrap();
        let read = cache.get(&key).unwrap().unwrap();
        assert_eq!(read.value(), "page");
        assert!(!read.is_stale());

        let stats = cache.stats().unwrap();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entry_count, 1);
    }

    #[test]
    fn test_equal_keys_share_entry() {
        let cache = cache();
        cache
            .put(QueryKey::new("milk", 2, Some(NoteTag::Shopping)), "a".to_string())
            .unwrap();
        let read = cache
            .get(&QueryKey::new("milk", 2, Some(NoteTag::Shopping)))
            .unwrap();
        assert!(read.is_some());
    }

    #[test]
    fn test_invalidate_marks_stale_without_removing() {
        let cache = cache();
        let a = QueryKey::default();
        let b = QueryKey::new("x", 3, None);
        cache.put(a.clone(), "a".to_string()).unwrap();
        cache.put(b.clone(), "b".to_string()).unwrap();

        let affected = cache.invalidate_namespace(NOTES_NAMESPACE).unwrap();
        assert_eq!(affected, 2);

        let read = cache.get(&a).unwrap().unwrap();
        assert_eq!(read.value(), "a");
        assert_eq!(read.freshness(), Freshness::Stale(StaleReason::Invalidated));
        assert!(cache.get(&b).unwrap().unwrap().is_stale());
    }

    #[test]
    fn test_put_after_invalidation_is_fresh() {
        let cache = cache();
        let key = QueryKey::default();
        cache.put(key.clone(), "old".to_string()).unwrap();
        cache.invalidate_namespace(NOTES_NAMESPACE).unwrap();
        cache.put(key.clone(), "new".to_string()).unwrap();

        let read = cache.get(&key).unwrap().unwrap();
        assert_eq!(read.value(), "new");
        assert!(!read.is_stale());
    }

    #[test]
    fn test_result_issued_before_invalidation_stays_stale() {
        let cache = cache();
        let key = QueryKey::default();
        let issued_at = cache.watermark(&key).unwrap();
        cache.invalidate_namespace(NOTES_NAMESPACE).unwrap();
        cache.put_observed(key.clone(), "pre-create".to_string(), issued_at).unwrap();

        let read = cache.get(&key).unwrap().unwrap();
        assert_eq!(read.value(), "pre-create");
        assert_eq!(read.freshness(), Freshness::Stale(StaleReason::Invalidated));

        let issued_after = cache.watermark(&key).unwrap();
        cache.put_observed(key.clone(), "post-create".to_string(), issued_after).unwrap();
        assert!(!cache.get(&key).unwrap().unwrap().is_stale());
    }

    #[test]
    fn test_invalidation_scoped_to_namespace() {
        let cache: QueryCache<OtherKey, u32> = QueryCache::with_defaults();
        cache.put(OtherKey(1), 1).unwrap();
        assert_eq!(cache.invalidate_namespace(NOTES_NAMESPACE).unwrap(), 0);
        assert!(!cache.get(&OtherKey(1)).unwrap().unwrap().is_stale());
    }

    #[test]
    fn test_expired_entry_is_stale() {
        let cache: QueryCache<QueryKey, u32> =
            QueryCache::new(CacheConfig::new().with_max_staleness(Duration::from_secs(30)));
        let key = QueryKey::default();
        let cached_at = Utc::now();
        cache.put_at(key.clone(), 1, cached_at).unwrap();

        let later = cached_at + chrono::Duration::seconds(31);
        let read = cache.get_at(&key, later).unwrap().unwrap();
        assert_eq!(read.freshness(), Freshness::Stale(StaleReason::Expired));

        let soon = cached_at + chrono::Duration::seconds(5);
        assert!(!cache.get_at(&key, soon).unwrap().unwrap().is_stale());
    }

    #[test]
    fn test_eviction_drops_oldest() {
        let cache: QueryCache<QueryKey, u32> =
            QueryCache::new(CacheConfig::new().with_max_entries(2));
        let base = Utc::now();
        for page in 1..=3u32 {
            cache
                .put_at(
                    QueryKey::new("", page, None),
                    page,
                    base + chrono::Duration::seconds(page as i64),
                )
                .unwrap();
        }
        assert_eq!(cache.len().unwrap(), 2);
        assert!(!cache.contains(&QueryKey::new("", 1, None)).unwrap());
        assert_eq!(cache.stats().unwrap().evictions, 1);
    }

    #[test]
    fn test_clones_share_state() {
        let cache = cache();
        let handle = cache.clone();
        cache.put(QueryKey::default(), "a".to_string()).unwrap();
        handle.invalidate_namespace(NOTES_NAMESPACE).unwrap();
        assert!(cache.get(&QueryKey::default()).unwrap().unwrap().is_stale());
    }

    #[test]
    fn test_clear() {
        let cache = cache();
        cache.put(QueryKey::default(), "a".to_string()).unwrap();
        cache.invalidate_namespace(NOTES_NAMESPACE).unwrap();
        cache.clear().unwrap();
        assert!(cache.is_empty().unwrap());
        cache.put(QueryKey::default(), "b".to_string()).unwrap();
        assert!(!cache.get(&QueryKey::default()).unwrap().unwrap().is_stale());
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_invalidation_never_changes_values(values in proptest::collection::vec(any::<u32>(), 1..20)) {
                let cache: QueryCache<QueryKey, u32> = QueryCache::with_defaults();
                for (i, v) in values.iter().enumerate() {
                    cache.put(QueryKey::new("", i as u32 + 1, None), *v).unwrap();
                }
                cache.invalidate_namespace(NOTES_NAMESPACE).unwrap();
                for (i, v) in values.iter().enumerate() {
                    let read = cache.get(&QueryKey::new("", i as u32 + 1, None)).unwrap().unwrap();
                    prop_assert!(read.is_stale());
                    prop_assert_eq!(*read.value(), *v);
                }
            }
        }
    }
}
