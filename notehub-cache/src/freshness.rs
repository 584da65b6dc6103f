//! Freshness metadata for cache reads.
//!
//! A read never hides its staleness: callers get the value together with
//! the reason it may be out of date, and pick between serving it as-is or
//! serving it while a refetch is in flight.

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Why a cached value is no longer considered fresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaleReason {
    /// Its namespace was invalidated after the value was cached.
    Invalidated,
    /// The value is older than the configured maximum staleness.
    Expired,
}

/// Freshness of a cached value at read time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Freshness {
    #[default]
    Fresh,
    Stale(StaleReason),
}

impl Freshness {
    /// Classify an entry from its invalidation state and age.
    pub fn classify(invalidated: bool, age: Duration, max_staleness: Duration) -> Self {
        if invalidated {
            Freshness::Stale(StaleReason::Invalidated)
        } else if age > max_staleness {
            Freshness::Stale(StaleReason::Expired)
        } else {
            Freshness::Fresh
        }
    }

    pub fn is_fresh(&self) -> bool {
        matches!(self, Freshness::Fresh)
    }

    pub fn is_stale(&self) -> bool {
        !self.is_fresh()
    }
}

/// Result of a cache read, carrying freshness metadata.
#[derive(Debug, Clone)]
pub struct CacheRead<T> {
    value: T,
    cached_at: DateTime<Utc>,
    freshness: Freshness,
}

impl<T> CacheRead<T> {
    pub fn new(value: T, cached_at: DateTime<Utc>, freshness: Freshness) -> Self {
        Self {
            value,
            cached_at,
            freshness,
        }
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn cached_at(&self) -> DateTime<Utc> {
        self.cached_at
    }

    pub fn freshness(&self) -> Freshness {
        self.freshness
    }

    pub fn is_stale(&self) -> bool {
        self.freshness.is_stale()
    }

    /// Time elapsed since the value was cached.
    pub fn staleness(&self) -> Duration {
        age_since(self.cached_at, Utc::now())
    }
}

/// Age of a value cached at `cached_at`, as seen at `now`. Never negative.
pub(crate) fn age_since(cached_at: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    (now - cached_at).to_std().unwrap_or(Duration::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_invalidated_wins() {
        let freshness = Freshness::classify(true, Duration::ZERO, Duration::from_secs(60));
        assert_eq!(freshness, Freshness::Stale(StaleReason::Invalidated));
    }

    #[test]
    fn test_classify_expired() {
        let freshness =
            Freshness::classify(false, Duration::from_secs(61), Duration::from_secs(60));
        assert_eq!(freshness, Freshness::Stale(StaleReason::Expired));
    }

    #[test]
    fn test_classify_fresh() {
        let freshness =
            Freshness::classify(false, Duration::from_secs(60), Duration::from_secs(60));
        assert!(freshness.is_fresh());
    }

    #[test]
    fn test_cache_read_accessors() {
        let cached_at = Utc::now();
        let read = CacheRead::new("value", cached_at, Freshness::Fresh);
        assert_eq!(*read.value(), "value");
        assert_eq!(read.cached_at(), cached_at);
        assert!(!read.is_stale());
    }

    #[test]
    fn test_cache_read_staleness() {
        let past = Utc::now() - chrono::Duration::seconds(5);
        let read = CacheRead::new(1, past, Freshness::Fresh);
        let staleness = read.staleness();
        assert!(staleness >= Duration::from_secs(4));
        assert!(staleness <= Duration::from_secs(10));
    }

    #[test]
    fn test_age_never_negative() {
        let now = Utc::now();
        let future = now + chrono::Duration::seconds(10);
        assert_eq!(age_since(future, now), Duration::ZERO);
    }
}
