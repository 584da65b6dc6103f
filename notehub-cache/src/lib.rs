//! Query result cache with explicit freshness.
//!
//! Results are stored per query key. Mutations elsewhere in the client never
//! edit cached values; they advance a namespace [`Watermark`], which turns
//! every entry cached under an older watermark stale. Readers see staleness
//! through [`CacheRead`] and decide whether to revalidate.
//!
//! # Example
//!
//! ```ignore
//! let cache: QueryCache<QueryKey, NotesPage> = QueryCache::new(CacheConfig::default());
//! cache.put(key.clone(), page)?;
//!
//! // A note was created somewhere: everything under "notes" is now stale.
//! cache.invalidate_namespace(NOTES_NAMESPACE)?;
//!
//! let read = cache.get(&key)?.expect("still cached");
//! assert!(read.is_stale());
//! ```

pub mod freshness;
pub mod query_cache;
pub mod traits;
pub mod watermark;

pub use freshness::{CacheRead, Freshness, StaleReason};
pub use query_cache::{CacheConfig, CacheResult, QueryCache};
pub use traits::{CacheKey, CacheStats};
pub use watermark::{NamespaceJournal, Watermark};
