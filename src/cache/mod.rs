//! Cache Module
//!
//! Bounded in-memory caching with lazy TTL expiry and LRU eviction.

mod entry;
pub mod key;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use shared::SharedCache;
pub use stats::{CacheCounters, CacheStats};
pub use store::BoundedTtlCache;
