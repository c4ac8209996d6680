//! Teknokul Cache - bounded in-memory caches for the Teknokul platform
//!
//! Provides a TTL + LRU cache, the per-domain cache registry that request
//! handlers share, and a small diagnostics HTTP API.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod registry;
pub mod tasks;

pub use api::AppState;
pub use cache::{BoundedTtlCache, SharedCache};
pub use config::Config;
pub use registry::{CacheDomain, CacheRegistry};
pub use tasks::spawn_cleanup_task;
