//! Response DTOs for the diagnostics API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::registry::{CacheDomain, CacheReport};

/// Response body for `GET /caches/:domain/entries/:key`
#[derive(Debug, Clone, Serialize)]
pub struct EntryResponse {
    pub domain: CacheDomain,
    pub key: String,
    pub value: Value,
}

impl EntryResponse {
    pub fn new(domain: CacheDomain, key: impl Into<String>, value: Value) -> Self {
        Self {
            domain,
            key: key.into(),
            value,
        }
    }
}

/// Response body for `PUT /caches/:domain/entries/:key`
#[derive(Debug, Clone, Serialize)]
pub struct SetEntryResponse {
    /// Success message
    pub message: String,
    pub domain: CacheDomain,
    pub key: String,
}

impl SetEntryResponse {
    pub fn new(domain: CacheDomain, key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set in cache '{}'", key, domain),
            domain,
            key,
        }
    }
}

/// Response body for `DELETE /caches/:domain/entries/:key`
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    pub domain: CacheDomain,
    pub key: String,
}

impl DeleteResponse {
    pub fn new(domain: CacheDomain, key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted from cache '{}'", key, domain),
            domain,
            key,
        }
    }
}

/// Response body for `GET /caches`
#[derive(Debug, Clone, Serialize)]
pub struct CachesResponse {
    pub caches: Vec<CacheReport>,
}

/// Response body for `DELETE /caches/:domain`
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
    pub domain: CacheDomain,
}

impl ClearResponse {
    pub fn new(domain: CacheDomain) -> Self {
        Self {
            message: format!("Cache '{}' cleared", domain),
            domain,
        }
    }
}

/// Response body for `POST /caches/:domain/cleanup`
#[derive(Debug, Clone, Serialize)]
pub struct CleanupResponse {
    pub domain: CacheDomain,
    /// Number of expired entries swept
    pub removed: usize,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
