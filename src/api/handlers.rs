//! API Handlers
//!
//! HTTP request handlers for the cache diagnostics endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::requests::validate_key;
use crate::models::{
    CachesResponse, ClearResponse, CleanupResponse, DeleteResponse, EntryResponse,
    HealthResponse, SetEntryRequest, SetEntryResponse,
};
use crate::registry::{CacheDomain, CacheRegistry, CacheReport};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Domain caches; cheap to clone, clones share entries
    pub registry: CacheRegistry,
}

impl AppState {
    /// Creates a new AppState around an existing registry.
    pub fn new(registry: CacheRegistry) -> Self {
        Self { registry }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(CacheRegistry::new(config))
    }
}

fn parse_domain(raw: &str) -> Result<CacheDomain> {
    raw.parse()
}

fn checked_key(key: String) -> Result<String> {
    match validate_key(&key) {
        Some(error_msg) => Err(ApiError::InvalidRequest(error_msg)),
        None => Ok(key),
    }
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Handler for GET /caches
pub async fn list_caches_handler(State(state): State<AppState>) -> Json<CachesResponse> {
    Json(CachesResponse {
        caches: state.registry.report_all().await,
    })
}

/// Handler for GET /caches/:domain
pub async fn cache_report_handler(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> Result<Json<CacheReport>> {
    let domain = parse_domain(&domain)?;
    Ok(Json(state.registry.report(domain).await))
}

/// Handler for DELETE /caches/:domain
pub async fn clear_cache_handler(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> Result<Json<ClearResponse>> {
    let domain = parse_domain(&domain)?;
    state.registry.clear(domain).await;

    Ok(Json(ClearResponse::new(domain)))
}

/// Handler for POST /caches/:domain/cleanup
pub async fn cleanup_cache_handler(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> Result<Json<CleanupResponse>> {
    let domain = parse_domain(&domain)?;
    let removed = state.registry.cleanup(domain).await;
    info!("Manual sweep of cache '{}' removed {} entries", domain, removed);

    Ok(Json(CleanupResponse { domain, removed }))
}

/// Handler for GET /caches/:domain/entries/:key
///
/// Reads through the cache's normal `get`, so a hit refreshes the entry's
/// recency just like an application read would.
pub async fn get_entry_handler(
    State(state): State<AppState>,
    Path((domain, key)): Path<(String, String)>,
) -> Result<Json<EntryResponse>> {
    let domain = parse_domain(&domain)?;

    match state.registry.get_json(domain, &key).await? {
        Some(value) => Ok(Json(EntryResponse::new(domain, key, value))),
        None => Err(ApiError::NotFound(key)),
    }
}

/// Handler for PUT /caches/:domain/entries/:key
pub async fn set_entry_handler(
    State(state): State<AppState>,
    Path((domain, key)): Path<(String, String)>,
    Json(req): Json<SetEntryRequest>,
) -> Result<Json<SetEntryResponse>> {
    let domain = parse_domain(&domain)?;
    let key = checked_key(key)?;
    let ttl = req.ttl();

    state.registry.set_json(domain, &key, req.value, ttl).await?;

    Ok(Json(SetEntryResponse::new(domain, key)))
}

/// Handler for DELETE /caches/:domain/entries/:key
pub async fn delete_entry_handler(
    State(state): State<AppState>,
    Path((domain, key)): Path<(String, String)>,
) -> Result<Json<DeleteResponse>> {
    let domain = parse_domain(&domain)?;

    if state.registry.delete(domain, &key).await {
        Ok(Json(DeleteResponse::new(domain, key)))
    } else {
        Err(ApiError::NotFound(key))
    }
}
