//! API Module
//!
//! HTTP handlers and routing for the cache diagnostics API.
//!
//! # Endpoints
//! - `GET /health` - Health check endpoint
//! - `GET /caches` - Stats for every domain cache
//! - `GET /caches/:domain` - Stats for one cache
//! - `DELETE /caches/:domain` - Clear one cache
//! - `POST /caches/:domain/cleanup` - Sweep expired entries
//! - `GET /caches/:domain/entries/:key` - Read an entry
//! - `PUT /caches/:domain/entries/:key` - Store an entry
//! - `DELETE /caches/:domain/entries/:key` - Delete an entry

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
