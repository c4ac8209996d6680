//! Configuration Module
//!
//! Loads server and per-cache settings from environment variables.

use std::collections::BTreeMap;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::registry::CacheDomain;

/// Capacity and default TTL of one domain cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainSettings {
    /// Maximum number of entries
    pub max_size: usize,
    /// TTL for entries set without an explicit one
    pub default_ttl: Duration,
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Maintenance sweep interval in seconds
    pub cleanup_interval: u64,
    /// Settings per domain cache
    pub caches: BTreeMap<CacheDomain, DomainSettings>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 300)
    /// - `<DOMAIN>_CACHE_MAX_SIZE` - Capacity of a domain cache
    /// - `<DOMAIN>_CACHE_TTL_SECS` - Default TTL of a domain cache
    ///
    /// `<DOMAIN>` is the upper snake case domain name, e.g. `SEMANTIC_SEARCH`.
    pub fn from_env() -> Self {
        let caches = CacheDomain::ALL
            .into_iter()
            .map(|domain| {
                let defaults = domain.default_settings();
                let prefix = domain.env_prefix();
                let max_size = env_or(&format!("{prefix}_CACHE_MAX_SIZE"), defaults.max_size);
                let ttl_secs = env_or(
                    &format!("{prefix}_CACHE_TTL_SECS"),
                    defaults.default_ttl.as_secs(),
                );

                let settings = DomainSettings {
                    max_size,
                    default_ttl: Duration::from_secs(ttl_secs),
                };
                (domain, settings)
            })
            .collect();

        Self {
            server_port: env_or("SERVER_PORT", 3000),
            cleanup_interval: env_or("CLEANUP_INTERVAL", 300),
            caches,
        }
    }

    /// Returns the settings for `domain`, falling back to its defaults.
    pub fn cache_settings(&self, domain: CacheDomain) -> DomainSettings {
        self.caches
            .get(&domain)
            .copied()
            .unwrap_or_else(|| domain.default_settings())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            cleanup_interval: 300,
            caches: CacheDomain::ALL
                .into_iter()
                .map(|domain| (domain, domain.default_settings()))
                .collect(),
        }
    }
}

/// Reads and parses `name`, keeping `default` when unset or unparsable.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid value {:?} for {}", raw, name);
            default
        }),
        Err(_) => default,
    }
}
