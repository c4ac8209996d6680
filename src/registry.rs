//! Cache Registry
//!
//! The process-wide set of domain caches. It is built once at startup and
//! handed to request handlers through application state, so tests can build
//! isolated registries of their own.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::cache::{CacheCounters, CacheStats, SharedCache};
use crate::config::{Config, DomainSettings};
use crate::error::{ApiError, Result};
use crate::models::{SemanticSearchResults, StudentProfile};

const MINUTE: Duration = Duration::from_secs(60);

// == Cache Domain ==
/// Data domains that get their own cache instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CacheDomain {
    /// Student profile lookups
    Profiles,
    /// Computed per-student analyses
    StudentAnalysis,
    /// Semantic question search results
    SemanticSearch,
    /// Query embeddings
    Embeddings,
    /// Memoized AI generation responses
    AiResponses,
}

impl CacheDomain {
    pub const ALL: [CacheDomain; 5] = [
        CacheDomain::Profiles,
        CacheDomain::StudentAnalysis,
        CacheDomain::SemanticSearch,
        CacheDomain::Embeddings,
        CacheDomain::AiResponses,
    ];

    /// Name used in URLs and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            CacheDomain::Profiles => "profiles",
            CacheDomain::StudentAnalysis => "student-analysis",
            CacheDomain::SemanticSearch => "semantic-search",
            CacheDomain::Embeddings => "embeddings",
            CacheDomain::AiResponses => "ai-responses",
        }
    }

    /// Prefix of this domain's environment variables.
    pub fn env_prefix(self) -> String {
        self.as_str().replace('-', "_").to_uppercase()
    }

    pub fn default_settings(self) -> DomainSettings {
        let (max_size, default_ttl) = match self {
            CacheDomain::Profiles => (500, 5 * MINUTE),
            CacheDomain::StudentAnalysis => (500, 5 * MINUTE),
            CacheDomain::SemanticSearch => (200, 10 * MINUTE),
            CacheDomain::Embeddings => (100, 30 * MINUTE),
            CacheDomain::AiResponses => (200, 30 * MINUTE),
        };
        DomainSettings {
            max_size,
            default_ttl,
        }
    }
}

impl fmt::Display for CacheDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CacheDomain {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self> {
        CacheDomain::ALL
            .into_iter()
            .find(|domain| domain.as_str() == s)
            .ok_or_else(|| ApiError::UnknownCache(s.to_string()))
    }
}

// == Cache Report ==
/// Diagnostics for one domain cache.
#[derive(Debug, Clone, Serialize)]
pub struct CacheReport {
    pub domain: CacheDomain,
    #[serde(flatten)]
    pub stats: CacheStats,
    pub counters: CacheCounters,
    pub hit_rate: f64,
}

// == Cache Registry ==
/// One shared cache per data domain.
#[derive(Debug, Clone)]
pub struct CacheRegistry {
    pub profiles: SharedCache<StudentProfile>,
    pub student_analysis: SharedCache<Value>,
    pub semantic_search: SharedCache<SemanticSearchResults>,
    pub embeddings: SharedCache<Vec<f32>>,
    pub ai_responses: SharedCache<Value>,
}

/// Runs `$body` with `$cache` bound to the typed cache of `$domain`.
macro_rules! with_cache {
    ($registry:expr, $domain:expr, |$cache:ident| $body:expr) => {
        match $domain {
            CacheDomain::Profiles => {
                let $cache = &$registry.profiles;
                $body
            }
            CacheDomain::StudentAnalysis => {
                let $cache = &$registry.student_analysis;
                $body
            }
            CacheDomain::SemanticSearch => {
                let $cache = &$registry.semantic_search;
                $body
            }
            CacheDomain::Embeddings => {
                let $cache = &$registry.embeddings;
                $body
            }
            CacheDomain::AiResponses => {
                let $cache = &$registry.ai_responses;
                $body
            }
        }
    };
}

impl CacheRegistry {
    // == Constructor ==
    /// Builds every domain cache with the configured capacity and TTL.
    pub fn new(config: &Config) -> Self {
        let build = |domain: CacheDomain| {
            let settings = config.cache_settings(domain);
            info!(
                "Cache '{}' initialized: max_size={}, default_ttl={}s",
                domain,
                settings.max_size,
                settings.default_ttl.as_secs()
            );
            (domain.as_str(), settings.max_size, settings.default_ttl)
        };

        let (name, size, ttl) = build(CacheDomain::Profiles);
        let profiles = SharedCache::new(name, size, ttl);
        let (name, size, ttl) = build(CacheDomain::StudentAnalysis);
        let student_analysis = SharedCache::new(name, size, ttl);
        let (name, size, ttl) = build(CacheDomain::SemanticSearch);
        let semantic_search = SharedCache::new(name, size, ttl);
        let (name, size, ttl) = build(CacheDomain::Embeddings);
        let embeddings = SharedCache::new(name, size, ttl);
        let (name, size, ttl) = build(CacheDomain::AiResponses);
        let ai_responses = SharedCache::new(name, size, ttl);

        Self {
            profiles,
            student_analysis,
            semantic_search,
            embeddings,
            ai_responses,
        }
    }

    // == Report ==
    /// Returns stats and counters for one domain.
    pub async fn report(&self, domain: CacheDomain) -> CacheReport {
        let (stats, counters) = with_cache!(self, domain, |cache| {
            (cache.stats().await, cache.counters().await)
        });

        CacheReport {
            domain,
            stats,
            hit_rate: counters.hit_rate(),
            counters,
        }
    }

    /// Returns a report for every domain, in declaration order.
    pub async fn report_all(&self) -> Vec<CacheReport> {
        let mut reports = Vec::with_capacity(CacheDomain::ALL.len());
        for domain in CacheDomain::ALL {
            reports.push(self.report(domain).await);
        }
        reports
    }

    // == Clear ==
    pub async fn clear(&self, domain: CacheDomain) {
        with_cache!(self, domain, |cache| cache.clear().await);
        info!("Cache '{}' cleared", domain);
    }

    // == Cleanup ==
    /// Sweeps expired entries from one domain and returns how many went.
    pub async fn cleanup(&self, domain: CacheDomain) -> usize {
        with_cache!(self, domain, |cache| cache.cleanup().await)
    }

    /// Sweeps every domain. Returns the removed count per domain.
    pub async fn cleanup_all(&self) -> Vec<(CacheDomain, usize)> {
        let mut removed = Vec::with_capacity(CacheDomain::ALL.len());
        for domain in CacheDomain::ALL {
            let count = self.cleanup(domain).await;
            if count > 0 {
                debug!("Cache '{}': swept {} expired entries", domain, count);
            }
            removed.push((domain, count));
        }
        removed
    }

    // == Entry Access ==
    /// Reads `key` through the domain cache's `get` (refreshing its recency)
    /// and returns it as JSON.
    pub async fn get_json(&self, domain: CacheDomain, key: &str) -> Result<Option<Value>> {
        with_cache!(self, domain, |cache| match cache.get(key).await {
            Some(value) => serde_json::to_value(value)
                .map(Some)
                .map_err(|e| ApiError::Internal(e.to_string())),
            None => Ok(None),
        })
    }

    /// Stores a JSON value under `key` after checking it fits the domain's type.
    pub async fn set_json(
        &self,
        domain: CacheDomain,
        key: &str,
        value: Value,
        ttl: Option<Duration>,
    ) -> Result<()> {
        with_cache!(self, domain, |cache| {
            let typed = serde_json::from_value(value).map_err(|e| {
                ApiError::InvalidRequest(format!("Value does not fit cache '{domain}': {e}"))
            })?;
            cache.set(key, typed, ttl).await;
            Ok(())
        })
    }

    pub async fn delete(&self, domain: CacheDomain, key: &str) -> bool {
        with_cache!(self, domain, |cache| cache.delete(key).await)
    }
}

impl Default for CacheRegistry {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
