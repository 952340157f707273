//! Configuration types shared by the orchestrator and the middleware layer.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Admission budget for one provider.
///
/// All three constraints are enforced independently by the rate limiter; the
/// binding one determines the delay returned by `acquire`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Minimum delay between consecutive requests to the provider.
    pub min_delay: Duration,
    /// Maximum requests within any rolling 60-second window.
    pub max_per_minute: u32,
    /// Maximum requests within any rolling 3600-second window.
    pub max_per_hour: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_millis(500),
            max_per_minute: 30,
            max_per_hour: 500,
        }
    }
}

/// Bounded exponential backoff settings for the retry executor.
///
/// The delay before attempt `n + 1` is `initial_delay * backoff_factor^(n-1)`.
/// No jitter: the admission control already spaces requests, and deterministic
/// delays keep the timing tests exact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts, including the first one. Must be >= 1.
    pub max_attempts: u32,
    /// Delay between the first and second attempt.
    pub initial_delay: Duration,
    /// Multiplier applied to the delay after each failed attempt.
    pub backoff_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            initial_delay: Duration::from_secs(3),
            backoff_factor: 2.0,
        }
    }
}

/// Per-provider configuration, loaded at startup and injected into the
/// registry; control flow never hardcodes these values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Admission budget.
    #[serde(default)]
    pub limits: RateLimitConfig,
    /// Cache TTL for responses from this provider. Shorter for high-frequency
    /// data, longer for annual macro series.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl: Duration,
    /// Free-form name (normalized) -> provider country code overrides,
    /// consulted before the shared name table.
    #[serde(default)]
    pub country_overrides: HashMap<String, String>,
    /// Normalized indicator phrase -> provider indicator code aliases,
    /// consulted before the catalog keyword search.
    #[serde(default)]
    pub indicator_aliases: HashMap<String, String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            limits: RateLimitConfig::default(),
            cache_ttl: default_cache_ttl(),
            country_overrides: HashMap::new(),
            indicator_aliases: HashMap::new(),
        }
    }
}

fn default_cache_ttl() -> Duration {
    Duration::from_secs(3600)
}

/// Global configuration for the `Oikos` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OikosConfig {
    /// Retry policy applied around every provider fetch.
    pub retry: RetryConfig,
    /// Timeout for a single provider attempt (one network call).
    pub provider_timeout: Duration,
    /// Default range when the intent carries no dates: the trailing N years.
    pub lookback_years: u32,
    /// Maximum number of cached responses kept across all providers.
    pub cache_capacity: usize,
}

impl Default for OikosConfig {
    fn default() -> Self {
        Self {
            retry: RetryConfig::default(),
            provider_timeout: Duration::from_secs(30),
            lookback_years: 10,
            cache_capacity: 512,
        }
    }
}
