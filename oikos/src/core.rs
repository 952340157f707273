use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use oikos_core::{ProviderAdapter, Registry};
use oikos_middleware::{RateLimiter, ResponseCache, RetryExecutor};
use oikos_types::{OikosConfig, OikosError, ProviderConfig, ProviderId, RateLimitConfig};

/// Orchestrator that turns parsed query intents into normalized series.
///
/// Holds the registered provider adapters, the lookup registry, and the
/// shared middleware (rate limiter, retry executor, response cache). All
/// state is immutable after [`build`](OikosBuilder::build); the middleware
/// interior-mutates behind its own locks, so an `Oikos` is freely shared
/// across tasks via `Arc` or `&`.
pub struct Oikos {
    pub(crate) adapters: HashMap<ProviderId, Arc<dyn ProviderAdapter>>,
    pub(crate) registry: Arc<Registry>,
    pub(crate) cfg: OikosConfig,
    pub(crate) limiter: RateLimiter,
    pub(crate) retry: RetryExecutor,
    pub(crate) cache: ResponseCache,
}

impl Oikos {
    /// Start building an orchestrator.
    #[must_use]
    pub fn builder() -> OikosBuilder {
        OikosBuilder::new()
    }

    /// The injected lookup registry.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The effective configuration.
    #[must_use]
    pub const fn config(&self) -> &OikosConfig {
        &self.cfg
    }

    /// The response cache, exposed for introspection (entry count, manual
    /// eviction). Reads and writes during queries go through the pipeline.
    #[must_use]
    pub const fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub(crate) fn adapter(
        &self,
        provider: ProviderId,
    ) -> Result<Arc<dyn ProviderAdapter>, OikosError> {
        self.adapters.get(&provider).cloned().ok_or_else(|| {
            OikosError::provider(provider, "no adapter registered for routed provider")
        })
    }
}

/// Builder for [`Oikos`].
///
/// At least one adapter must be registered; everything else has defaults.
/// The registry defaults to [`Registry::with_defaults`], which carries the
/// production country, region, and indicator tables.
pub struct OikosBuilder {
    adapters: HashMap<ProviderId, Arc<dyn ProviderAdapter>>,
    registry: Option<Registry>,
    cfg: OikosConfig,
}

impl Default for OikosBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl OikosBuilder {
    /// Empty builder with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            adapters: HashMap::new(),
            registry: None,
            cfg: OikosConfig::default(),
        }
    }

    /// Register a provider adapter. Registering a second adapter for the
    /// same provider replaces the first.
    #[must_use]
    pub fn with_adapter(mut self, adapter: Arc<dyn ProviderAdapter>) -> Self {
        self.adapters.insert(adapter.provider_id(), adapter);
        self
    }

    /// Replace the default registry, e.g. to add country overrides or
    /// custom indicator aliases.
    #[must_use]
    pub fn registry(mut self, registry: Registry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: OikosConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Set the per-attempt provider timeout.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Set the default lookback window applied when an intent has no dates.
    #[must_use]
    pub const fn lookback_years(mut self, years: u32) -> Self {
        self.cfg.lookback_years = years;
        self
    }

    /// Finalize the orchestrator.
    ///
    /// Rate-limit windows and cache TTLs are read out of the registry's
    /// per-provider configuration here, once.
    ///
    /// # Errors
    /// `Validation` when no adapter was registered.
    pub fn build(self) -> Result<Oikos, OikosError> {
        if self.adapters.is_empty() {
            return Err(OikosError::validation(
                "at least one provider adapter must be registered",
            ));
        }
        let registry = Arc::new(self.registry.unwrap_or_else(Registry::with_defaults));
        let mut limits: HashMap<ProviderId, RateLimitConfig> = HashMap::new();
        let mut ttls: HashMap<ProviderId, Duration> = HashMap::new();
        for &provider in ProviderId::ALL {
            let pc = registry.provider_config(provider);
            limits.insert(provider, pc.limits);
            ttls.insert(provider, pc.cache_ttl);
        }
        let cache = ResponseCache::new(
            self.cfg.cache_capacity,
            ttls,
            ProviderConfig::default().cache_ttl,
        );
        Ok(Oikos {
            adapters: self.adapters,
            registry,
            limiter: RateLimiter::new(limits),
            retry: RetryExecutor::new(self.cfg.retry),
            cache,
            cfg: self.cfg,
        })
    }
}
