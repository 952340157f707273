use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::provider::ProviderId;

/// Unified error type for the oikos workspace.
///
/// One tagged enumeration covers validation failures, provider-tagged
/// transport failures, rate limiting, missing data and the aggregate for
/// multi-country batches, so the retry classifier switches on the variant
/// rather than inspecting message text.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq)]
#[non_exhaustive]
pub enum OikosError {
    /// Invalid or incomplete input; fatal, never retried.
    #[error("invalid argument: {0}")]
    Validation(String),

    /// A country name or code could not be resolved for the target provider.
    /// Carries example valid codes so caller diagnostics are actionable.
    #[error("unknown country '{input}' (valid codes include {sample_valid_codes:?})")]
    UnknownCountry {
        /// The input that failed to resolve.
        input: String,
        /// A few codes the provider does accept.
        sample_valid_codes: Vec<String>,
    },

    /// No alias matched and no catalog entry cleared the confidence
    /// threshold; the caller should surface a clarification request.
    #[error("could not resolve indicator '{phrase}' for {provider}")]
    IndicatorNotResolved {
        /// The indicator phrase that failed to resolve.
        phrase: String,
        /// Provider whose catalog was searched.
        provider: ProviderId,
        /// Best below-threshold catalog candidates, for clarification UX.
        candidates: Vec<String>,
    },

    /// The provider pushed back with a rate-limit response; retried with
    /// backoff up to the configured attempt budget.
    #[error("rate limited by {provider}")]
    RateLimited {
        /// Provider that rejected the request.
        provider: ProviderId,
        /// Server-advised wait, when the response carried one.
        retry_after_ms: Option<u64>,
    },

    /// Retry budget exhausted while the provider kept rate limiting.
    #[error("rate limit budget exhausted for {provider} after {attempts} attempts")]
    RateLimitExceeded {
        /// Provider that kept rejecting.
        provider: ProviderId,
        /// Attempts made before giving up.
        attempts: u32,
    },

    /// Timeout or 5xx-class upstream failure; retried.
    #[error("transient network failure from {provider}: {msg}")]
    TransientNetwork {
        /// Provider whose transport failed.
        provider: ProviderId,
        /// HTTP status, when one was received.
        status: Option<u16>,
        /// Human-readable summary.
        msg: String,
    },

    /// The provider responded but has no data for this exact
    /// country/indicator/period. Fatal per-country, never retried, and never
    /// fails sibling countries in a batch.
    #[error("no data from {provider} for {indicator}/{country}")]
    DataNotAvailable {
        /// Provider that responded.
        provider: ProviderId,
        /// Indicator code requested.
        indicator: String,
        /// Country code with no data.
        country: String,
    },

    /// An adapter failed in a way that is not covered above.
    #[error("{provider} adapter failed: {msg}")]
    Provider {
        /// Provider whose adapter failed.
        provider: ProviderId,
        /// Human-readable summary.
        msg: String,
    },

    /// A single provider attempt exceeded the configured call timeout.
    #[error("provider call timed out: {indicator} via {provider}")]
    ProviderTimeout {
        /// Provider that timed out.
        provider: ProviderId,
        /// Indicator code being fetched.
        indicator: String,
    },

    /// Every country in the batch failed; contains the individual failures.
    #[error("all countries failed: {0:?}")]
    AllCountriesFailed(Vec<OikosError>),
}

impl OikosError {
    /// Helper: build a `Validation` error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Helper: build a `Provider` error.
    pub fn provider(provider: ProviderId, msg: impl Into<String>) -> Self {
        Self::Provider {
            provider,
            msg: msg.into(),
        }
    }

    /// Helper: build a `TransientNetwork` error.
    pub fn transient(provider: ProviderId, status: Option<u16>, msg: impl Into<String>) -> Self {
        Self::TransientNetwork {
            provider,
            status,
            msg: msg.into(),
        }
    }

    /// Helper: build a `DataNotAvailable` error.
    pub fn no_data(
        provider: ProviderId,
        indicator: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self::DataNotAvailable {
            provider,
            indicator: indicator.into(),
            country: country.into(),
        }
    }

    /// Classification consumed by the retry executor: rate-limit pushback and
    /// transient transport failures are worth another attempt, everything
    /// else propagates immediately.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. } | Self::TransientNetwork { .. } | Self::ProviderTimeout { .. }
        )
    }

    /// True when the failure concerns data availability rather than a broken
    /// request or transport; batch handling isolates these per country.
    #[must_use]
    pub const fn is_no_data(&self) -> bool {
        matches!(self, Self::DataNotAvailable { .. })
    }

    /// Flatten nested `AllCountriesFailed` aggregates into a plain vector.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::AllCountriesFailed(list) => list.into_iter().flat_map(Self::flatten).collect(),
            other => vec![other],
        }
    }
}
