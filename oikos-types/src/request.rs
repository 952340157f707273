use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::provider::ProviderId;
use crate::series::Frequency;

/// The concrete (provider, indicator code, country codes, period) tuple
/// derived from a free-form intent.
///
/// Owned by a single pipeline invocation and discarded after the fetch
/// completes. `country_codes` is non-empty, deduplicated and
/// order-preserving; resolution fails fast before a request with zero
/// countries can exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRequest {
    /// Target provider.
    pub provider: ProviderId,
    /// Provider-specific indicator code.
    pub indicator_code: String,
    /// Country codes in the provider's alphabet, request order preserved.
    pub country_codes: Vec<String>,
    /// Inclusive start of the requested period.
    pub start: NaiveDate,
    /// Inclusive end of the requested period.
    pub end: NaiveDate,
    /// Requested cadence, when the caller pinned one.
    pub frequency: Option<Frequency>,
}

impl ResolvedRequest {
    /// Compute the cache fingerprint for this request.
    ///
    /// Country codes are sorted before keying so that batches differing only
    /// in country order share a cache line.
    #[must_use]
    pub fn fingerprint(&self) -> Fingerprint {
        let mut codes = self.country_codes.clone();
        codes.sort_unstable();
        codes.dedup();
        Fingerprint {
            provider: self.provider,
            indicator_code: self.indicator_code.clone(),
            country_codes: codes,
            start: self.start,
            end: self.end,
        }
    }
}

/// Deterministic cache key: a pure function of the resolved request fields,
/// never of the original free-text query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint {
    provider: ProviderId,
    indicator_code: String,
    country_codes: Vec<String>,
    start: NaiveDate,
    end: NaiveDate,
}

impl Fingerprint {
    /// Provider component of the key, used to resolve per-provider TTLs.
    #[must_use]
    pub const fn provider(&self) -> ProviderId {
        self.provider
    }
}
