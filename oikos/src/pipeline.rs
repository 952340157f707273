//! Query execution: resolve, route, fetch, normalize.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Months, Utc};
use futures::future::join_all;
use tracing::{debug, warn};

use oikos_core::registry::normalize_name;
use oikos_core::normalize;
use oikos_types::{
    Intent, NormalizedSeries, OikosError, ProviderId, RawPayload, ResolvedRequest,
};

use crate::core::Oikos;
use crate::resolve::{
    CountryCodeResolver, IndicatorResolver, ProviderRouter, RegionExpander, RouteContext,
};

/// One failed unit of work, kept alongside the series that did arrive.
///
/// A provider-level failure (timeout, exhausted retries) names every country
/// the request covered; a per-country gap names just the one.
#[derive(Debug)]
pub struct FetchFailure {
    /// Provider the request was routed to.
    pub provider: ProviderId,
    /// Indicator as requested (the phrase before resolution, or the resolved
    /// code once resolution succeeded).
    pub indicator: String,
    /// Countries the failure covers, in provider codes where known.
    pub countries: Vec<String>,
    /// What went wrong.
    pub error: OikosError,
}

/// Result of a query: every series that could be produced plus a structured
/// account of everything that could not.
#[derive(Debug, Default)]
pub struct QueryOutcome {
    /// Normalized series, one per (indicator, country) that yielded data.
    pub series: Vec<NormalizedSeries>,
    /// Partial failures. Empty when everything succeeded.
    pub failures: Vec<FetchFailure>,
}

impl Oikos {
    /// Execute a parsed query intent end to end.
    ///
    /// Regions are expanded, a provider is routed per indicator, codes are
    /// resolved into the provider's dialect, and the resulting requests run
    /// concurrently through the cache, rate limiter, and retry executor.
    /// Partial failures never abort the batch; they are collected into
    /// [`QueryOutcome::failures`].
    ///
    /// # Errors
    /// `Validation` when the intent names no indicator or no country, or its
    /// date range is inverted; `AllCountriesFailed` when every unit of work
    /// failed and there is nothing to return.
    pub async fn query(&self, intent: &Intent) -> Result<QueryOutcome, OikosError> {
        let names: Vec<String> = intent
            .country_names()
            .into_iter()
            .map(ToString::to_string)
            .collect();
        if names.is_empty() {
            return Err(OikosError::validation("query names no country or region"));
        }
        if intent.indicators.is_empty() {
            return Err(OikosError::validation("query names no indicator"));
        }
        let end = intent.end_date.unwrap_or_else(|| Utc::now().date_naive());
        let start = match intent.start_date {
            Some(d) => d,
            None => end
                .checked_sub_months(Months::new(self.cfg.lookback_years.saturating_mul(12)))
                .unwrap_or(end),
        };
        if start > end {
            return Err(OikosError::validation("start date is after end date"));
        }

        let expander = RegionExpander::new(&self.registry);
        let mut tokens: Vec<String> = Vec::new();
        for name in &names {
            match expander.expand(name) {
                Some(members) => {
                    for m in members {
                        if !tokens.iter().any(|t| t == m) {
                            tokens.push((*m).to_string());
                        }
                    }
                }
                None => {
                    if !tokens.contains(name) {
                        tokens.push(name.clone());
                    }
                }
            }
        }
        let iso3_codes = self.canonical_iso3(&tokens);

        let router = ProviderRouter::new(&self.registry);
        let indicators = IndicatorResolver::new(&self.registry);
        let countries = CountryCodeResolver::new(&self.registry);

        let mut failures: Vec<FetchFailure> = Vec::new();
        let mut requests: Vec<ResolvedRequest> = Vec::new();
        let mut seen = HashSet::new();
        for phrase in &intent.indicators {
            let ctx = RouteContext {
                explicit: intent.explicit_provider,
                suggested: intent.suggested_provider,
                indicator: normalize_name(phrase),
                iso3_codes: iso3_codes.clone(),
            };
            let provider = router.route(&ctx);
            let indicator_code = match indicators.resolve(phrase, provider) {
                Ok(code) => code,
                Err(error) => {
                    failures.push(FetchFailure {
                        provider,
                        indicator: phrase.clone(),
                        countries: tokens.clone(),
                        error,
                    });
                    continue;
                }
            };
            let mut codes: Vec<String> = Vec::new();
            for token in &tokens {
                match countries.resolve(token, provider) {
                    Ok(code) => {
                        if !codes.contains(&code) {
                            codes.push(code);
                        }
                    }
                    Err(error) => failures.push(FetchFailure {
                        provider,
                        indicator: indicator_code.clone(),
                        countries: vec![token.clone()],
                        error,
                    }),
                }
            }
            if codes.is_empty() {
                continue;
            }
            let req = ResolvedRequest {
                provider,
                indicator_code,
                country_codes: codes,
                start,
                end,
                frequency: None,
            };
            if seen.insert(req.fingerprint()) {
                requests.push(req);
            }
        }

        let executions = join_all(requests.into_iter().map(|req| self.execute(req))).await;
        let mut outcome = QueryOutcome {
            series: Vec::new(),
            failures,
        };
        for (series, unit_failures) in executions {
            outcome.series.extend(series);
            outcome.failures.extend(unit_failures);
        }
        if outcome.series.is_empty() && !outcome.failures.is_empty() {
            return Err(OikosError::AllCountriesFailed(
                outcome.failures.into_iter().map(|f| f.error).collect(),
            ));
        }
        Ok(outcome)
    }

    /// Best-effort ISO3 view of the token list, used only for routing.
    fn canonical_iso3(&self, tokens: &[String]) -> Vec<String> {
        tokens
            .iter()
            .filter_map(|t| {
                self.registry
                    .find_country(t)
                    .map(|r| r.iso3.to_string())
                    .or_else(|| {
                        let upper = t.trim().to_ascii_uppercase();
                        (upper.len() == 3 && upper.bytes().all(|b| b.is_ascii_uppercase()))
                            .then_some(upper)
                    })
            })
            .collect()
    }

    /// Run one resolved request through cache, rate limiter, retry, and
    /// normalization.
    async fn execute(&self, req: ResolvedRequest) -> (Vec<NormalizedSeries>, Vec<FetchFailure>) {
        let fingerprint = req.fingerprint();
        if let Some(hit) = self.cache.get(&fingerprint) {
            debug!(provider = %req.provider, indicator = %req.indicator_code, "serving from cache");
            // A cached batch can be missing countries just like a fresh one;
            // the gaps are reported on every hit, not only on the first fill.
            let failures = gap_failures(&req, &hit);
            return (hit, failures);
        }
        let adapter = match self.adapter(req.provider) {
            Ok(a) => a,
            Err(error) => return (Vec::new(), vec![failure_for(&req, error)]),
        };

        let limiter = &self.limiter;
        let fetched = self
            .retry
            .run(|attempt| {
                let adapter = Arc::clone(&adapter);
                let req = &req;
                async move {
                    // Every attempt reserves its own slot, so retries and
                    // failed attempts consume admission budget too.
                    let wait = limiter.acquire(req.provider);
                    if !wait.is_zero() {
                        debug!(provider = %req.provider, wait_ms = wait.as_millis() as u64, "throttling before fetch");
                        tokio::time::sleep(wait).await;
                    }
                    debug!(provider = %req.provider, indicator = %req.indicator_code, attempt, "fetching");
                    self.timed_fetch(adapter, req).await
                }
            })
            .await;

        let raw = match fetched {
            Ok(raw) => raw,
            Err(error) => {
                warn!(provider = %req.provider, indicator = %req.indicator_code, error = %error, "fetch failed");
                return (Vec::new(), vec![failure_for(&req, error)]);
            }
        };
        match normalize(&raw, &req) {
            Ok(series) => {
                let failures = gap_failures(&req, &series);
                if !series.is_empty() {
                    self.cache.put(fingerprint, series.clone());
                }
                (series, failures)
            }
            Err(error) => {
                warn!(provider = %req.provider, indicator = %req.indicator_code, error = %error, "normalization failed");
                (Vec::new(), vec![failure_for(&req, error)])
            }
        }
    }

    async fn timed_fetch(
        &self,
        adapter: Arc<dyn oikos_core::ProviderAdapter>,
        req: &ResolvedRequest,
    ) -> Result<RawPayload, OikosError> {
        match tokio::time::timeout(self.cfg.provider_timeout, adapter.fetch(req)).await {
            Ok(result) => result,
            Err(_) => Err(OikosError::ProviderTimeout {
                provider: req.provider,
                indicator: req.indicator_code.clone(),
            }),
        }
    }
}

fn failure_for(req: &ResolvedRequest, error: OikosError) -> FetchFailure {
    FetchFailure {
        provider: req.provider,
        indicator: req.indicator_code.clone(),
        countries: req.country_codes.clone(),
        error,
    }
}

/// One `DataNotAvailable` failure per requested country absent from `series`.
fn gap_failures(req: &ResolvedRequest, series: &[NormalizedSeries]) -> Vec<FetchFailure> {
    req.country_codes
        .iter()
        .filter(|&code| !series.iter().any(|s| &s.metadata.country == code))
        .map(|code| FetchFailure {
            provider: req.provider,
            indicator: req.indicator_code.clone(),
            countries: vec![code.clone()],
            error: OikosError::no_data(req.provider, &req.indicator_code, code),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{Months, NaiveDate};

    #[test]
    fn default_range_is_the_trailing_lookback() {
        let end = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let start = end.checked_sub_months(Months::new(120)).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2014, 6, 1).unwrap());
    }
}
