//! Scriptable mock provider adapter for deterministic, CI-safe tests.
//!
//! Responses are scripted per `(indicator, country)` as period/value pairs
//! and served in the World Bank row shape, which the normalizer accepts for
//! any provider identity. Faults are a FIFO queue consumed one per fetch,
//! so "fail twice then succeed" retry scenarios are one-liners.
#![warn(missing_docs)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use oikos_core::ProviderAdapter;
use oikos_types::{OikosError, PayloadFormat, ProviderId, RawPayload, ResolvedRequest};

/// One scripted failure, consumed by the next fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Upstream pushback (HTTP 429).
    RateLimited,
    /// Transient transport failure (HTTP 503).
    Transient,
    /// Hard provider error; not retryable.
    Fatal,
    /// Never respond, letting the caller's timeout fire.
    Hang,
}

#[derive(Default)]
struct State {
    series: HashMap<(String, String), Vec<(String, f64)>>,
    faults: VecDeque<Fault>,
    calls: u32,
}

/// Mock adapter with scripted per-country data and fault injection.
pub struct MockAdapter {
    provider: ProviderId,
    state: Mutex<State>,
}

impl Default for MockAdapter {
    fn default() -> Self {
        Self::new(ProviderId::WorldBank)
    }
}

impl MockAdapter {
    /// Mock adapter posing as the given provider.
    #[must_use]
    pub fn new(provider: ProviderId) -> Self {
        Self {
            provider,
            state: Mutex::new(State::default()),
        }
    }

    /// Script observations for one `(indicator, country)` pair. Periods use
    /// the provider period grammar: `"2020"`, `"2020-Q3"`, `"2020-05"`.
    ///
    /// # Panics
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn with_series(self, indicator: &str, country: &str, points: &[(&str, f64)]) -> Self {
        {
            let mut state = self.state.lock().expect("mutex poisoned");
            state.series.insert(
                (indicator.to_string(), country.to_string()),
                points.iter().map(|(p, v)| ((*p).to_string(), *v)).collect(),
            );
        }
        self
    }

    /// Queue a fault; each fetch consumes at most one, oldest first.
    ///
    /// # Panics
    /// Panics if the internal mutex is poisoned.
    pub fn push_fault(&self, fault: Fault) {
        self.state
            .lock()
            .expect("mutex poisoned")
            .faults
            .push_back(fault);
    }

    /// Builder-style [`push_fault`](Self::push_fault).
    ///
    /// # Panics
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn with_fault(self, fault: Fault) -> Self {
        self.push_fault(fault);
        self
    }

    /// Number of fetches issued so far, including ones that faulted.
    ///
    /// # Panics
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn fetch_count(&self) -> u32 {
        self.state.lock().expect("mutex poisoned").calls
    }

    fn rows_for(&self, req: &ResolvedRequest) -> Vec<Value> {
        let state = self.state.lock().expect("mutex poisoned");
        let mut rows = Vec::new();
        for code in &req.country_codes {
            let key = (req.indicator_code.clone(), code.clone());
            let Some(points) = state.series.get(&key) else {
                continue;
            };
            for (period, value) in points {
                rows.push(json!({
                    "countryiso3code": code,
                    "country": { "id": code, "value": code },
                    "indicator": { "id": req.indicator_code },
                    "date": period,
                    "value": value,
                }));
            }
        }
        rows
    }
}

#[async_trait]
impl ProviderAdapter for MockAdapter {
    fn provider_id(&self) -> ProviderId {
        self.provider
    }

    fn name(&self) -> &'static str {
        "oikos-mock"
    }

    async fn fetch(&self, req: &ResolvedRequest) -> Result<RawPayload, OikosError> {
        let fault = {
            let mut state = self.state.lock().expect("mutex poisoned");
            state.calls += 1;
            state.faults.pop_front()
        };
        match fault {
            Some(Fault::RateLimited) => {
                return Err(OikosError::RateLimited {
                    provider: self.provider,
                    retry_after_ms: None,
                });
            }
            Some(Fault::Transient) => {
                return Err(OikosError::transient(
                    self.provider,
                    Some(503),
                    "scripted transient failure",
                ));
            }
            Some(Fault::Fatal) => {
                return Err(OikosError::provider(self.provider, "scripted hard failure"));
            }
            Some(Fault::Hang) => {
                tokio::time::sleep(Duration::from_secs(86_400)).await;
            }
            None => {}
        }

        let rows = self.rows_for(req);
        if rows.is_empty() {
            let country = req.country_codes.first().cloned().unwrap_or_default();
            return Err(OikosError::no_data(
                self.provider,
                &req.indicator_code,
                country,
            ));
        }
        let body = json!([
            {
                "page": 1,
                "pages": 1,
                "per_page": 20_000,
                "total": rows.len(),
                "lastupdated": "2025-01-15",
            },
            rows,
        ]);
        Ok(RawPayload {
            provider: self.provider,
            api_url: format!("mock://{}/{}", self.provider, req.indicator_code),
            format: PayloadFormat::WorldBankRows,
            body,
        })
    }
}
