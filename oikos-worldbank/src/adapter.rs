use async_trait::async_trait;
use reqwest::header::RETRY_AFTER;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;
use url::Url;

use oikos_core::ProviderAdapter;
use oikos_types::{OikosError, PayloadFormat, ProviderId, RawPayload, ResolvedRequest};

/// Production World Bank API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.worldbank.org/";

/// Large enough to keep every realistic query on a single page.
const PER_PAGE: u32 = 20_000;

/// Adapter for the World Bank Indicators API (v2, JSON).
///
/// All requested countries go into one semicolon-joined call, so a
/// twenty-country Eurozone query costs a single request against the
/// provider's quota.
pub struct WorldBankAdapter {
    http: reqwest::Client,
    base_url: Url,
}

/// Builder for [`WorldBankAdapter`].
pub struct WorldBankAdapterBuilder {
    base_url: String,
    http: Option<reqwest::Client>,
}

impl Default for WorldBankAdapterBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            http: None,
        }
    }
}

impl WorldBankAdapterBuilder {
    /// Point the adapter at a different endpoint (tests, mirrors).
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Use a preconfigured HTTP client (proxies, custom timeouts).
    #[must_use]
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http = Some(client);
        self
    }

    /// Finalize the adapter.
    ///
    /// # Errors
    /// `Validation` when the base URL does not parse; `Provider` when the
    /// HTTP client cannot be constructed.
    pub fn build(self) -> Result<WorldBankAdapter, OikosError> {
        // A trailing slash keeps Url::join from eating the last path segment.
        let normalized = if self.base_url.ends_with('/') {
            self.base_url
        } else {
            format!("{}/", self.base_url)
        };
        let base_url = Url::parse(&normalized)
            .map_err(|e| OikosError::validation(format!("invalid base url: {e}")))?;
        let http = match self.http {
            Some(client) => client,
            None => reqwest::Client::builder().build().map_err(|e| {
                OikosError::provider(ProviderId::WorldBank, format!("http client init: {e}"))
            })?,
        };
        Ok(WorldBankAdapter { http, base_url })
    }
}

impl WorldBankAdapter {
    /// Adapter against the production endpoint.
    ///
    /// # Errors
    /// `Provider` when the HTTP client cannot be constructed.
    pub fn new() -> Result<Self, OikosError> {
        Self::builder().build()
    }

    /// Start building an adapter.
    #[must_use]
    pub fn builder() -> WorldBankAdapterBuilder {
        WorldBankAdapterBuilder::default()
    }

    fn request_url(&self, req: &ResolvedRequest) -> Result<Url, OikosError> {
        let countries = req.country_codes.join(";");
        let path = format!(
            "v2/country/{countries}/indicator/{}",
            req.indicator_code
        );
        let mut url = self.base_url.join(&path).map_err(|e| {
            OikosError::validation(format!("cannot build request url: {e}"))
        })?;
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("date", &format!("{}:{}", req.start.format("%Y"), req.end.format("%Y")))
            .append_pair("per_page", &PER_PAGE.to_string());
        Ok(url)
    }
}

/// The v2 API reports client errors as HTTP 200 with a one-element array
/// holding a `message` list instead of the usual `[meta, rows]` pair.
fn embedded_error(body: &Value) -> Option<String> {
    let first = body.as_array()?.first()?;
    let messages = first.get("message")?.as_array()?;
    let text = messages
        .iter()
        .filter_map(|m| m.get("value").and_then(Value::as_str))
        .collect::<Vec<_>>()
        .join("; ");
    Some(text)
}

fn map_status(status: StatusCode, retry_after_ms: Option<u64>, body: &str) -> OikosError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return OikosError::RateLimited {
            provider: ProviderId::WorldBank,
            retry_after_ms,
        };
    }
    if status.is_server_error() {
        return OikosError::transient(
            ProviderId::WorldBank,
            Some(status.as_u16()),
            format!("server error: {body}"),
        );
    }
    OikosError::validation(format!("world bank rejected the request ({status}): {body}"))
}

#[async_trait]
impl ProviderAdapter for WorldBankAdapter {
    fn provider_id(&self) -> ProviderId {
        ProviderId::WorldBank
    }

    fn name(&self) -> &'static str {
        "oikos-worldbank"
    }

    async fn fetch(&self, req: &ResolvedRequest) -> Result<RawPayload, OikosError> {
        let url = self.request_url(req)?;
        debug!(%url, "world bank request");
        let response = self.http.get(url.clone()).send().await.map_err(|e| {
            OikosError::transient(ProviderId::WorldBank, e.status().map(|s| s.as_u16()), e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let retry_after_ms = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .map(|secs| secs.saturating_mul(1000));
            let body = response.text().await.unwrap_or_default();
            return Err(map_status(status, retry_after_ms, &body));
        }

        let body: Value = response.json().await.map_err(|e| {
            OikosError::provider(ProviderId::WorldBank, format!("invalid json: {e}"))
        })?;

        if let Some(message) = embedded_error(&body) {
            return Err(OikosError::validation(format!(
                "world bank rejected the request: {message}"
            )));
        }

        let rows_empty = body
            .pointer("/1")
            .and_then(Value::as_array)
            .is_none_or(|rows| rows.is_empty());
        if rows_empty {
            let country = req.country_codes.first().cloned().unwrap_or_default();
            return Err(OikosError::no_data(
                ProviderId::WorldBank,
                &req.indicator_code,
                country,
            ));
        }

        Ok(RawPayload {
            provider: ProviderId::WorldBank,
            api_url: url.to_string(),
            format: PayloadFormat::WorldBankRows,
            body,
        })
    }
}
