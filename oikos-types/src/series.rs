use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::provider::ProviderId;

/// Observation cadence of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    /// One observation per year.
    Annual,
    /// One observation per quarter.
    Quarterly,
    /// One observation per month.
    Monthly,
    /// One observation per day (rare for macro series, common for market data).
    Daily,
}

impl Frequency {
    /// Single-letter code used by SDMX `FREQ` dimensions.
    #[must_use]
    pub const fn sdmx_code(self) -> &'static str {
        match self {
            Self::Annual => "A",
            Self::Quarterly => "Q",
            Self::Monthly => "M",
            Self::Daily => "D",
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Annual => "annual",
            Self::Quarterly => "quarterly",
            Self::Monthly => "monthly",
            Self::Daily => "daily",
        };
        f.write_str(s)
    }
}

/// A single dated observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Observation date (start of the period for sub-annual cadences).
    pub date: NaiveDate,
    /// Observed value.
    pub value: f64,
}

/// Descriptive metadata attached to a normalized series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesMetadata {
    /// Provider the data came from.
    pub source: ProviderId,
    /// Provider-specific indicator code (e.g. `SL.UEM.TOTL.ZS`).
    pub indicator: String,
    /// Country code in the provider's alphabet.
    pub country: String,
    /// Cadence of the points.
    pub frequency: Frequency,
    /// Unit label as reported or selected during normalization, if known.
    pub unit: Option<String>,
    /// Upstream last-updated stamp, if the payload carried one.
    pub last_updated: Option<NaiveDate>,
    /// URL of the upstream request that produced the data.
    pub api_url: String,
}

/// One homogeneous (provider, indicator, country) series in the unified schema.
///
/// Invariants maintained by the normalizer: `points` is strictly ascending by
/// date and contains no duplicate dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSeries {
    /// Series metadata.
    pub metadata: SeriesMetadata,
    /// Ordered observations.
    pub points: Vec<DataPoint>,
}

impl NormalizedSeries {
    /// Value of the most recent observation, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&DataPoint> {
        self.points.last()
    }
}

/// Wire shape of a raw payload body, dispatched on by the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayloadFormat {
    /// World Bank v2 JSON: `[page_meta, [row, row, ...]]`.
    WorldBankRows,
    /// SDMX-JSON datasets + structure, as served by Eurostat, OECD and IMF.
    SdmxSeries,
}

/// Raw, provider-shaped payload as returned by a `ProviderAdapter`.
///
/// The body is kept as untyped JSON on purpose: adapters stay thin transport
/// wrappers and the normalizer owns all shape knowledge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPayload {
    /// Provider that produced the payload.
    pub provider: ProviderId,
    /// Upstream request URL, preserved for diagnostics and series metadata.
    pub api_url: String,
    /// Body shape tag.
    pub format: PayloadFormat,
    /// Untyped JSON body.
    pub body: serde_json::Value,
}
