//! Conversion of raw, provider-shaped payloads into the unified schema.
//!
//! The normalizer owns all payload shape knowledge: splitting multi-country
//! batches into one series per country, selecting a unit dimension when the
//! upstream exposes several at once, inferring frequency, and enforcing the
//! ordering invariants of `NormalizedSeries`.

use std::collections::BTreeMap;
use std::collections::HashMap;

use chrono::NaiveDate;
use serde_json::Value;
use tracing::warn;

use oikos_types::{
    DataPoint, Frequency, NormalizedSeries, OikosError, PayloadFormat, RawPayload,
    ResolvedRequest, SeriesMetadata,
};

use super::infer::infer_frequency;
use super::period::parse_period;

/// Which unit dimension to prefer when a payload carries several variants of
/// the same indicator simultaneously.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UnitFamily {
    /// Rate-like indicators (unemployment, inflation, shares of GDP):
    /// prefer percent-denominated units.
    Rate,
    /// Level-like indicators (GDP, population): prefer absolute units.
    Level,
}

impl UnitFamily {
    /// Classify an indicator code by the conventions of the providers we
    /// normalize: World Bank `.ZS`/`.ZG` suffixes, SDMX rate/percent-change
    /// codes, Eurostat rate datasets.
    fn from_indicator(code: &str) -> Self {
        let upper = code.to_ascii_uppercase();
        let rate_markers = ["ZS", "ZG", "PCH", "HUR", "LUR", "RT", "MANR"];
        if rate_markers.iter().any(|m| upper.contains(m)) {
            Self::Rate
        } else {
            Self::Level
        }
    }

    fn prefers(self, unit: &str) -> bool {
        let u = unit.to_ascii_uppercase();
        let percentish = u.contains("PC") || u.contains('%') || u.contains("PERCENT") || u.contains("RT");
        match self {
            Self::Rate => percentish,
            Self::Level => !percentish,
        }
    }
}

/// Convert a raw payload into one `NormalizedSeries` per requested country.
///
/// Countries absent from an otherwise-successful batch are omitted from the
/// result and logged; the caller decides how to report them. The returned
/// list follows the request's country order.
///
/// # Errors
/// Returns `OikosError::Provider` when the payload body does not match the
/// declared format.
pub fn normalize(
    raw: &RawPayload,
    req: &ResolvedRequest,
) -> Result<Vec<NormalizedSeries>, OikosError> {
    let per_country = match raw.format {
        PayloadFormat::WorldBankRows => decode_worldbank(raw)?,
        PayloadFormat::SdmxSeries => decode_sdmx(raw, req)?,
    };

    let mut out = Vec::with_capacity(req.country_codes.len());
    for code in &req.country_codes {
        let Some(decoded) = per_country.get(code.as_str()) else {
            warn!(
                provider = %raw.provider,
                indicator = %req.indicator_code,
                country = %code,
                "country missing from batch response"
            );
            continue;
        };
        if decoded.points.is_empty() {
            warn!(
                provider = %raw.provider,
                indicator = %req.indicator_code,
                country = %code,
                "country present but carries no observations"
            );
            continue;
        }

        // Re-key through a map so duplicate dates resolve to the last
        // observation, then emit in ascending date order.
        let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for p in &decoded.points {
            by_date.insert(p.date, p.value);
        }
        let points: Vec<DataPoint> = by_date
            .into_iter()
            .map(|(date, value)| DataPoint { date, value })
            .collect();

        let frequency = req.frequency.or(decoded.frequency).unwrap_or_else(|| {
            let dates: Vec<NaiveDate> = points.iter().map(|p| p.date).collect();
            infer_frequency(&dates)
        });

        out.push(NormalizedSeries {
            metadata: SeriesMetadata {
                source: raw.provider,
                indicator: req.indicator_code.clone(),
                country: code.clone(),
                frequency,
                unit: decoded.unit.clone(),
                last_updated: decoded.last_updated,
                api_url: raw.api_url.clone(),
            },
            points,
        });
    }
    Ok(out)
}

struct DecodedCountry {
    points: Vec<DataPoint>,
    unit: Option<String>,
    frequency: Option<Frequency>,
    last_updated: Option<NaiveDate>,
}

fn malformed(raw: &RawPayload, what: &str) -> OikosError {
    OikosError::provider(raw.provider, format!("malformed payload: {what}"))
}

/// World Bank v2 JSON: `[page_meta, [row, ...]]` where each row carries
/// `countryiso3code`, `date` and a nullable `value`.
fn decode_worldbank(raw: &RawPayload) -> Result<HashMap<String, DecodedCountry>, OikosError> {
    let arr = raw
        .body
        .as_array()
        .filter(|a| a.len() >= 2)
        .ok_or_else(|| malformed(raw, "expected [meta, rows] array"))?;

    let last_updated = arr[0]
        .get("lastupdated")
        .and_then(Value::as_str)
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok());

    let rows = arr[1]
        .as_array()
        .ok_or_else(|| malformed(raw, "rows element is not an array"))?;

    let mut out: HashMap<String, DecodedCountry> = HashMap::new();
    for row in rows {
        let Some(code) = row
            .get("countryiso3code")
            .and_then(Value::as_str)
            .filter(|c| !c.is_empty())
            .or_else(|| row.pointer("/country/id").and_then(Value::as_str))
        else {
            continue;
        };
        let entry = out
            .entry(code.to_string())
            .or_insert_with(|| DecodedCountry {
                points: Vec::new(),
                unit: None,
                frequency: None,
                last_updated,
            });
        if entry.unit.is_none() {
            entry.unit = row
                .get("unit")
                .and_then(Value::as_str)
                .filter(|u| !u.is_empty())
                .map(ToString::to_string);
        }
        let Some(value) = row.get("value").and_then(Value::as_f64) else {
            continue; // null observation, skip
        };
        let Some(period) = row.get("date").and_then(Value::as_str) else {
            continue;
        };
        let Some((date, freq)) = parse_period(period) else {
            continue;
        };
        entry.frequency.get_or_insert(freq);
        entry.points.push(DataPoint { date, value });
    }
    Ok(out)
}

/// SDMX-JSON: `dataSets[0].series` keyed by colon-joined dimension indexes,
/// with dimension metadata under `structure.dimensions`. Used by Eurostat,
/// OECD and IMF alike, modulo dimension naming (`GEO` vs `REF_AREA`,
/// `UNIT` vs `MEASURE`).
fn decode_sdmx(
    raw: &RawPayload,
    req: &ResolvedRequest,
) -> Result<HashMap<String, DecodedCountry>, OikosError> {
    let series_map = raw
        .body
        .pointer("/dataSets/0/series")
        .and_then(Value::as_object)
        .ok_or_else(|| malformed(raw, "missing dataSets[0].series"))?;

    let series_dims = raw
        .body
        .pointer("/structure/dimensions/series")
        .and_then(Value::as_array)
        .ok_or_else(|| malformed(raw, "missing structure.dimensions.series"))?;

    let time_values: Vec<&str> = raw
        .body
        .pointer("/structure/dimensions/observation")
        .and_then(Value::as_array)
        .and_then(|dims| {
            dims.iter()
                .find(|d| dim_id(d) == Some("TIME_PERIOD"))
                .or_else(|| dims.first())
        })
        .and_then(|d| d.get("values"))
        .and_then(Value::as_array)
        .map(|vals| vals.iter().filter_map(|v| dim_id(v)).collect())
        .ok_or_else(|| malformed(raw, "missing TIME_PERIOD dimension"))?;

    let geo_pos = position_of(series_dims, &["GEO", "REF_AREA", "LOCATION", "COUNTRY"]);
    let unit_pos = position_of(series_dims, &["UNIT", "UNIT_MEASURE", "MEASURE"]);
    let family = UnitFamily::from_indicator(&req.indicator_code);

    // The stamp is RFC 3339; only the date prefix matters. `get` instead of
    // indexing, so a prefix that splits a multi-byte character just fails
    // to parse rather than panicking.
    let last_updated = raw
        .body
        .get("updated")
        .and_then(Value::as_str)
        .and_then(|s| s.get(..10).or((s.len() < 10).then_some(s)))
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok());

    // Candidate series per country; a payload may expose several unit
    // variants for the same geo and we must pick one deterministically.
    let mut candidates: HashMap<String, Vec<(String, Vec<DataPoint>, Option<Frequency>)>> =
        HashMap::new();

    for (key, series) in series_map {
        let indexes: Vec<usize> = key
            .split(':')
            .map(|p| p.parse().map_err(|_| malformed(raw, "bad series key")))
            .collect::<Result<_, _>>()?;

        let geo = geo_pos
            .and_then(|p| dim_value_id(series_dims, p, indexes.get(p).copied()?))
            .unwrap_or_default();
        let unit = unit_pos
            .and_then(|p| dim_value_id(series_dims, p, indexes.get(p).copied()?))
            .unwrap_or_default();

        let Some(observations) = series.get("observations").and_then(Value::as_object) else {
            continue;
        };

        let mut points = Vec::with_capacity(observations.len());
        let mut freq = None;
        for (obs_key, obs_val) in observations {
            let Ok(time_idx) = obs_key.parse::<usize>() else {
                continue;
            };
            let Some(period) = time_values.get(time_idx) else {
                continue;
            };
            let Some(value) = obs_val
                .as_array()
                .and_then(|a| a.first())
                .and_then(Value::as_f64)
                .or_else(|| obs_val.as_f64())
            else {
                continue;
            };
            if let Some((date, f)) = parse_period(period) {
                freq.get_or_insert(f);
                points.push(DataPoint { date, value });
            }
        }
        candidates
            .entry(geo)
            .or_default()
            .push((unit, points, freq));
    }

    let mut out = HashMap::new();
    for (geo, mut variants) in candidates {
        // Deterministic unit selection: preferred family first, then
        // lexicographic unit id as the tie-break.
        variants.sort_by(|(ua, _, _), (ub, _, _)| {
            let pa = family.prefers(ua);
            let pb = family.prefers(ub);
            pb.cmp(&pa).then_with(|| ua.cmp(ub))
        });
        let (unit, points, freq) = variants.remove(0);
        out.insert(
            geo,
            DecodedCountry {
                points,
                unit: (!unit.is_empty()).then_some(unit),
                frequency: freq,
                last_updated,
            },
        );
    }
    Ok(out)
}

fn dim_id(dim: &Value) -> Option<&str> {
    dim.get("id").and_then(Value::as_str)
}

fn position_of(series_dims: &[Value], names: &[&str]) -> Option<usize> {
    series_dims
        .iter()
        .position(|d| dim_id(d).is_some_and(|id| names.contains(&id)))
}

fn dim_value_id(series_dims: &[Value], dim_pos: usize, value_idx: usize) -> Option<String> {
    series_dims
        .get(dim_pos)?
        .get("values")?
        .as_array()?
        .get(value_idx)?
        .get("id")?
        .as_str()
        .map(ToString::to_string)
}
