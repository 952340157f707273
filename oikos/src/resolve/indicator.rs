//! Indicator phrase to provider dataset code resolution.

use oikos_core::registry::normalize_name;
use oikos_core::{IndicatorEntry, Registry};
use oikos_types::{OikosError, ProviderId};

/// Minimum fraction of phrase tokens that must match a catalog entry for a
/// keyword hit to be trusted.
const CONFIDENCE_THRESHOLD: f64 = 0.5;

/// Number of near-miss candidates surfaced in resolution errors.
const CANDIDATE_LIMIT: usize = 3;

/// Resolves a natural-language indicator phrase ("unemployment rate") into
/// the dataset code the routed provider uses (`SL.UEM.TOTL.ZS`, `une_rt_m`,
/// `HUR`, `LUR`).
///
/// Exact alias hits win outright; otherwise the provider's catalog is
/// scanned with token-overlap scoring and the best entry above
/// [`CONFIDENCE_THRESHOLD`] is taken. Ties go to the earlier catalog entry,
/// keeping resolution deterministic across runs.
pub struct IndicatorResolver<'r> {
    registry: &'r Registry,
}

impl<'r> IndicatorResolver<'r> {
    /// Wrap a registry.
    #[must_use]
    pub const fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Resolve one phrase for one provider.
    ///
    /// # Errors
    /// `Validation` for an empty phrase; `IndicatorNotResolved` with up to
    /// three near-miss catalog entries when nothing scores above threshold.
    pub fn resolve(&self, phrase: &str, provider: ProviderId) -> Result<String, OikosError> {
        let normalized = normalize_name(phrase);
        if normalized.is_empty() {
            return Err(OikosError::validation("empty indicator phrase"));
        }
        if let Some(code) = self.registry.indicator_alias(provider, &normalized) {
            return Ok(code.to_string());
        }
        let tokens: Vec<&str> = normalized.split(' ').collect();
        let catalog = self.registry.catalog(provider);
        let mut best: Option<(f64, &IndicatorEntry)> = None;
        for entry in catalog {
            let score = score_entry(&tokens, entry);
            if best.is_none_or(|(s, _)| score > s) {
                best = Some((score, entry));
            }
        }
        match best {
            Some((score, entry)) if score >= CONFIDENCE_THRESHOLD => Ok(entry.code.to_string()),
            _ => Err(OikosError::IndicatorNotResolved {
                phrase: phrase.to_string(),
                provider,
                candidates: self.candidates(&tokens, catalog),
            }),
        }
    }

    fn candidates(&self, tokens: &[&str], catalog: &[IndicatorEntry]) -> Vec<String> {
        let mut scored: Vec<(f64, &IndicatorEntry)> = catalog
            .iter()
            .map(|e| (score_entry(tokens, e), e))
            .filter(|(s, _)| *s > 0.0)
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored
            .into_iter()
            .take(CANDIDATE_LIMIT)
            .map(|(_, e)| e.name.to_string())
            .collect()
    }
}

/// Fraction of phrase tokens matched by the entry's keywords or name.
fn score_entry(tokens: &[&str], entry: &IndicatorEntry) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }
    let name_norm = normalize_name(entry.name);
    let matched = tokens
        .iter()
        .filter(|t| {
            entry.keywords.iter().any(|k| k == *t)
                || name_norm.split(' ').any(|w| w == **t)
        })
        .count();
    matched as f64 / tokens.len() as f64
}
