use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::provider::ProviderId;

/// Parsed query intent, produced by the external language-model parser.
///
/// Immutable input to the pipeline. Fields may be missing; the pipeline
/// applies documented defaults (see `OikosConfig::lookback_years` for the
/// date range) and fails validation only when no indicator or no country at
/// all can be derived.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    /// Provider named explicitly in the original phrasing ("... from OECD").
    /// Always wins over `suggested_provider`.
    pub explicit_provider: Option<ProviderId>,
    /// Provider suggested by the upstream parser; overridable by routing rules.
    pub suggested_provider: Option<ProviderId>,
    /// Free-form indicator phrases ("unemployment rate", "GDP").
    pub indicators: Vec<String>,
    /// Single country or region group name ("Germany", "Eurozone").
    pub country: Option<String>,
    /// Alternative to `country`: an explicit list of country names.
    pub countries: Vec<String>,
    /// Inclusive start of the requested range.
    pub start_date: Option<NaiveDate>,
    /// Inclusive end of the requested range.
    pub end_date: Option<NaiveDate>,
}

impl Intent {
    /// Start building an intent for a single indicator phrase.
    #[must_use]
    pub fn for_indicator(phrase: impl Into<String>) -> IntentBuilder {
        IntentBuilder {
            intent: Self {
                indicators: vec![phrase.into()],
                ..Self::default()
            },
        }
    }

    /// All country/region names carried by this intent, `country` first.
    #[must_use]
    pub fn country_names(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::with_capacity(1 + self.countries.len());
        if let Some(c) = &self.country {
            out.push(c.as_str());
        }
        out.extend(self.countries.iter().map(String::as_str));
        out
    }
}

/// Fluent builder used by tests and callers that assemble intents in code.
#[derive(Debug, Clone)]
pub struct IntentBuilder {
    intent: Intent,
}

impl IntentBuilder {
    /// Add another indicator phrase.
    #[must_use]
    pub fn indicator(mut self, phrase: impl Into<String>) -> Self {
        self.intent.indicators.push(phrase.into());
        self
    }

    /// Set the single country or region group name.
    #[must_use]
    pub fn country(mut self, name: impl Into<String>) -> Self {
        self.intent.country = Some(name.into());
        self
    }

    /// Append to the explicit country list.
    #[must_use]
    pub fn countries<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.intent.countries.extend(names.into_iter().map(Into::into));
        self
    }

    /// Record an explicit provider mention from the phrasing.
    #[must_use]
    pub const fn explicit_provider(mut self, p: ProviderId) -> Self {
        self.intent.explicit_provider = Some(p);
        self
    }

    /// Record the upstream parser's provider suggestion.
    #[must_use]
    pub const fn suggested_provider(mut self, p: ProviderId) -> Self {
        self.intent.suggested_provider = Some(p);
        self
    }

    /// Set the inclusive date range.
    #[must_use]
    pub const fn range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.intent.start_date = Some(start);
        self.intent.end_date = Some(end);
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> Intent {
        self.intent
    }
}
