use serde::{Deserialize, Serialize};

/// Identifier for an upstream statistical data provider.
///
/// The set is closed on purpose: the router rule table, the rate limiter and
/// the cache all key state by provider, and adding a provider is an explicit
/// act (new adapter crate + registry entries), not a stringly-typed event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProviderId {
    /// World Bank Indicators API (country-level, mostly annual).
    WorldBank,
    /// Eurostat dissemination API (EU members and euro-area aggregates).
    Eurostat,
    /// OECD data API.
    Oecd,
    /// IMF data services.
    Imf,
}

impl ProviderId {
    /// All known providers, in default fallback priority order.
    pub const ALL: &'static [Self] = &[Self::WorldBank, Self::Eurostat, Self::Oecd, Self::Imf];

    /// Stable lowercase key used in logs, cache keys and config files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WorldBank => "worldbank",
            Self::Eurostat => "eurostat",
            Self::Oecd => "oecd",
            Self::Imf => "imf",
        }
    }

    /// Recognize a provider mention in free-form text.
    ///
    /// Matching is case-insensitive and tolerates the common spellings the
    /// intent parser passes through ("world bank", "WorldBank", "ECB/Eurostat").
    #[must_use]
    pub fn from_mention(text: &str) -> Option<Self> {
        let t = text.trim().to_ascii_lowercase();
        match t.as_str() {
            "worldbank" | "world bank" | "wb" | "world_bank" => Some(Self::WorldBank),
            "eurostat" | "estat" => Some(Self::Eurostat),
            "oecd" => Some(Self::Oecd),
            "imf" | "international monetary fund" => Some(Self::Imf),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
