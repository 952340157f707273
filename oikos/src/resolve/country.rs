//! Country name to provider-specific code resolution.

use oikos_core::registry::{normalize_name, CodeAlphabet};
use oikos_core::Registry;
use oikos_types::{OikosError, ProviderId};

/// Resolves free-form country references ("Germany", "USA", "Korea") into
/// the code alphabet the target provider speaks.
///
/// Lookup order is fixed: a per-provider override wins over the shared name
/// table, which wins over passing through an input that already is a
/// plausible code for the provider's alphabet. Provider-specific spellings
/// (Greece is `EL` on Eurostat, `GRC` on the World Bank) are applied last,
/// so overrides and table hits both come out in the provider's dialect.
pub struct CountryCodeResolver<'r> {
    registry: &'r Registry,
}

impl<'r> CountryCodeResolver<'r> {
    /// Wrap a registry.
    #[must_use]
    pub const fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Resolve one country reference for one provider.
    ///
    /// # Errors
    /// `UnknownCountry` when the input matches nothing; the error carries a
    /// few valid codes for the provider so callers can show what shape was
    /// expected.
    pub fn resolve(&self, input: &str, provider: ProviderId) -> Result<String, OikosError> {
        let normalized = normalize_name(input);
        if let Some(code) = self.registry.country_override(provider, &normalized) {
            return Ok(code.to_string());
        }
        if let Some(record) = self.registry.find_country(input) {
            let code = match self.registry.alphabet(provider) {
                CodeAlphabet::Iso2 => record.iso2,
                CodeAlphabet::Iso3 => record.iso3,
            };
            return Ok(self.registry.fixup_code(provider, code).to_string());
        }
        let upper = input.trim().to_ascii_uppercase();
        if self.is_plausible_code(&upper, provider) {
            return Ok(self.registry.fixup_code(provider, &upper).to_string());
        }
        Err(OikosError::UnknownCountry {
            input: input.to_string(),
            sample_valid_codes: self.registry.sample_codes(provider),
        })
    }

    /// Resolve a whole list, preserving order and dropping duplicates after
    /// provider fixups (a query naming both "Greece" and "GR" yields one
    /// Eurostat `EL`).
    ///
    /// # Errors
    /// The first `UnknownCountry` encountered.
    pub fn resolve_all(
        &self,
        inputs: &[String],
        provider: ProviderId,
    ) -> Result<Vec<String>, OikosError> {
        let mut codes = Vec::with_capacity(inputs.len());
        for input in inputs {
            let code = self.resolve(input, provider)?;
            if !codes.contains(&code) {
                codes.push(code);
            }
        }
        Ok(codes)
    }

    fn is_plausible_code(&self, upper: &str, provider: ProviderId) -> bool {
        let expected = match self.registry.alphabet(provider) {
            CodeAlphabet::Iso2 => 2,
            CodeAlphabet::Iso3 => 3,
        };
        upper.len() == expected && upper.bytes().all(|b| b.is_ascii_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver(registry: &Registry) -> CountryCodeResolver<'_> {
        CountryCodeResolver::new(registry)
    }

    #[test]
    fn names_resolve_per_provider_alphabet() {
        let registry = Registry::with_defaults();
        let r = resolver(&registry);
        assert_eq!(r.resolve("Germany", ProviderId::WorldBank).unwrap(), "DEU");
        assert_eq!(r.resolve("Germany", ProviderId::Eurostat).unwrap(), "DE");
        assert_eq!(r.resolve("Germany", ProviderId::Imf).unwrap(), "DE");
        assert_eq!(r.resolve("Germany", ProviderId::Oecd).unwrap(), "DEU");
    }

    #[test]
    fn eurostat_dialect_fixups_apply() {
        let registry = Registry::with_defaults();
        let r = resolver(&registry);
        assert_eq!(r.resolve("Greece", ProviderId::Eurostat).unwrap(), "EL");
        assert_eq!(r.resolve("Greece", ProviderId::WorldBank).unwrap(), "GRC");
        assert_eq!(
            r.resolve("United Kingdom", ProviderId::Eurostat).unwrap(),
            "UK"
        );
    }

    #[test]
    fn aliases_and_codes_are_accepted() {
        let registry = Registry::with_defaults();
        let r = resolver(&registry);
        assert_eq!(r.resolve("USA", ProviderId::WorldBank).unwrap(), "USA");
        assert_eq!(r.resolve("Holland", ProviderId::WorldBank).unwrap(), "NLD");
        assert_eq!(r.resolve("de", ProviderId::WorldBank).unwrap(), "DEU");
        assert_eq!(r.resolve("DEU", ProviderId::Eurostat).unwrap(), "DE");
    }

    #[test]
    fn plausible_unknown_codes_pass_through() {
        let registry = Registry::with_defaults();
        let r = resolver(&registry);
        // World Bank aggregates are not in the name table but are valid ISO3-shaped codes.
        assert_eq!(r.resolve("EUU", ProviderId::WorldBank).unwrap(), "EUU");
        assert_eq!(r.resolve("gr", ProviderId::Eurostat).unwrap(), "EL");
    }

    #[test]
    fn unknown_names_error_with_sample_codes() {
        let registry = Registry::with_defaults();
        let r = resolver(&registry);
        let err = r.resolve("Atlantis", ProviderId::WorldBank).unwrap_err();
        match err {
            OikosError::UnknownCountry {
                input,
                sample_valid_codes,
            } => {
                assert_eq!(input, "Atlantis");
                assert!(!sample_valid_codes.is_empty());
                assert!(sample_valid_codes.iter().all(|c| c.len() == 3));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn resolve_all_dedups_after_fixups() {
        let registry = Registry::with_defaults();
        let r = resolver(&registry);
        let inputs = vec![
            "Greece".to_string(),
            "GR".to_string(),
            "Germany".to_string(),
        ];
        let codes = r.resolve_all(&inputs, ProviderId::Eurostat).unwrap();
        assert_eq!(codes, vec!["EL".to_string(), "DE".to_string()]);
    }
}
