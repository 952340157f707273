//! Expansion of named country groups into member ISO3 lists.

use oikos_core::Registry;

/// Expands group names such as "Eurozone" or "G7" into their member
/// countries, in the registry's canonical order with duplicates removed.
///
/// Expansion happens before routing and before per-provider code
/// resolution, so every downstream component sees plain country lists.
pub struct RegionExpander<'r> {
    registry: &'r Registry,
}

impl<'r> RegionExpander<'r> {
    /// Wrap a registry.
    #[must_use]
    pub const fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Expand `name` if it denotes a known group; `None` means the input is
    /// an ordinary country (or unknown) and should pass through untouched.
    /// Matching is case-insensitive and alias-aware ("euro area" and
    /// "Eurozone" expand identically).
    #[must_use]
    pub fn expand(&self, name: &str) -> Option<&'r [&'static str]> {
        self.registry.region(name)
    }

    /// True when `name` denotes a known group.
    #[must_use]
    pub fn is_region(&self, name: &str) -> bool {
        self.registry.region(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eurozone_expands_to_twenty_members() {
        let registry = Registry::with_defaults();
        let expander = RegionExpander::new(&registry);
        let members = expander.expand("Eurozone").unwrap();
        assert_eq!(members.len(), 20);
        assert!(members.contains(&"DEU"));
        assert!(members.contains(&"HRV"));
    }

    #[test]
    fn aliases_reach_the_same_group() {
        let registry = Registry::with_defaults();
        let expander = RegionExpander::new(&registry);
        assert_eq!(expander.expand("euro area"), expander.expand("EUROZONE"));
        assert_eq!(expander.expand("European Union"), expander.expand("EU"));
    }

    #[test]
    fn plain_countries_do_not_expand() {
        let registry = Registry::with_defaults();
        let expander = RegionExpander::new(&registry);
        assert!(expander.expand("Germany").is_none());
        assert!(!expander.is_region("France"));
    }

    #[test]
    fn every_registered_group_is_nonempty_unique_and_stable() {
        let registry = Registry::with_defaults();
        let expander = RegionExpander::new(&registry);
        let groups = [
            "Eurozone",
            "EU",
            "G7",
            "G20",
            "BRICS",
            "Nordics",
            "ASEAN",
            "developed economies",
            "Asian countries",
        ];
        for group in groups {
            let first = expander.expand(group).unwrap();
            assert!(!first.is_empty(), "{group} expanded to nothing");
            let mut seen = std::collections::HashSet::new();
            assert!(first.iter().all(|m| seen.insert(*m)), "{group} has duplicates");
            assert_eq!(expander.expand(group).unwrap(), first);
        }
    }

    #[test]
    fn g20_has_no_duplicate_members() {
        let registry = Registry::with_defaults();
        let expander = RegionExpander::new(&registry);
        let members = expander.expand("G20").unwrap();
        let mut seen = std::collections::HashSet::new();
        assert!(members.iter().all(|m| seen.insert(*m)));
    }
}
