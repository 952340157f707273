//! Provider routing: an ordered rule table evaluated top to bottom.

use oikos_core::Registry;
use oikos_types::ProviderId;

/// Everything a routing decision may consult, gathered up front so rules
/// stay pure functions of `(context, registry)`.
#[derive(Debug, Clone, Default)]
pub struct RouteContext {
    /// Provider the user named outright ("from the OECD").
    pub explicit: Option<ProviderId>,
    /// Non-binding preference from the upstream intent parser.
    pub suggested: Option<ProviderId>,
    /// Normalized indicator phrase, for pinned-indicator matching.
    pub indicator: String,
    /// ISO3 codes of every country in the query, regions already expanded.
    pub iso3_codes: Vec<String>,
}

/// One row of the routing table. Precedence is the `Vec` order, so adding a
/// rule or reordering precedence is a data change, not a logic change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingRule {
    /// An explicitly named provider always wins.
    ExplicitMention,
    /// Indicators published by exactly one source route there.
    PinnedIndicator,
    /// Queries covering only EU member states default to Eurostat.
    EuMembersDefault,
    /// Honor the intent parser's suggestion.
    UpstreamSuggestion,
    /// The registry's configured fallback.
    Fallback,
}

/// Default rule order.
pub const DEFAULT_RULES: &[RoutingRule] = &[
    RoutingRule::ExplicitMention,
    RoutingRule::PinnedIndicator,
    RoutingRule::EuMembersDefault,
    RoutingRule::UpstreamSuggestion,
    RoutingRule::Fallback,
];

/// Picks the provider for a resolved query by walking the rule table and
/// taking the first rule that yields a provider.
pub struct ProviderRouter<'r> {
    registry: &'r Registry,
    rules: Vec<RoutingRule>,
}

impl<'r> ProviderRouter<'r> {
    /// Router with the default rule order.
    #[must_use]
    pub fn new(registry: &'r Registry) -> Self {
        Self::with_rules(registry, DEFAULT_RULES.to_vec())
    }

    /// Router with a custom rule order, used by tests and callers that want
    /// to disable or reorder individual rules.
    #[must_use]
    pub const fn with_rules(registry: &'r Registry, rules: Vec<RoutingRule>) -> Self {
        Self { registry, rules }
    }

    /// Route a query. Total: the registry fallback applies when no rule
    /// fires, even if `Fallback` was removed from the table.
    #[must_use]
    pub fn route(&self, ctx: &RouteContext) -> ProviderId {
        for rule in &self.rules {
            if let Some(provider) = self.apply(*rule, ctx) {
                tracing::debug!(?rule, %provider, "routing rule matched");
                return provider;
            }
        }
        self.registry.fallback_provider()
    }

    fn apply(&self, rule: RoutingRule, ctx: &RouteContext) -> Option<ProviderId> {
        match rule {
            RoutingRule::ExplicitMention => ctx.explicit,
            RoutingRule::PinnedIndicator => self.registry.pinned_provider(&ctx.indicator),
            RoutingRule::EuMembersDefault => {
                let all_eu = !ctx.iso3_codes.is_empty()
                    && ctx.iso3_codes.iter().all(|c| self.registry.is_eu_member(c));
                all_eu.then_some(ProviderId::Eurostat)
            }
            RoutingRule::UpstreamSuggestion => ctx.suggested,
            RoutingRule::Fallback => Some(self.registry.fallback_provider()),
        }
    }
}
