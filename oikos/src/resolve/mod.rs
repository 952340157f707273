//! Deterministic resolution of a parsed intent into concrete requests.
//!
//! Each component is a pure function of the injected registry: no network,
//! no hidden globals, independently testable with fixture registries.

/// Free-form country name to provider code resolution.
pub mod country;
/// Indicator phrase to provider code resolution.
pub mod indicator;
/// Named country-group expansion.
pub mod region;
/// The ordered routing rule table.
pub mod router;

pub use country::CountryCodeResolver;
pub use indicator::IndicatorResolver;
pub use region::RegionExpander;
pub use router::{ProviderRouter, RouteContext, RoutingRule};
