//! oikos-core
//!
//! Core traits and utilities shared across the oikos ecosystem.
//!
//! - `adapter`: the `ProviderAdapter` trait implemented once per upstream.
//! - `registry`: the immutable lookup registry (regions, country codes,
//!   indicator aliases and catalogs, per-provider configuration).
//! - `series`: period parsing, frequency inference and payload
//!   normalization into the unified series schema.
#![warn(missing_docs)]

/// The `ProviderAdapter` capability trait.
pub mod adapter;
/// Immutable lookup registry, built once at startup and injected.
pub mod registry;
/// Series utilities: periods, frequency inference, normalization.
pub mod series;

pub use adapter::ProviderAdapter;
pub use registry::{normalize_name, CodeAlphabet, CountryRecord, IndicatorEntry, Registry, RegistryBuilder};
pub use series::infer::infer_frequency;
pub use series::normalize::normalize;
pub use series::period::parse_period;
