//! oikos-types
//!
//! Shared data transfer objects for the oikos economic-data pipeline.
//!
//! - `provider`: the closed set of upstream statistical providers.
//! - `intent`: the parsed query intent consumed by the pipeline.
//! - `request`: the fully resolved request and its cache fingerprint.
//! - `series`: the unified series schema and raw provider payloads.
//! - `config`: per-provider and global pipeline configuration.
//! - `error`: the unified `OikosError` taxonomy.
#![warn(missing_docs)]

/// Global and per-provider configuration structs.
pub mod config;
/// Unified error taxonomy consumed by the retry classifier.
pub mod error;
/// Parsed query intent, produced by the external intent parser.
pub mod intent;
/// Upstream provider identifiers.
pub mod provider;
/// Resolved requests and cache fingerprints.
pub mod request;
/// Normalized series schema and raw payload envelope.
pub mod series;

pub use config::{OikosConfig, ProviderConfig, RateLimitConfig, RetryConfig};
pub use error::OikosError;
pub use intent::Intent;
pub use provider::ProviderId;
pub use request::{Fingerprint, ResolvedRequest};
pub use series::{DataPoint, Frequency, NormalizedSeries, PayloadFormat, RawPayload, SeriesMetadata};
