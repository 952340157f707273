//! Oikos resolves parsed economic-data queries and fetches them resiliently.
//!
//! Overview
//! - Expands region groups ("Eurozone", "G7") into member country lists.
//! - Routes each indicator to a statistical provider through an ordered,
//!   data-driven rule table (explicit mention, pinned indicators, EU
//!   default, upstream suggestion, fallback).
//! - Resolves country names and indicator phrases into each provider's own
//!   code dialect.
//! - Runs the resulting requests concurrently through a response cache, a
//!   sliding-window rate limiter, and a bounded exponential-backoff retry
//!   executor.
//! - Normalizes heterogeneous provider payloads into one series schema and
//!   reports partial failures next to the data instead of aborting batches.
//!
//! Building an orchestrator and running a query:
//! ```rust,ignore
//! use std::sync::Arc;
//! use oikos::Oikos;
//! use oikos_types::Intent;
//! use oikos_worldbank::WorldBankAdapter;
//!
//! let oikos = Oikos::builder()
//!     .with_adapter(Arc::new(WorldBankAdapter::new()?))
//!     .build()?;
//!
//! let intent = Intent::for_indicator("unemployment rate")
//!     .country("Germany")
//!     .build();
//! let outcome = oikos.query(&intent).await?;
//! for series in &outcome.series {
//!     println!("{}: {} points", series.metadata.country, series.points.len());
//! }
//! ```
#![warn(missing_docs)]

mod core;
/// Query execution pipeline.
mod pipeline;
/// Intent resolution components: regions, countries, indicators, routing.
pub mod resolve;

pub use crate::core::{Oikos, OikosBuilder};
pub use crate::pipeline::{FetchFailure, QueryOutcome};

pub use oikos_core::{ProviderAdapter, Registry, RegistryBuilder};
pub use oikos_types::{
    Intent, NormalizedSeries, OikosConfig, OikosError, ProviderId,
};
