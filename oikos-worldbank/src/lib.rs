//! World Bank Indicators API adapter for oikos.
//!
//! Talks to the v2 JSON endpoint
//! (`/v2/country/{codes}/indicator/{code}?format=json`), batching all
//! requested countries into one semicolon-joined call. The base URL is
//! overridable for tests and mirrors.
#![warn(missing_docs)]

mod adapter;

pub use adapter::{WorldBankAdapter, WorldBankAdapterBuilder, DEFAULT_BASE_URL};
