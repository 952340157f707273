//! oikos-middleware
//!
//! Admission control, bounded retry, and response caching for the oikos
//! fetch pipeline. All three are provider-agnostic: they key their state by
//! `ProviderId` and know nothing about payload shapes.
#![warn(missing_docs)]

/// Fingerprinted, TTL-bounded response cache.
pub mod cache;
/// Per-provider sliding-window admission control.
pub mod rate_limit;
/// Bounded exponential-backoff retry.
pub mod retry;

pub use cache::ResponseCache;
pub use rate_limit::RateLimiter;
pub use retry::RetryExecutor;
