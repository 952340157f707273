//! Series utilities: period parsing, frequency inference, and payload
//! normalization into the unified schema.

/// Frequency inference from observation spacing.
pub mod infer;
/// Raw payload to `NormalizedSeries` conversion.
pub mod normalize;
/// Period-string parsing ("2020", "2020-Q3", "2020-05").
pub mod period;
