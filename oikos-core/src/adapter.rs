use async_trait::async_trait;

use oikos_types::{OikosError, ProviderId, RawPayload, ResolvedRequest};

/// The single capability implemented once per upstream statistical API.
///
/// Adapters are thin transport wrappers: they build the provider URL, issue
/// the request, and map HTTP outcomes into the `OikosError` taxonomy with
/// the status preserved for retry classification. They never normalize,
/// cache, rate-limit or retry; those concerns live above the trait so every
/// provider gets them uniformly.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Which provider this adapter talks to.
    fn provider_id(&self) -> ProviderId;

    /// Human-readable adapter name for logs and error tagging.
    fn name(&self) -> &'static str;

    /// Perform one network fetch for an already-resolved request.
    ///
    /// # Errors
    /// - `RateLimited` for 429-class pushback,
    /// - `TransientNetwork` for timeouts and 5xx responses,
    /// - `Validation` for 4xx responses caused by the request itself,
    /// - `DataNotAvailable` when the provider answers with an empty body for
    ///   the whole batch.
    async fn fetch(&self, req: &ResolvedRequest) -> Result<RawPayload, OikosError>;
}
