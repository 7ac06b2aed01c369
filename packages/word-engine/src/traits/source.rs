//! Generative word source.

use async_trait::async_trait;

use crate::error::GenerationResult;
use crate::types::{GeneratedWord, Tier};

/// Produces one plausible vocabulary word for a tier.
///
/// Implementations wrap a specific text generation backend. Any failure
/// (network, quota, missing credentials, unparseable output) is reported
/// as a [`GenerationError`](crate::error::GenerationError); retry policy
/// belongs to the caller of the engine, not to the source.
#[async_trait]
pub trait GenerativeWordSource: Send + Sync {
    /// Generate a single word for `tier`.
    async fn generate(&self, tier: &Tier) -> GenerationResult<GeneratedWord>;

    /// Short label for logs.
    fn name(&self) -> &str {
        "generative"
    }
}

#[async_trait]
impl<S: GenerativeWordSource + ?Sized> GenerativeWordSource for std::sync::Arc<S> {
    async fn generate(&self, tier: &Tier) -> GenerationResult<GeneratedWord> {
        (**self).generate(tier).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
