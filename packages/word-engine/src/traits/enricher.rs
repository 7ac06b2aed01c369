//! Example enrichment.

use async_trait::async_trait;

use crate::error::{EnrichmentError, EnrichmentResult};
use crate::types::VocabularyEntry;

/// Best-effort producer of a usage example for an entry.
///
/// Failures are allowed and expected; the engine turns every error (and
/// every call that outlives its timeout) into an entry without an example.
#[async_trait]
pub trait ExampleEnricher: Send + Sync {
    /// Produce one example sentence in the target language for `entry`.
    async fn enrich(&self, entry: &VocabularyEntry) -> EnrichmentResult<String>;

    /// Short label for logs.
    fn name(&self) -> &str {
        "enricher"
    }
}

#[async_trait]
impl<E: ExampleEnricher + ?Sized> ExampleEnricher for std::sync::Arc<E> {
    async fn enrich(&self, entry: &VocabularyEntry) -> EnrichmentResult<String> {
        (**self).enrich(entry).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Enricher that never produces an example.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEnricher;

#[async_trait]
impl ExampleEnricher for NoopEnricher {
    async fn enrich(&self, _entry: &VocabularyEntry) -> EnrichmentResult<String> {
        Err(EnrichmentError::Unavailable("no enricher configured".into()))
    }

    fn name(&self) -> &str {
        "noop"
    }
}
