//! Rate-limited wrapper for generative sources and enrichers.
//!
//! Wraps any source or enricher with a shared quota using the governor
//! crate, so a burst of `select_many` calls cannot trip provider limits.

use async_trait::async_trait;
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;

use crate::error::{EngineError, EnrichmentResult, GenerationResult, Result};
use crate::traits::{enricher::ExampleEnricher, source::GenerativeWordSource};
use crate::types::{GeneratedWord, Tier, VocabularyEntry};

type DefaultRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// A wrapper that waits for a permit before every call to the inner
/// source or enricher.
pub struct RateLimited<T> {
    inner: T,
    limiter: Arc<DefaultRateLimiter>,
}

impl<T> RateLimited<T> {
    /// Allow `requests_per_second` calls per second.
    pub fn per_second(inner: T, requests_per_second: u32) -> Result<Self> {
        Ok(Self::with_quota(inner, Quota::per_second(non_zero(requests_per_second)?)))
    }

    /// Allow `requests_per_minute` calls per minute.
    pub fn per_minute(inner: T, requests_per_minute: u32) -> Result<Self> {
        Ok(Self::with_quota(inner, Quota::per_minute(non_zero(requests_per_minute)?)))
    }

    /// Create with a custom quota.
    pub fn with_quota(inner: T, quota: Quota) -> Self {
        Self {
            inner,
            limiter: Arc::new(RateLimiter::direct(quota)),
        }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    async fn wait_for_permit(&self) {
        self.limiter.until_ready().await;
    }
}

fn non_zero(rate: u32) -> Result<NonZeroU32> {
    NonZeroU32::new(rate).ok_or_else(|| EngineError::Config("rate limit must be > 0".into()))
}

#[async_trait]
impl<T: GenerativeWordSource> GenerativeWordSource for RateLimited<T> {
    async fn generate(&self, tier: &Tier) -> GenerationResult<GeneratedWord> {
        self.wait_for_permit().await;
        self.inner.generate(tier).await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

#[async_trait]
impl<T: ExampleEnricher> ExampleEnricher for RateLimited<T> {
    async fn enrich(&self, entry: &VocabularyEntry) -> EnrichmentResult<String> {
        self.wait_for_permit().await;
        self.inner.enrich(entry).await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockEnricher, MockWordSource};
    use std::time::{Duration, Instant};

    #[test]
    fn test_zero_rate_is_config_error() {
        let result = RateLimited::per_minute(MockWordSource::new(), 0);
        assert!(matches!(result, Err(EngineError::Config(_))));
    }

    #[tokio::test]
    async fn test_passes_calls_through() {
        let limited = RateLimited::per_second(MockWordSource::new(), 100).unwrap();
        let word = limited.generate(&Tier::easy()).await.unwrap();

        assert!(!word.word.is_empty());
        assert_eq!(limited.inner().call_count(), 1);
        assert_eq!(limited.name(), "mock");
    }

    #[tokio::test]
    async fn test_second_call_waits_for_permit() {
        let quota = Quota::per_second(NonZeroU32::new(5).unwrap())
            .allow_burst(NonZeroU32::new(1).unwrap());
        let limited = RateLimited::with_quota(MockEnricher::fixed("Me kɔ."), quota);
        let lexicon = crate::types::LexiconEntry::new("Kɔ", "kaw", "Go", Tier::easy());
        let entry = VocabularyEntry::from_verified(1, &lexicon, chrono::Utc::now());

        let start = Instant::now();
        limited.enrich(&entry).await.unwrap();
        limited.enrich(&entry).await.unwrap();

        // 5 per second replenishes one permit every 200ms.
        assert!(start.elapsed() >= Duration::from_millis(150));
    }
}
