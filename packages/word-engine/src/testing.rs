//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the word engine
//! without making real provider calls.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use crate::error::{EnrichmentError, EnrichmentResult, GenerationError, GenerationResult};
use crate::traits::{enricher::ExampleEnricher, source::GenerativeWordSource};
use crate::types::{GeneratedWord, Tier, VocabularyEntry};

/// A scripted generative source.
///
/// Scripted results are consumed in order; once the script is empty the
/// source produces a deterministic word named after the tier and call
/// number (`easy-word-1`, `easy-word-2`, ...).
#[derive(Default)]
pub struct MockWordSource {
    script: Arc<RwLock<VecDeque<GenerationResult<GeneratedWord>>>>,
    calls: Arc<RwLock<Vec<Tier>>>,
    counter: AtomicUsize,
    delay: Option<Duration>,
}

impl MockWordSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful result.
    pub fn with_word(self, word: GeneratedWord) -> Self {
        self.push(Ok(word));
        self
    }

    /// Queue a failure.
    pub fn with_failure(self, error: GenerationError) -> Self {
        self.push(Err(error));
        self
    }

    /// Sleep before answering each call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// A source whose every call fails with a provider error.
    pub fn failing() -> FailingWordSource {
        FailingWordSource
    }

    fn push(&self, result: GenerationResult<GeneratedWord>) {
        self.script
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(result);
    }

    /// Tiers requested so far, in call order.
    pub fn calls(&self) -> Vec<Tier> {
        self.calls.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

#[async_trait]
impl GenerativeWordSource for MockWordSource {
    async fn generate(&self, tier: &Tier) -> GenerationResult<GeneratedWord> {
        self.calls
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tier.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let scripted = self
            .script
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();

        match scripted {
            Some(result) => result,
            None => {
                let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
                Ok(GeneratedWord::new(
                    format!("{tier}-word-{n}"),
                    format!("{tier}-pron-{n}"),
                    format!("Generated meaning {n}"),
                ))
            }
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Generative source that always fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingWordSource;

#[async_trait]
impl GenerativeWordSource for FailingWordSource {
    async fn generate(&self, _tier: &Tier) -> GenerationResult<GeneratedWord> {
        Err(GenerationError::Provider("mock provider is down".into()))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// How a [`MockEnricher`] answers.
#[derive(Debug, Clone)]
enum EnricherBehavior {
    /// Same sentence for every entry
    Fixed(String),
    /// `"<term> example."`
    Echo,
    Failing,
}

/// A configurable example enricher.
pub struct MockEnricher {
    behavior: EnricherBehavior,
    delay: Option<Duration>,
    calls: Arc<RwLock<Vec<u64>>>,
}

impl MockEnricher {
    /// Return `sentence` for every entry.
    pub fn fixed(sentence: impl Into<String>) -> Self {
        Self::with_behavior(EnricherBehavior::Fixed(sentence.into()))
    }

    /// Return `"<term> example."` so results can be told apart.
    pub fn echo() -> Self {
        Self::with_behavior(EnricherBehavior::Echo)
    }

    /// Fail every call.
    pub fn failing() -> Self {
        Self::with_behavior(EnricherBehavior::Failing)
    }

    fn with_behavior(behavior: EnricherBehavior) -> Self {
        Self {
            behavior,
            delay: None,
            calls: Arc::default(),
        }
    }

    /// Sleep before answering each call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Ids of entries enriched so far, in call order.
    pub fn calls(&self) -> Vec<u64> {
        self.calls.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

#[async_trait]
impl ExampleEnricher for MockEnricher {
    async fn enrich(&self, entry: &VocabularyEntry) -> EnrichmentResult<String> {
        self.calls
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry.id);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.behavior {
            EnricherBehavior::Fixed(sentence) => Ok(sentence.clone()),
            EnricherBehavior::Echo => Ok(format!("{} example.", entry.term)),
            EnricherBehavior::Failing => {
                Err(EnrichmentError::Unavailable("mock enricher is down".into()))
            }
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_script_then_fallback() {
        let source = MockWordSource::new()
            .with_word(GeneratedWord::new("Kɔ", "kaw", "Go"))
            .with_failure(GenerationError::Timeout);

        assert_eq!(source.generate(&Tier::easy()).await.unwrap().word, "Kɔ");
        assert!(source.generate(&Tier::easy()).await.is_err());
        assert_eq!(source.generate(&Tier::easy()).await.unwrap().word, "easy-word-1");
        assert_eq!(source.call_count(), 3);
    }
}
