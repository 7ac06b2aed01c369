//! The word selection engine - main entry point of the library.
//!
//! Resolves requests against the verified lexicon first, falls back to
//! the generative source for tiers the lexicon declares but does not
//! populate, and attaches usage examples on a best-effort basis.

use chrono::Utc;
use futures::future::join_all;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{EngineError, Result};
use crate::lexicon::{TierCounts, VerifiedLexicon};
use crate::tracker::{SelectionTracker, TierState};
use crate::traits::{
    cache::WordCache,
    enricher::{ExampleEnricher, NoopEnricher},
    source::GenerativeWordSource,
};
use crate::types::{EngineConfig, LexiconEntry, Tier, VocabularyEntry};

/// Selects vocabulary entries without repetition.
///
/// # Example
///
/// ```rust,ignore
/// let engine = WordSelectionEngine::builder(VerifiedLexicon::twi())
///     .enricher(MockEnricher::echo())
///     .build();
///
/// let word = engine.select_one(&Tier::easy()).await?;
/// let batch = engine.select_many(10, &Tier::difficult(), 1).await?;
/// ```
pub struct WordSelectionEngine {
    lexicon: VerifiedLexicon,
    tracker: Mutex<SelectionTracker>,
    source: Option<Arc<dyn GenerativeWordSource>>,
    enricher: Arc<dyn ExampleEnricher>,
    cache: Option<Arc<dyn WordCache>>,
    config: EngineConfig,
    next_id: AtomicU64,
}

impl WordSelectionEngine {
    /// Engine over `lexicon` with no generative source, no enricher and
    /// no cache.
    pub fn new(lexicon: VerifiedLexicon) -> Self {
        Self::builder(lexicon).build()
    }

    pub fn builder(lexicon: VerifiedLexicon) -> EngineBuilder {
        EngineBuilder::new(lexicon)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn lexicon(&self) -> &VerifiedLexicon {
        &self.lexicon
    }

    pub fn has_generative_source(&self) -> bool {
        self.source.is_some()
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Select one entry, numbered from the engine's own counter.
    pub async fn select_one(&self, tier: &Tier) -> Result<VocabularyEntry> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.resolve_one(tier, id, &CancellationToken::new()).await
    }

    /// Select one entry with a caller-chosen id.
    pub async fn select_one_with_id(&self, tier: &Tier, id: u64) -> Result<VocabularyEntry> {
        self.next_id.fetch_max(id.saturating_add(1), Ordering::SeqCst);
        self.resolve_one(tier, id, &CancellationToken::new()).await
    }

    /// Select up to `count` entries with ids `start_id, start_id + 1, ...`.
    ///
    /// From the verified lexicon the batch is truncated to the tier size and
    /// never repeats a term. From the generative source, slots whose
    /// generation fails are left out and the ids stay consecutive.
    pub async fn select_many(
        &self,
        count: usize,
        tier: &Tier,
        start_id: u64,
    ) -> Result<Vec<VocabularyEntry>> {
        self.select_many_with_cancel(count, tier, start_id, CancellationToken::new())
            .await
    }

    /// [`select_many`](Self::select_many) with cancellation support.
    ///
    /// Once `cancel` fires no further generation or enrichment calls are
    /// made and the call returns [`EngineError::Cancelled`]. Indices already
    /// drawn stay marked as used.
    pub async fn select_many_with_cancel(
        &self,
        count: usize,
        tier: &Tier,
        start_id: u64,
        cancel: CancellationToken,
    ) -> Result<Vec<VocabularyEntry>> {
        if count == 0 {
            return Ok(Vec::new());
        }

        let tier = self.resolve_tier(tier);
        let verified = self.lexicon.entries_for_tier(&tier);

        let entries = if !verified.is_empty() {
            let picks = self.tracker().pick_distinct(&tier, verified.len(), count)?;
            let now = Utc::now();
            let mut drawn = Vec::with_capacity(picks.len());
            for (offset, index) in picks.into_iter().enumerate() {
                let id = entry_id(start_id, offset)?;
                drawn.push(VocabularyEntry::from_verified(id, self.entry_at(&tier, index)?, now));
            }

            debug!(tier = %tier, requested = count, drawn = drawn.len(), "Drew verified entries");
            drawn
        } else {
            self.generate_batch(count, &tier, start_id, &cancel).await?
        };

        let entries = self.enrich_batch(entries, &cancel).await?;
        self.next_id.fetch_max(
            start_id.saturating_add(entries.len() as u64),
            Ordering::SeqCst,
        );

        info!(
            tier = %tier,
            requested = count,
            returned = entries.len(),
            "Batch selection complete"
        );
        Ok(entries)
    }

    /// Cache-first lookup: return the cached entry for `id`, or select a
    /// new one under that id and cache it.
    pub async fn resolve_cached(&self, tier: &Tier, id: u64) -> Result<VocabularyEntry> {
        if let Some(cache) = &self.cache {
            if let Some(entry) = cache.get(id).await? {
                debug!(id, term = %entry.term, "Cache hit");
                return Ok(entry);
            }
        }

        let entry = self.select_one_with_id(tier, id).await?;
        self.remember(std::slice::from_ref(&entry)).await?;
        Ok(entry)
    }

    // =========================================================================
    // Cache
    // =========================================================================

    /// Write entries to the cache, if one is configured.
    pub async fn remember(&self, entries: &[VocabularyEntry]) -> Result<()> {
        match &self.cache {
            Some(cache) if !entries.is_empty() => cache.put_many(entries).await,
            _ => Ok(()),
        }
    }

    /// Read an entry from the cache. `None` without a cache.
    pub async fn cached(&self, id: u64) -> Result<Option<VocabularyEntry>> {
        match &self.cache {
            Some(cache) => cache.get(id).await,
            None => Ok(None),
        }
    }

    pub async fn clear_cache(&self) -> Result<()> {
        match &self.cache {
            Some(cache) => cache.clear().await,
            None => Ok(()),
        }
    }

    // =========================================================================
    // Lexicon pass-throughs
    // =========================================================================

    pub fn search(&self, query: &str) -> Vec<&LexiconEntry> {
        self.lexicon.search(query)
    }

    pub fn counts_by_tier(&self) -> TierCounts {
        self.lexicon.counts_by_tier()
    }

    /// Where `tier` is in its non-repetition cycle.
    pub fn tier_state(&self, tier: &Tier) -> TierState {
        let tier = self.resolve_tier(tier);
        let available = self.lexicon.entries_for_tier(&tier).len();
        self.tracker().state(&tier, available)
    }

    /// Start a fresh cycle for `tier`.
    pub fn reset_tier(&self, tier: &Tier) {
        let tier = self.resolve_tier(tier);
        self.tracker().reset(&tier);
    }

    /// Count verified entries shown in an earlier run as used in the
    /// current cycle. Generated entries and terms no longer in the lexicon
    /// are ignored. Returns how many entries were matched.
    pub fn mark_seen<'a>(&self, entries: impl IntoIterator<Item = &'a VocabularyEntry>) -> usize {
        let mut seen: HashMap<&Tier, Vec<usize>> = HashMap::new();
        for entry in entries.into_iter().filter(|e| e.is_verified()) {
            let position = self
                .lexicon
                .entries_for_tier(&entry.tier)
                .iter()
                .position(|known| known.term == entry.term);
            if let Some(index) = position {
                seen.entry(&entry.tier).or_default().push(index);
            }
        }

        let mut tracker = self.tracker();
        let mut matched = 0;
        for (tier, indices) in seen {
            matched += indices.len();
            let available = self.lexicon.entries_for_tier(tier).len();
            tracker.mark_used(tier, indices, available);
        }

        debug!(matched, "Marked previously seen entries");
        matched
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn resolve_tier(&self, tier: &Tier) -> Tier {
        let resolved = self.lexicon.resolve_tier(tier, &self.config.default_tier);
        if resolved != *tier {
            debug!(requested = %tier, resolved = %resolved, "Unknown tier, using default");
        }
        resolved
    }

    fn tracker(&self) -> MutexGuard<'_, SelectionTracker> {
        self.tracker.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn entry_at(&self, tier: &Tier, index: usize) -> Result<&LexiconEntry> {
        self.lexicon
            .entries_for_tier(tier)
            .get(index)
            .ok_or_else(|| EngineError::EmptyTier { tier: tier.clone() })
    }

    async fn resolve_one(
        &self,
        tier: &Tier,
        id: u64,
        cancel: &CancellationToken,
    ) -> Result<VocabularyEntry> {
        let tier = self.resolve_tier(tier);
        let available = self.lexicon.entries_for_tier(&tier).len();

        let entry = if available > 0 {
            let index = self.tracker().pick_index(&tier, available)?;
            VocabularyEntry::from_verified(id, self.entry_at(&tier, index)?, Utc::now())
        } else {
            let source = self.generative_source(&tier)?;
            let word = guarded(cancel, source.generate(&tier)).await??;
            debug!(tier = %tier, id, term = %word.word, source = source.name(), "Generated entry");
            VocabularyEntry::from_generated(id, tier, word, Utc::now())
        };

        self.enrich_one(entry, cancel).await
    }

    /// Only tiers the lexicon declares may be generated.
    fn generative_source(&self, tier: &Tier) -> Result<&Arc<dyn GenerativeWordSource>> {
        if !self.lexicon.contains_tier(tier) {
            return Err(EngineError::EmptyTier { tier: tier.clone() });
        }
        self.source
            .as_ref()
            .ok_or_else(|| EngineError::EmptyTier { tier: tier.clone() })
    }

    /// One `generate` call per slot, in order. Failed slots are dropped.
    async fn generate_batch(
        &self,
        count: usize,
        tier: &Tier,
        start_id: u64,
        cancel: &CancellationToken,
    ) -> Result<Vec<VocabularyEntry>> {
        let source = self.generative_source(tier)?;
        let mut entries = Vec::new();

        for slot in 0..count {
            match guarded(cancel, source.generate(tier)).await? {
                Ok(word) => {
                    let id = entry_id(start_id, entries.len())?;
                    entries.push(VocabularyEntry::from_generated(id, tier.clone(), word, Utc::now()));
                }
                Err(e) => {
                    warn!(
                        tier = %tier,
                        slot,
                        source = source.name(),
                        error = %e,
                        "Generation failed, slot omitted"
                    );
                }
            }
        }

        Ok(entries)
    }

    async fn enrich_batch(
        &self,
        entries: Vec<VocabularyEntry>,
        cancel: &CancellationToken,
    ) -> Result<Vec<VocabularyEntry>> {
        if self.config.parallel_enrichment {
            // join_all yields results in input order.
            let futures = entries.into_iter().map(|e| self.enrich_one(e, cancel));
            join_all(futures).await.into_iter().collect()
        } else {
            let mut enriched = Vec::with_capacity(entries.len());
            for entry in entries {
                enriched.push(self.enrich_one(entry, cancel).await?);
            }
            Ok(enriched)
        }
    }

    /// Attach an example when the entry lacks one. Every enricher failure
    /// degrades to "no example"; only cancellation is an error.
    async fn enrich_one(
        &self,
        mut entry: VocabularyEntry,
        cancel: &CancellationToken,
    ) -> Result<VocabularyEntry> {
        if !self.config.enrich_examples || !entry.needs_example() {
            return Ok(entry);
        }

        let timeout = self.config.enrichment_timeout();
        let outcome =
            guarded(cancel, tokio::time::timeout(timeout, self.enricher.enrich(&entry))).await?;

        let example = match outcome {
            Ok(Ok(sentence)) if !sentence.trim().is_empty() => Some(sentence.trim().to_string()),
            Ok(Ok(_)) => {
                warn!(id = entry.id, term = %entry.term, "Enricher returned a blank example");
                None
            }
            Ok(Err(e)) => {
                warn!(
                    id = entry.id,
                    term = %entry.term,
                    enricher = self.enricher.name(),
                    error = %e,
                    "Example enrichment failed"
                );
                None
            }
            Err(_) => {
                warn!(
                    id = entry.id,
                    term = %entry.term,
                    timeout_ms = self.config.enrichment_timeout_ms,
                    "Example enrichment timed out"
                );
                None
            }
        };

        entry.attach_example(example);
        Ok(entry)
    }
}

/// Id of the entry `offset` places after `start_id`.
fn entry_id(start_id: u64, offset: usize) -> Result<u64> {
    u64::try_from(offset)
        .ok()
        .and_then(|offset| start_id.checked_add(offset))
        .ok_or_else(|| EngineError::Config(format!("entry ids overflow past start id {start_id}")))
}

/// Run `future` unless `cancel` fires first.
async fn guarded<F: Future>(cancel: &CancellationToken, future: F) -> Result<F::Output> {
    if cancel.is_cancelled() {
        return Err(EngineError::Cancelled);
    }
    tokio::select! {
        output = future => Ok(output),
        _ = cancel.cancelled() => Err(EngineError::Cancelled),
    }
}

/// Builder for [`WordSelectionEngine`].
pub struct EngineBuilder {
    lexicon: VerifiedLexicon,
    tracker: SelectionTracker,
    source: Option<Arc<dyn GenerativeWordSource>>,
    enricher: Arc<dyn ExampleEnricher>,
    cache: Option<Arc<dyn WordCache>>,
    config: EngineConfig,
}

impl EngineBuilder {
    pub fn new(lexicon: VerifiedLexicon) -> Self {
        Self {
            lexicon,
            tracker: SelectionTracker::new(),
            source: None,
            enricher: Arc::new(NoopEnricher),
            cache: None,
            config: EngineConfig::default(),
        }
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Fallback for tiers the lexicon declares without entries.
    pub fn generative_source(mut self, source: impl GenerativeWordSource + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    pub fn enricher(mut self, enricher: impl ExampleEnricher + 'static) -> Self {
        self.enricher = Arc::new(enricher);
        self
    }

    pub fn cache(mut self, cache: impl WordCache + 'static) -> Self {
        self.cache = Some(Arc::new(cache));
        self
    }

    /// Same as [`cache`](Self::cache) for a cache shared with other owners.
    pub fn shared_cache(mut self, cache: Arc<dyn WordCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Deterministic selection order.
    pub fn seed(mut self, seed: u64) -> Self {
        self.tracker = SelectionTracker::with_seed(seed);
        self
    }

    pub fn build(self) -> WordSelectionEngine {
        let next_id = AtomicU64::new(self.config.first_id);
        WordSelectionEngine {
            lexicon: self.lexicon,
            tracker: Mutex::new(self.tracker),
            source: self.source,
            enricher: self.enricher,
            cache: self.cache,
            config: self.config,
            next_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockEnricher, MockWordSource};
    use crate::types::GeneratedWord;
    use std::collections::HashSet;
    use std::time::Duration;

    fn engine() -> WordSelectionEngine {
        WordSelectionEngine::builder(VerifiedLexicon::twi()).seed(42).build()
    }

    #[tokio::test]
    async fn test_select_one_counts_ids_from_config() {
        let engine = WordSelectionEngine::builder(VerifiedLexicon::twi())
            .config(EngineConfig::new().with_first_id(100))
            .build();

        assert_eq!(engine.select_one(&Tier::easy()).await.unwrap().id, 100);
        assert_eq!(engine.select_one(&Tier::easy()).await.unwrap().id, 101);
        assert_eq!(engine.select_one_with_id(&Tier::easy(), 500).await.unwrap().id, 500);
        assert_eq!(engine.select_one(&Tier::easy()).await.unwrap().id, 501);
    }

    #[tokio::test]
    async fn test_unknown_tier_uses_default() {
        let engine = engine();
        let entry = engine.select_one(&Tier::new("expert")).await.unwrap();
        assert_eq!(entry.tier, Tier::intermediate());
        assert!(entry.is_verified());
    }

    #[tokio::test]
    async fn test_empty_tier_without_source() {
        let lexicon = VerifiedLexicon::builder().empty_tier("sentence").build();
        let engine = WordSelectionEngine::builder(lexicon)
            .config(EngineConfig::new().with_default_tier("sentence"))
            .build();

        let err = engine.select_one(&Tier::new("sentence")).await.unwrap_err();
        assert!(matches!(err, EngineError::EmptyTier { tier } if tier.as_str() == "sentence"));

        let err = engine.select_many(3, &Tier::new("sentence"), 1).await.unwrap_err();
        assert!(matches!(err, EngineError::EmptyTier { .. }));
    }

    #[tokio::test]
    async fn test_generation_failure_surfaces_from_select_one() {
        let lexicon = VerifiedLexicon::builder().empty_tier("sentence").build();
        let engine = WordSelectionEngine::builder(lexicon)
            .generative_source(MockWordSource::failing())
            .build();

        let err = engine.select_one(&Tier::new("sentence")).await.unwrap_err();
        assert!(matches!(err, EngineError::Generation(_)));
    }

    #[tokio::test]
    async fn test_select_many_zero_is_empty() {
        assert!(engine().select_many(0, &Tier::easy(), 1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_verified_batch_is_distinct() {
        let engine = engine();
        let batch = engine.select_many(10, &Tier::difficult(), 5).await.unwrap();

        let terms: HashSet<_> = batch.iter().map(|e| e.term.as_str()).collect();
        let ids: Vec<_> = batch.iter().map(|e| e.id).collect();
        assert_eq!(terms.len(), 10);
        assert_eq!(ids, (5..15).collect::<Vec<_>>());
        assert_eq!(engine.tier_state(&Tier::difficult()), TierState::Partial);
    }

    #[tokio::test]
    async fn test_generated_example_is_kept() {
        let lexicon = VerifiedLexicon::builder().empty_tier("sentence").build();
        let source = MockWordSource::new().with_word(
            GeneratedWord::new("Me kɔ fie", "meh kaw fee-eh", "I am going home")
                .with_example("Me kɔ fie seesei.", "I am going home now."),
        );
        let enricher = Arc::new(MockEnricher::fixed("Unused."));
        let engine = WordSelectionEngine::builder(lexicon)
            .generative_source(source)
            .enricher(enricher.clone())
            .build();

        let entry = engine.select_one(&Tier::new("sentence")).await.unwrap();
        assert_eq!(entry.example.as_deref(), Some("Me kɔ fie seesei."));
        assert_eq!(enricher.call_count(), 0);
    }

    #[tokio::test]
    async fn test_blank_enrichment_leaves_no_example() {
        let engine = WordSelectionEngine::builder(VerifiedLexicon::twi())
            .enricher(MockEnricher::fixed("   "))
            .build();

        let entry = engine.select_one(&Tier::easy()).await.unwrap();
        assert_eq!(entry.example, None);
    }

    #[tokio::test]
    async fn test_enrichment_disabled() {
        let enricher = Arc::new(MockEnricher::echo());
        let engine = WordSelectionEngine::builder(VerifiedLexicon::twi())
            .enricher(enricher.clone())
            .config(EngineConfig::new().with_enrichment(false))
            .build();

        let entry = engine.select_one(&Tier::easy()).await.unwrap();
        assert_eq!(entry.example, None);
        assert_eq!(enricher.call_count(), 0);
    }

    #[tokio::test]
    async fn test_reset_tier() {
        let engine = engine();
        engine.select_many(3, &Tier::easy(), 1).await.unwrap();
        assert_eq!(engine.tier_state(&Tier::easy()), TierState::Partial);

        engine.reset_tier(&Tier::easy());
        assert_eq!(engine.tier_state(&Tier::easy()), TierState::Fresh);
    }

    #[tokio::test]
    async fn test_undeclared_default_tier_is_not_generated() {
        let source = Arc::new(MockWordSource::new());
        let engine = WordSelectionEngine::builder(VerifiedLexicon::twi())
            .config(EngineConfig::new().with_default_tier("expert"))
            .generative_source(source.clone())
            .build();

        let err = engine.select_one(&Tier::new("zzz")).await.unwrap_err();
        assert!(matches!(err, EngineError::EmptyTier { tier } if tier.as_str() == "expert"));

        let err = engine.select_many(2, &Tier::new("zzz"), 1).await.unwrap_err();
        assert!(matches!(err, EngineError::EmptyTier { .. }));
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn test_huge_generative_batch_runs_until_cancelled() {
        let lexicon = VerifiedLexicon::builder().empty_tier("sentence").build();
        let engine = WordSelectionEngine::builder(lexicon)
            .generative_source(MockWordSource::new().with_delay(Duration::from_millis(5)))
            .build();

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(40)).await;
            trigger.cancel();
        });

        let err = engine
            .select_many_with_cancel(usize::MAX, &Tier::new("sentence"), 1, cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Cancelled));
    }

    #[tokio::test]
    async fn test_ids_past_u64_max_are_rejected() {
        let engine = engine();

        let last = engine.select_many(1, &Tier::easy(), u64::MAX).await.unwrap();
        assert_eq!(last[0].id, u64::MAX);

        let err = engine.select_many(2, &Tier::easy(), u64::MAX).await.unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));

        let lexicon = VerifiedLexicon::builder().empty_tier("sentence").build();
        let engine = WordSelectionEngine::builder(lexicon)
            .generative_source(MockWordSource::new())
            .build();
        let err = engine
            .select_many(2, &Tier::new("sentence"), u64::MAX)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[tokio::test]
    async fn test_mark_seen_skips_earlier_words() {
        let earlier = engine();
        let shown = earlier.select_many(10, &Tier::easy(), 1).await.unwrap();
        let total = VerifiedLexicon::twi().entries_for_tier(&Tier::easy()).len();

        let engine = WordSelectionEngine::builder(VerifiedLexicon::twi()).seed(7).build();
        assert_eq!(engine.mark_seen(&shown), 10);

        let seen: HashSet<_> = shown.iter().map(|e| e.term.clone()).collect();
        let fresh = engine.select_many(total - 10, &Tier::easy(), 11).await.unwrap();
        assert!(fresh.iter().all(|e| !seen.contains(&e.term)));
    }

    #[tokio::test]
    async fn test_mark_seen_ignores_generated_entries() {
        let generated = VocabularyEntry::from_generated(
            1,
            Tier::easy(),
            GeneratedWord::new("Akwaaba", "ah-kwah-bah", "Welcome"),
            Utc::now(),
        );
        let engine = engine();
        assert_eq!(engine.mark_seen([&generated]), 0);
        assert_eq!(engine.tier_state(&Tier::easy()), TierState::Fresh);
    }

    #[tokio::test]
    async fn test_cache_helpers_without_cache() {
        let engine = engine();
        let entry = engine.resolve_cached(&Tier::easy(), 9).await.unwrap();

        assert_eq!(entry.id, 9);
        assert_eq!(engine.cached(9).await.unwrap(), None);
        engine.clear_cache().await.unwrap();
    }
}
