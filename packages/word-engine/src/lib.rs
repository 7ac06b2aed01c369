//! Vocabulary Word Selection & Caching Engine
//!
//! Hands out Twi (Akan) vocabulary entries for language learners: curated
//! words first, without repeats until a tier is exhausted, with a
//! generative fallback for tiers the curated lexicon does not cover and
//! best-effort usage examples.
//!
//! # Design
//!
//! - Verified entries are trusted; generated ones are marked as such
//! - Enrichment never fails a request, it only leaves the example empty
//! - Providers and storage sit behind traits, chosen at composition time
//! - Engine methods take `&self` and are safe to share across tasks
//!
//! # Usage
//!
//! ```rust,ignore
//! use word_engine::{MemoryWordCache, Tier, VerifiedLexicon, WordSelectionEngine};
//! use word_engine::testing::MockEnricher;
//!
//! let engine = WordSelectionEngine::builder(VerifiedLexicon::twi())
//!     .enricher(MockEnricher::echo())
//!     .cache(MemoryWordCache::new())
//!     .build();
//!
//! let word = engine.select_one(&Tier::easy()).await?;
//! let batch = engine.select_many(10, &Tier::intermediate(), 1).await?;
//! let hits = engine.search("love");
//! ```
//!
//! # Modules
//!
//! - [`lexicon`] - Curated, tier-partitioned vocabulary
//! - [`tracker`] - Per-tier non-repetition cycles
//! - [`engine`] - Selection, generation fallback and enrichment
//! - [`traits`] - Generative source, enricher and cache abstractions
//! - [`sources`] - LLM-backed source/enricher and rate limiting
//! - [`stores`] - Cache backends (memory, JSON file, SQLite)
//! - [`practice`] - Quizzes, badges and streaks
//! - [`testing`] - Mock implementations for testing

pub mod engine;
pub mod error;
pub mod lexicon;
pub mod practice;
pub mod sources;
pub mod stores;
pub mod testing;
pub mod tracker;
pub mod traits;
pub mod types;
pub mod word_store;

// Re-export core types at crate root
pub use engine::{EngineBuilder, WordSelectionEngine};
pub use error::{
    EngineError, EnrichmentError, EnrichmentResult, GenerationError, GenerationResult, Result,
};
pub use lexicon::{LexiconBuilder, TierCounts, VerifiedLexicon};
pub use practice::{
    accepted_answers, is_correct_answer, AnswerFeedback, Badge, LearnerProgress, PracticeOutcome,
    PracticeSession, PracticeStats,
};
pub use sources::RateLimited;
pub use stores::{JsonFileCache, MemoryWordCache};
pub use tracker::{SelectionTracker, TierState};
pub use traits::{
    cache::WordCache,
    enricher::{ExampleEnricher, NoopEnricher},
    source::GenerativeWordSource,
};
pub use types::{
    EngineConfig, GeneratedExample, GeneratedWord, LexiconEntry, Provenance, Tier,
    VocabularyEntry,
};
pub use word_store::{WordFilter, WordStore};

#[cfg(feature = "sqlite")]
pub use stores::SqliteWordCache;

#[cfg(feature = "llm")]
pub use sources::{LlmExampleEnricher, LlmWordSource};
