//! Core types.

pub mod config;
pub mod entry;

pub use config::EngineConfig;
pub use entry::{GeneratedExample, GeneratedWord, LexiconEntry, Provenance, Tier, VocabularyEntry};
