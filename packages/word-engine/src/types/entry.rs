//! Vocabulary entry types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{GenerationError, GenerationResult};

/// A named difficulty bucket.
///
/// Tiers are an open set: the lexicon decides which tiers exist and in
/// what order. Names are normalized to trimmed lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tier(String);

impl Tier {
    pub const EASY: &'static str = "easy";
    pub const INTERMEDIATE: &'static str = "intermediate";
    pub const DIFFICULT: &'static str = "difficult";

    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().trim().to_lowercase())
    }

    pub fn easy() -> Self {
        Self::new(Self::EASY)
    }

    pub fn intermediate() -> Self {
        Self::new(Self::INTERMEDIATE)
    }

    pub fn difficult() -> Self {
        Self::new(Self::DIFFICULT)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Tier {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Tier {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Where an entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Curated lexicon (trusted)
    Verified,
    /// Generative fallback (plausible, unverified)
    Generated,
}

/// A curated lexicon record. Carries no id or provenance; those are
/// stamped when the engine hands the record out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub term: String,
    pub pronunciation: String,
    /// English gloss; slash-separated alternatives are all accepted answers.
    pub definition: String,
    pub tier: Tier,
    #[serde(default)]
    pub example: Option<String>,
    /// Dialect label
    pub region: String,
}

impl LexiconEntry {
    pub fn new(
        term: impl Into<String>,
        pronunciation: impl Into<String>,
        definition: impl Into<String>,
        tier: Tier,
    ) -> Self {
        Self {
            term: term.into(),
            pronunciation: pronunciation.into(),
            definition: definition.into(),
            tier,
            example: None,
            region: "Twi".to_string(),
        }
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Case-insensitive substring match on term or definition.
    pub fn matches(&self, query_lower: &str) -> bool {
        self.term.to_lowercase().contains(query_lower)
            || self.definition.to_lowercase().contains(query_lower)
    }
}

/// A fully resolved entry as handed to callers and stored in the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyEntry {
    pub id: u64,
    pub term: String,
    pub pronunciation: String,
    pub definition: String,
    pub tier: Tier,
    pub example: Option<String>,
    pub provenance: Provenance,
    /// When the entry was resolved (not when the word was authored)
    pub created_at: DateTime<Utc>,
}

impl VocabularyEntry {
    /// Stamp a lexicon record.
    pub fn from_verified(id: u64, entry: &LexiconEntry, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            term: entry.term.clone(),
            pronunciation: entry.pronunciation.clone(),
            definition: entry.definition.clone(),
            tier: entry.tier.clone(),
            example: entry.example.clone(),
            provenance: Provenance::Verified,
            created_at,
        }
    }

    /// Stamp a generated word for `tier`.
    pub fn from_generated(
        id: u64,
        tier: Tier,
        word: GeneratedWord,
        created_at: DateTime<Utc>,
    ) -> Self {
        let example = word
            .example
            .map(|e| e.twi.trim().to_string())
            .filter(|s| !s.is_empty());

        Self {
            id,
            term: word.word.trim().to_string(),
            pronunciation: word.pronunciation.trim().to_string(),
            definition: word.definition.trim().to_string(),
            tier,
            example,
            provenance: Provenance::Generated,
            created_at,
        }
    }

    /// Attach an example if the entry has none. Existing examples and
    /// every other field are left alone.
    pub fn attach_example(&mut self, example: Option<String>) {
        if self.example.is_none() {
            self.example = example;
        }
    }

    pub fn needs_example(&self) -> bool {
        self.example.is_none()
    }

    pub fn is_verified(&self) -> bool {
        self.provenance == Provenance::Verified
    }
}

/// Structured payload returned by a generative source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "llm", derive(schemars::JsonSchema))]
pub struct GeneratedWord {
    /// The Twi word or phrase
    pub word: String,
    /// Easy-to-read phonetic guide
    pub pronunciation: String,
    /// English meaning
    pub definition: String,
    #[serde(default)]
    pub example: Option<GeneratedExample>,
}

/// Usage example attached to a generated word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "llm", derive(schemars::JsonSchema))]
pub struct GeneratedExample {
    pub twi: String,
    pub english: String,
}

impl GeneratedWord {
    pub fn new(
        word: impl Into<String>,
        pronunciation: impl Into<String>,
        definition: impl Into<String>,
    ) -> Self {
        Self {
            word: word.into(),
            pronunciation: pronunciation.into(),
            definition: definition.into(),
            example: None,
        }
    }

    pub fn with_example(mut self, twi: impl Into<String>, english: impl Into<String>) -> Self {
        self.example = Some(GeneratedExample {
            twi: twi.into(),
            english: english.into(),
        });
        self
    }

    /// Reject payloads that cannot become a vocabulary entry.
    pub fn validate(self) -> GenerationResult<Self> {
        if self.word.trim().is_empty() {
            return Err(GenerationError::Malformed("empty word".into()));
        }
        if self.definition.trim().is_empty() {
            return Err(GenerationError::Malformed(format!(
                "no definition for '{}'",
                self.word.trim()
            )));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_normalizes() {
        assert_eq!(Tier::new("  Easy "), Tier::easy());
        assert_eq!(Tier::from("DIFFICULT").as_str(), "difficult");
    }

    #[test]
    fn test_entry_serializes_camel_case() {
        let lexicon = LexiconEntry::new("Obaa", "oh-bah", "Woman/Girl", Tier::intermediate());
        let entry = VocabularyEntry::from_verified(7, &lexicon, Utc::now());
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["id"], 7);
        assert_eq!(json["provenance"], "verified");
        assert_eq!(json["tier"], "intermediate");
        assert!(json.get("createdAt").is_some());
        assert!(json["example"].is_null());
    }

    #[test]
    fn test_attach_example_never_overwrites() {
        let lexicon = LexiconEntry::new("Nsa", "n-sah", "Water", Tier::intermediate())
            .with_example("Me pɛ nsa.");
        let mut entry = VocabularyEntry::from_verified(1, &lexicon, Utc::now());

        entry.attach_example(Some("Other sentence.".into()));
        assert_eq!(entry.example.as_deref(), Some("Me pɛ nsa."));
        assert_eq!(entry.definition, "Water");
    }

    #[test]
    fn test_generated_word_validation() {
        assert!(GeneratedWord::new("Kɔ", "kaw", "Go").validate().is_ok());
        assert!(matches!(
            GeneratedWord::new("  ", "x", "Go").validate(),
            Err(GenerationError::Malformed(_))
        ));
        assert!(matches!(
            GeneratedWord::new("Kɔ", "kaw", "").validate(),
            Err(GenerationError::Malformed(_))
        ));
    }

    #[test]
    fn test_from_generated_keeps_twi_example() {
        let word = GeneratedWord::new(" Aduane ", "ah-doo-ah-neh", "Food")
            .with_example("Aduane no yɛ dɛ.", "The food is sweet.");
        let entry = VocabularyEntry::from_generated(3, Tier::easy(), word, Utc::now());

        assert_eq!(entry.term, "Aduane");
        assert_eq!(entry.provenance, Provenance::Generated);
        assert_eq!(entry.example.as_deref(), Some("Aduane no yɛ dɛ."));
    }
}
