//! The learner's visible word list.
//!
//! An owned, ordered collection of the entries a session has shown so
//! far. It hands out the next free id so callers can feed `select_many`
//! without tracking counters themselves.

use serde::{Deserialize, Serialize};

use crate::types::{Provenance, Tier, VocabularyEntry};

/// Filter for [`WordStore::get_all`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordFilter {
    pub tier: Option<Tier>,
    pub provenance: Option<Provenance>,
}

impl WordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_tier(tier: impl Into<Tier>) -> Self {
        Self {
            tier: Some(tier.into()),
            provenance: None,
        }
    }

    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = Some(provenance);
        self
    }

    pub fn matches(&self, entry: &VocabularyEntry) -> bool {
        self.tier.as_ref().map_or(true, |t| *t == entry.tier)
            && self.provenance.map_or(true, |p| p == entry.provenance)
    }
}

/// Ordered list of resolved entries, unique by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WordStore {
    entries: Vec<VocabularyEntry>,
}

impl WordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Returns `false` (and keeps the existing entry)
    /// when the id is already present.
    pub fn add(&mut self, entry: VocabularyEntry) -> bool {
        if self.contains(entry.id) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Append entries in order, skipping ids already present. Returns how
    /// many were added.
    pub fn add_many(&mut self, entries: impl IntoIterator<Item = VocabularyEntry>) -> usize {
        entries.into_iter().filter(|e| self.add(e.clone())).count()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn get(&self, id: u64) -> Option<&VocabularyEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entries matching `filter`, in insertion order.
    pub fn get_all(&self, filter: &WordFilter) -> Vec<&VocabularyEntry> {
        self.entries.iter().filter(|e| filter.matches(e)).collect()
    }

    /// One past the highest id held, or 1 when empty.
    pub fn next_id(&self) -> u64 {
        self.entries.iter().map(|e| e.id).max().map_or(1, |max| max + 1)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VocabularyEntry> {
        self.entries.iter()
    }
}
