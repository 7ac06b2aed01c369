//! In-memory word cache for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::error::Result;
use crate::traits::cache::{cache_key, WordCache};
use crate::types::VocabularyEntry;

/// In-memory cache.
///
/// Useful for tests and short-lived sessions. Contents are lost when the
/// process exits.
#[derive(Default)]
pub struct MemoryWordCache {
    entries: RwLock<HashMap<String, VocabularyEntry>>,
}

impl MemoryWordCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WordCache for MemoryWordCache {
    async fn get(&self, id: u64) -> Result<Option<VocabularyEntry>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(&cache_key(id)).cloned())
    }

    async fn put(&self, entry: &VocabularyEntry) -> Result<()> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(cache_key(entry.id), entry.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        Ok(())
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.entries.read().unwrap_or_else(PoisonError::into_inner).len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LexiconEntry, Tier};
    use chrono::Utc;

    fn entry(id: u64) -> VocabularyEntry {
        let lexicon = LexiconEntry::new("Akwaaba", "ah-kwah-bah", "Welcome", Tier::difficult());
        VocabularyEntry::from_verified(id, &lexicon, Utc::now())
    }

    #[tokio::test]
    async fn test_round_trip() {
        let cache = MemoryWordCache::new();
        let written = entry(7);
        cache.put(&written).await.unwrap();

        assert_eq!(cache.get(7).await.unwrap(), Some(written));
        assert_eq!(cache.get(8).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = MemoryWordCache::new();
        cache.put_many(&[entry(1), entry(2)]).await.unwrap();
        assert_eq!(cache.len().await.unwrap(), 2);

        cache.clear().await.unwrap();
        assert!(cache.is_empty().await.unwrap());
    }
}
