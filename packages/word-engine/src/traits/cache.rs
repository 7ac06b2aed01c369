//! Durable word cache.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::VocabularyEntry;

/// Durable map from entry id to a resolved entry.
///
/// Backends key entries by the id rendered as a string and store the
/// entry's JSON form. Reading an id that was never written is `Ok(None)`,
/// not an error.
#[async_trait]
pub trait WordCache: Send + Sync {
    /// Look up an entry by id.
    async fn get(&self, id: u64) -> Result<Option<VocabularyEntry>>;

    /// Store an entry under its id, replacing any previous value.
    async fn put(&self, entry: &VocabularyEntry) -> Result<()>;

    /// Remove every entry.
    async fn clear(&self) -> Result<()>;

    /// Number of stored entries.
    async fn len(&self) -> Result<usize>;

    /// Store several entries.
    async fn put_many(&self, entries: &[VocabularyEntry]) -> Result<()> {
        for entry in entries {
            self.put(entry).await?;
        }
        Ok(())
    }

    async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }
}

/// Cache key for an id.
pub fn cache_key(id: u64) -> String {
    id.to_string()
}
