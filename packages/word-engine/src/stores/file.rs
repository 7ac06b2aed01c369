//! JSON file word cache.
//!
//! The whole cache is one JSON object mapping the id (as a string) to the
//! entry, rewritten on every change. Writes go to a sibling temp file and
//! are renamed into place so a crash never leaves a half-written cache.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{EngineError, Result};
use crate::traits::cache::{cache_key, WordCache};
use crate::types::VocabularyEntry;

type CacheMap = BTreeMap<String, VocabularyEntry>;

/// File-backed cache surviving across sessions.
pub struct JsonFileCache {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl JsonFileCache {
    /// Use (or later create) the cache file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<CacheMap> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(CacheMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(CacheMap::new()),
            Err(e) => Err(EngineError::Storage(Box::new(e))),
        }
    }

    async fn save(&self, map: &CacheMap) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(map)?;
        let tmp = self.path.with_extension("json.tmp");

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| EngineError::Storage(Box::new(e)))?;
        }
        tokio::fs::write(&tmp, bytes)
            .await
            .map_err(|e| EngineError::Storage(Box::new(e)))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| EngineError::Storage(Box::new(e)))?;

        debug!(path = %self.path.display(), entries = map.len(), "Word cache saved");
        Ok(())
    }
}

#[async_trait]
impl WordCache for JsonFileCache {
    async fn get(&self, id: u64) -> Result<Option<VocabularyEntry>> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.remove(&cache_key(id)))
    }

    async fn put(&self, entry: &VocabularyEntry) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut map = self.load().await?;
        map.insert(cache_key(entry.id), entry.clone());
        self.save(&map).await
    }

    async fn put_many(&self, entries: &[VocabularyEntry]) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut map = self.load().await?;
        for entry in entries {
            map.insert(cache_key(entry.id), entry.clone());
        }
        self.save(&map).await
    }

    async fn clear(&self) -> Result<()> {
        let _guard = self.lock.lock().await;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(EngineError::Storage(Box::new(e))),
        }
    }

    async fn len(&self) -> Result<usize> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GeneratedWord, LexiconEntry, Tier};
    use chrono::Utc;

    #[tokio::test]
    async fn test_round_trip_survives_new_handle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.json");

        let lexicon = LexiconEntry::new("Medaase", "meh-dah-seh", "Thank you", Tier::difficult());
        let written = VocabularyEntry::from_verified(7, &lexicon, Utc::now());
        JsonFileCache::new(&path).put(&written).await.unwrap();

        let reopened = JsonFileCache::new(&path);
        assert_eq!(reopened.get(7).await.unwrap(), Some(written));
        assert_eq!(reopened.get(99).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let cache = JsonFileCache::new(dir.path().join("absent.json"));

        assert_eq!(cache.get(1).await.unwrap(), None);
        assert_eq!(cache.len().await.unwrap(), 0);
        cache.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_file_layout_is_keyed_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("words.json");
        let cache = JsonFileCache::new(&path);

        let word = GeneratedWord::new("Nkwan", "n-kwahn", "Soup");
        let entry = VocabularyEntry::from_generated(12, Tier::easy(), word, Utc::now());
        cache.put_many(&[entry]).await.unwrap();

        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw["12"]["term"], "Nkwan");
        assert_eq!(raw["12"]["provenance"], "generated");

        cache.clear().await.unwrap();
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = JsonFileCache::new(&path).get(1).await.unwrap_err();
        assert!(matches!(err, EngineError::JsonParse(_)));
    }
}
