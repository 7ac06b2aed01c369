//! SQLite word cache.
//!
//! One row per entry: the id as text key and the entry's JSON. Good for
//! long-lived local installs where the JSON file grows large.

use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::error::{EngineError, Result};
use crate::traits::cache::{cache_key, WordCache};
use crate::types::VocabularyEntry;

/// SQLite-backed cache.
pub struct SqliteWordCache {
    pool: SqlitePool,
}

impl SqliteWordCache {
    /// Connect and create the table if needed.
    ///
    /// # Example URLs
    /// - `sqlite::memory:` - In-memory database (ephemeral)
    /// - `sqlite://words.db?mode=rwc` - File, created if missing
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await
            .map_err(storage)?;

        let cache = Self { pool };
        cache.run_migrations().await?;
        Ok(cache)
    }

    pub async fn in_memory() -> Result<Self> {
        Self::new("sqlite::memory:").await
    }

    async fn run_migrations(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS word_cache (
                id TEXT PRIMARY KEY,
                entry TEXT NOT NULL,
                stored_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(storage)?;
        Ok(())
    }
}

fn storage(e: sqlx::Error) -> EngineError {
    EngineError::Storage(Box::new(e))
}

#[async_trait]
impl WordCache for SqliteWordCache {
    async fn get(&self, id: u64) -> Result<Option<VocabularyEntry>> {
        let row: Option<(String,)> = sqlx::query_as("SELECT entry FROM word_cache WHERE id = ?")
            .bind(cache_key(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?;

        match row {
            Some((json,)) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn put(&self, entry: &VocabularyEntry) -> Result<()> {
        let json = serde_json::to_string(entry)?;
        sqlx::query(
            r#"
            INSERT INTO word_cache (id, entry) VALUES (?, ?)
            ON CONFLICT(id) DO UPDATE SET entry = excluded.entry, stored_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(cache_key(entry.id))
        .bind(json)
        .execute(&self.pool)
        .await
        .map_err(storage)?;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        sqlx::query("DELETE FROM word_cache")
            .execute(&self.pool)
            .await
            .map_err(storage)?;
        Ok(())
    }

    async fn len(&self) -> Result<usize> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM word_cache")
            .fetch_one(&self.pool)
            .await
            .map_err(storage)?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LexiconEntry, Tier};
    use chrono::Utc;

    #[tokio::test]
    async fn test_round_trip_and_upsert() {
        let cache = SqliteWordCache::in_memory().await.unwrap();
        let lexicon = LexiconEntry::new("Nyame", "nyah-meh", "God", Tier::difficult());
        let mut entry = VocabularyEntry::from_verified(7, &lexicon, Utc::now());

        cache.put(&entry).await.unwrap();
        assert_eq!(cache.get(7).await.unwrap(), Some(entry.clone()));

        entry.attach_example(Some("Nyame ye.".into()));
        cache.put(&entry).await.unwrap();
        assert_eq!(cache.len().await.unwrap(), 1);
        assert_eq!(cache.get(7).await.unwrap().unwrap().example.as_deref(), Some("Nyame ye."));

        assert_eq!(cache.get(8).await.unwrap(), None);
        cache.clear().await.unwrap();
        assert_eq!(cache.len().await.unwrap(), 0);
    }
}
