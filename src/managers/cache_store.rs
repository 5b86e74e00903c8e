//! Cache Store for Labelmarks.
//!
//! Persists the serialized export and the last-refresh marker, backed by
//! SQLite via `rusqlite`. The engine only ever sees text and timestamps; the
//! storage medium stays behind [`CacheStore`].

use std::sync::Arc;

use rusqlite::{params, OptionalExtension};

use crate::database::connection::Database;
use crate::services::refresh_policy::now_epoch_millis;
use crate::types::errors::StorageError;
use crate::types::refresh::RefreshState;

/// Key of the serialized bookmark export.
pub const BOOKMARKS_KEY: &str = "bookmarks";
/// Key of the last successful refresh, in epoch milliseconds.
pub const REFRESH_MARKER_KEY: &str = "lastRefresh";

/// Trait defining cache persistence.
pub trait CacheStore {
    /// The cached export text, if one was ever stored.
    fn load_document_text(&self) -> Result<Option<String>, StorageError>;
    /// The refresh marker; [`RefreshState::NEVER`] when absent.
    fn load_refresh_state(&self) -> Result<RefreshState, StorageError>;
    /// Writes the export text and the refresh marker together.
    fn store_snapshot(&self, document_text: &str, refreshed_at_millis: i64) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}

/// Cache store backed by the `cache_entries` table.
pub struct SqliteCacheStore {
    db: Arc<Database>,
}

impl SqliteCacheStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .db
            .connection()
            .query_row(
                "SELECT value FROM cache_entries WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }
}

impl CacheStore for SqliteCacheStore {
    fn load_document_text(&self) -> Result<Option<String>, StorageError> {
        self.get(BOOKMARKS_KEY)
    }

    fn load_refresh_state(&self) -> Result<RefreshState, StorageError> {
        match self.get(REFRESH_MARKER_KEY)? {
            None => Ok(RefreshState::NEVER),
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .map(RefreshState::at)
                .map_err(|e| StorageError::Corrupt {
                    key: REFRESH_MARKER_KEY.to_string(),
                    message: e.to_string(),
                }),
        }
    }

    fn store_snapshot(&self, document_text: &str, refreshed_at_millis: i64) -> Result<(), StorageError> {
        let now = now_epoch_millis();
        let tx = self.db.connection().unchecked_transaction()?;
        tx.execute(
            "INSERT OR REPLACE INTO cache_entries (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![BOOKMARKS_KEY, document_text, now],
        )?;
        tx.execute(
            "INSERT OR REPLACE INTO cache_entries (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![REFRESH_MARKER_KEY, refreshed_at_millis.to_string(), now],
        )?;
        tx.commit()?;
        tracing::debug!(bytes = document_text.len(), refreshed_at_millis, "stored cache snapshot");
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.db
            .connection()
            .execute("DELETE FROM cache_entries", [])?;
        Ok(())
    }
}
