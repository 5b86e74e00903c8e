//! Unit tests for the SQLite-backed cache store.

use std::sync::Arc;

use labelmarks::database::Database;
use labelmarks::managers::cache_store::{CacheStore, SqliteCacheStore, REFRESH_MARKER_KEY};
use labelmarks::types::errors::StorageError;
use labelmarks::types::refresh::RefreshState;
use tempfile::TempDir;

fn setup() -> (Arc<Database>, SqliteCacheStore) {
    let db = Arc::new(Database::open_in_memory().expect("Failed to open in-memory database"));
    let store = SqliteCacheStore::new(db.clone());
    (db, store)
}

#[test]
fn test_empty_store_is_never_refreshed() {
    let (_db, store) = setup();
    assert_eq!(store.load_document_text().unwrap(), None);
    assert_eq!(store.load_refresh_state().unwrap(), RefreshState::NEVER);
    assert!(store.load_refresh_state().unwrap().is_never());
}

#[test]
fn test_snapshot_writes_text_and_marker() {
    let (_db, store) = setup();
    store.store_snapshot("<bookmarks/>", 1_234).unwrap();
    assert_eq!(store.load_document_text().unwrap().as_deref(), Some("<bookmarks/>"));
    assert_eq!(store.load_refresh_state().unwrap(), RefreshState::at(1_234));
}

#[test]
fn test_snapshot_replaces_previous_one() {
    let (_db, store) = setup();
    store.store_snapshot("<old/>", 1).unwrap();
    store.store_snapshot("<new/>", 2).unwrap();
    assert_eq!(store.load_document_text().unwrap().as_deref(), Some("<new/>"));
    assert_eq!(store.load_refresh_state().unwrap(), RefreshState::at(2));
}

#[test]
fn test_corrupt_marker_is_a_storage_error() {
    let (db, store) = setup();
    db.connection()
        .execute(
            "INSERT INTO cache_entries (key, value, updated_at) VALUES (?1, 'yesterday', 0)",
            [REFRESH_MARKER_KEY],
        )
        .unwrap();
    assert!(matches!(
        store.load_refresh_state(),
        Err(StorageError::Corrupt { .. })
    ));
}

#[test]
fn test_clear_forgets_everything() {
    let (_db, store) = setup();
    store.store_snapshot("<bookmarks/>", 99).unwrap();
    store.clear().unwrap();
    assert_eq!(store.load_document_text().unwrap(), None);
    assert_eq!(store.load_refresh_state().unwrap(), RefreshState::NEVER);
}

#[test]
fn test_snapshot_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cache.db");
    {
        let store = SqliteCacheStore::new(Arc::new(Database::open(&path).unwrap()));
        store.store_snapshot("<bookmarks/>", 42).unwrap();
    }
    let store = SqliteCacheStore::new(Arc::new(Database::open(&path).unwrap()));
    assert_eq!(store.load_refresh_state().unwrap(), RefreshState::at(42));
    assert_eq!(store.load_document_text().unwrap().as_deref(), Some("<bookmarks/>"));
}
