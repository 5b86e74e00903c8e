//! SQLite connection management for the cache.

use rusqlite::Connection;
use std::path::Path;

use super::migrations;

/// Owns the cache connection and guarantees the schema is current.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (or creates) the database file at `path` and migrates it.
    ///
    /// # Errors
    /// Returns `rusqlite::Error` if the file cannot be opened or a migration
    /// fails.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open(path)?;
        Self::migrated(conn)
    }

    /// Opens a throwaway in-memory database, discarded on drop.
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        let conn = Connection::open_in_memory()?;
        Self::migrated(conn)
    }

    fn migrated(conn: Connection) -> Result<Self, rusqlite::Error> {
        migrations::run_all(&conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
