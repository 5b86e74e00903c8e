//! Labelmarks cache database.
//!
//! Provides the SQLite connection and schema migrations backing the cache
//! store.
//!
//! ```no_run
//! use labelmarks::database::Database;
//!
//! let db = Database::open("labelmarks.db").expect("failed to open database");
//! let scratch = Database::open_in_memory().expect("failed to open in-memory database");
//! ```

pub mod connection;
pub mod migrations;

pub use connection::Database;
