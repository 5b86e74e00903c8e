use thiserror::Error;

// === DocumentError ===

/// Errors raised while building a `BookmarkDocument` from raw XML text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// The input is not well-formed XML. `position` is the byte offset where
    /// the reader gave up.
    #[error("Bookmark XML parse error at byte {position}: {message}")]
    Parse { position: u64, message: String },
}

impl DocumentError {
    pub(crate) fn parse(position: u64, message: impl Into<String>) -> Self {
        DocumentError::Parse {
            position,
            message: message.into(),
        }
    }
}

// === QueryError ===

/// Errors that fail a structural or bookmark query outright.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// A label value cannot be embedded in a path expression without changing
    /// its meaning.
    #[error("Unsupported label: {0:?}")]
    UnsupportedLabel(String),
    /// A textual path expression is outside the supported grammar.
    #[error("Invalid path expression: {0}")]
    InvalidExpression(String),
}

// === MalformedBookmarkError ===

/// Identifies a bookmark node that could not be turned into a `Bookmark`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeLocator {
    /// The node carried a usable `id` child.
    Id(String),
    /// No id was recoverable; zero-based index among all bookmark elements.
    Position(usize),
}

impl std::fmt::Display for NodeLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeLocator::Id(id) => write!(f, "id {}", id),
            NodeLocator::Position(pos) => write!(f, "position {}", pos),
        }
    }
}

/// What was wrong with a malformed bookmark node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookmarkDefect {
    /// A required child element (`title`, `url`, `id`) is absent.
    MissingField(&'static str),
    /// The `url` has no recognizable authority component.
    NoAuthority(String),
}

/// A matched bookmark node lacked a required field. Recovered per record:
/// the bookmark is excluded and the error is reported alongside the results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Malformed bookmark at {locator}: {}", describe_defect(.defect))]
pub struct MalformedBookmarkError {
    pub locator: NodeLocator,
    pub defect: BookmarkDefect,
}

fn describe_defect(defect: &BookmarkDefect) -> String {
    match defect {
        BookmarkDefect::MissingField(field) => format!("missing <{}>", field),
        BookmarkDefect::NoAuthority(url) => format!("no authority in url {}", url),
    }
}

// === StorageError ===

/// Errors propagated from the cache store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Database operation failed.
    #[error("Cache database error: {0}")]
    Database(String),
    /// A stored value could not be decoded.
    #[error("Corrupt cache entry {key}: {message}")]
    Corrupt { key: String, message: String },
}

impl From<rusqlite::Error> for StorageError {
    fn from(e: rusqlite::Error) -> Self {
        StorageError::Database(e.to_string())
    }
}

// === FetchError ===

/// Errors reported by the fetch collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request could not be sent or the body could not be read.
    #[error("Fetch network error: {0}")]
    Network(String),
    /// The server answered with a non-success status.
    #[error("Fetch failed with HTTP status {0}")]
    HttpStatus(u16),
    /// The request did not finish within the configured timeout.
    #[error("Fetch timed out after {0}s")]
    Timeout(u64),
}

// === LoaderError ===

/// Errors from the refresh orchestration when no cached copy can stand in.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoaderError {
    #[error("Bookmark download failed and no cached copy exists: {0}")]
    Fetch(#[from] FetchError),
    #[error("Downloaded bookmarks are unusable and no cached copy exists: {0}")]
    Parse(#[from] DocumentError),
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    #[error("Settings I/O error: {0}")]
    IoError(String),
    /// Failed to serialize or deserialize settings.
    #[error("Settings serialization error: {0}")]
    SerializationError(String),
    /// The provided settings key is invalid.
    #[error("Invalid settings key: {0}")]
    InvalidKey(String),
    /// The provided settings value is invalid.
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}
