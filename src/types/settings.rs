use serde::{Deserialize, Serialize};

use super::refresh::DEFAULT_TTL_MILLIS;

/// Where the export comes from in the stock configuration.
pub const DEFAULT_SOURCE_URL: &str = "https://www.google.com/bookmarks/?output=xml&num=10000";

/// Loader configuration, persisted as JSON by the settings engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoaderSettings {
    /// Resource locator handed to the fetcher.
    pub source_url: String,
    /// Age after which the cached export is re-fetched.
    pub ttl_millis: i64,
    pub request_timeout_secs: u64,
    /// Overrides the cache database location (defaults to the data dir).
    pub database_path: Option<String>,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            ttl_millis: DEFAULT_TTL_MILLIS,
            request_timeout_secs: 30,
            database_path: None,
        }
    }
}
