//! Bookmark Loader for Labelmarks.
//!
//! Orchestrates a refresh cycle: reads the refresh marker once, fetches the
//! export when the cache is stale (or unusable), stores a new snapshot after
//! every successful fetch, and falls back to the cached document when a
//! fetch or parse fails.

use crate::document::BookmarkDocument;
use crate::managers::cache_store::CacheStore;
use crate::services::fetcher::Fetcher;
use crate::services::refresh_policy::RefreshPolicy;
use crate::types::errors::LoaderError;
use crate::types::refresh::RefreshState;
use crate::types::settings::LoaderSettings;

/// Where the loaded document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentSource {
    /// Freshly downloaded and written to the cache.
    Network,
    /// Read from the cache because it was still fresh.
    Cache,
    /// Read from the cache because a refresh failed.
    CacheFallback,
}

/// A fully built document and its provenance.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub document: BookmarkDocument,
    pub source: DocumentSource,
}

/// Refresh orchestration over an injected store and fetcher.
pub struct BookmarkLoader<S, F> {
    store: S,
    fetcher: F,
    source_url: String,
    policy: RefreshPolicy,
}

impl<S: CacheStore, F: Fetcher> BookmarkLoader<S, F> {
    pub fn new(store: S, fetcher: F, settings: &LoaderSettings) -> Self {
        Self {
            store,
            fetcher,
            source_url: settings.source_url.clone(),
            policy: RefreshPolicy::new(settings.ttl_millis),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn policy(&self) -> RefreshPolicy {
        self.policy
    }

    /// Picks up a new source URL and TTL for subsequent `init`/`refresh`
    /// calls. The store and fetcher are kept as they are.
    pub fn reconfigure(&mut self, settings: &LoaderSettings) {
        self.source_url = settings.source_url.clone();
        self.policy = RefreshPolicy::new(settings.ttl_millis);
        tracing::info!(
            url = %self.source_url,
            ttl_millis = settings.ttl_millis,
            "loader reconfigured"
        );
    }

    /// Start-up load: the cache if fresh and readable, otherwise a refresh.
    ///
    /// An unreadable refresh marker counts as "never refreshed".
    ///
    /// # Errors
    /// See [`BookmarkLoader::refresh`].
    pub async fn init(&self, now_epoch_millis: i64) -> Result<LoadOutcome, LoaderError> {
        let state = self.store.load_refresh_state().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "refresh marker unreadable; treating cache as absent");
            RefreshState::NEVER
        });

        if self.policy.is_stale(state, now_epoch_millis) {
            tracing::info!(
                last_refresh = state.last_refresh_epoch_millis,
                ttl_millis = self.policy.ttl_millis(),
                "bookmark cache is stale"
            );
            return self.refresh(now_epoch_millis).await;
        }

        match self.load_cached() {
            Some(document) => Ok(LoadOutcome {
                document,
                source: DocumentSource::Cache,
            }),
            None => {
                tracing::info!("fresh refresh marker but no usable cached export");
                self.refresh(now_epoch_millis).await
            }
        }
    }

    /// Fetches and parses the export, then caches it with
    /// `lastRefresh = now_epoch_millis`.
    ///
    /// Storage failures while writing the snapshot are logged and do not
    /// fail the refresh.
    ///
    /// # Errors
    /// Returns the fetch or parse error only when there is no cached
    /// document to fall back to.
    pub async fn refresh(&self, now_epoch_millis: i64) -> Result<LoadOutcome, LoaderError> {
        let fetched = match self.fetcher.fetch(&self.source_url).await {
            Ok(text) => BookmarkDocument::build(&text).map_err(LoaderError::from),
            Err(err) => Err(LoaderError::from(err)),
        };

        let document = match fetched {
            Ok(document) => document,
            Err(err) => {
                tracing::warn!(error = %err, "bookmark refresh failed");
                return match self.load_cached() {
                    Some(document) => Ok(LoadOutcome {
                        document,
                        source: DocumentSource::CacheFallback,
                    }),
                    None => Err(err),
                };
            }
        };

        if let Err(err) = self.store.store_snapshot(&document.to_xml(), now_epoch_millis) {
            tracing::warn!(error = %err, "could not cache downloaded bookmarks");
        }
        Ok(LoadOutcome {
            document,
            source: DocumentSource::Network,
        })
    }

    /// The cached document, or `None` if absent, unreadable, or not
    /// well-formed.
    fn load_cached(&self) -> Option<BookmarkDocument> {
        let text = match self.store.load_document_text() {
            Ok(Some(text)) => text,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!(error = %err, "cached bookmarks unreadable");
                return None;
            }
        };
        match BookmarkDocument::build(&text) {
            Ok(document) => Some(document),
            Err(err) => {
                tracing::warn!(error = %err, "cached bookmarks are not well-formed");
                None
            }
        }
    }
}
