//! Fetch collaborator for Labelmarks.
//!
//! Supplies raw export text for a resource locator. Failures come back as
//! [`FetchError`] values; nothing is thrown into the engine.

use std::future::Future;

use crate::types::errors::FetchError;

/// Trait defining how raw export text is obtained.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>>;
}

/// HTTP fetcher backed by `reqwest`.
#[cfg(feature = "network")]
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout_secs: u64,
}

#[cfg(feature = "network")]
impl HttpFetcher {
    /// Builds a client with the given request timeout.
    ///
    /// # Errors
    /// Returns [`FetchError::Network`] if the TLS backend cannot be
    /// initialized.
    pub fn new(timeout_secs: u64) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .user_agent(concat!("labelmarks/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        Ok(Self {
            client,
            timeout_secs,
        })
    }

    fn classify(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.timeout_secs)
        } else if let Some(status) = err.status() {
            FetchError::HttpStatus(status.as_u16())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

#[cfg(feature = "network")]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        tracing::info!(url, "downloading bookmark export");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;
        let response = response.error_for_status().map_err(|e| self.classify(e))?;
        response.text().await.map_err(|e| self.classify(e))
    }
}
