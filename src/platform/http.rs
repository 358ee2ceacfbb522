//! HTTP-backed image source.
//!
//! Resolves a photo reference as a path under a base URL, the shape of a
//! platform's file-download endpoint. The base URL is injectable so tests
//! can point it at a mock server.

use std::time::Duration;

use async_trait::async_trait;

use super::{ImageSource, RetrievalError};
use crate::session::PhotoRef;

/// Default timeout for a whole download request (30 seconds).
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connection timeout (10 seconds).
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches image bytes over HTTP from a file-download endpoint.
pub struct HttpImageSource {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpImageSource {
    /// Create a source rooted at `base_url`.
    ///
    /// A trailing slash on the base URL is tolerated.
    pub fn new(base_url: impl Into<String>) -> Result<Self, RetrievalError> {
        let http_client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .map_err(|e| RetrievalError::Transport(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client,
        })
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, photo: &PhotoRef) -> String {
        format!("{}/{}", self.base_url, photo.as_str().trim_start_matches('/'))
    }
}

#[async_trait]
impl ImageSource for HttpImageSource {
    async fn retrieve(&self, photo: &PhotoRef) -> Result<Vec<u8>, RetrievalError> {
        let url = self.url_for(photo);
        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| RetrievalError::Transport(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(RetrievalError::StaleReference {
                reference: photo.as_str().to_string(),
            });
        }
        if !response.status().is_success() {
            return Err(RetrievalError::Transport(format!(
                "unexpected status {} fetching {}",
                response.status(),
                url
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| RetrievalError::Transport(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}
