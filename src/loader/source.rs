//! Collection sources
//!
//! A source answers "give me the records of collection `name`". Three
//! backends ship with the crate:
//!
//! - [`HttpSource`]: `GET <base_url>/<name>.json`
//! - [`DirSource`]: reads `<dir>/<name>.json`
//! - [`MemorySource`]: records held in memory, optionally failing on demand

use super::error::FetchError;
use crate::models::RawRecord;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Request timeout used by [`HttpSource::new`]
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Asynchronous fetch-by-name of one raw collection
#[async_trait]
pub trait CollectionSource: Send + Sync {
    /// Fetch every record of the named collection
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if the collection cannot be retrieved or decoded.
    async fn fetch(&self, name: &str) -> Result<Vec<RawRecord>, FetchError>;

    /// Short description used in log lines
    fn describe(&self) -> String;
}

/// Fetches collections over HTTP
pub struct HttpSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSource {
    /// Source with the default request timeout
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Transport` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Source whose requests fail once `timeout` has elapsed
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Transport` if the HTTP client cannot be built.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, client))
    }

    #[must_use]
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    fn url_for(&self, name: &str) -> String {
        format!("{}/{name}.json", self.base_url)
    }
}

#[async_trait]
impl CollectionSource for HttpSource {
    async fn fetch(&self, name: &str) -> Result<Vec<RawRecord>, FetchError> {
        let response = self.client.get(self.url_for(name)).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

/// Reads collections from JSON files in a directory
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl CollectionSource for DirSource {
    async fn fetch(&self, name: &str) -> Result<Vec<RawRecord>, FetchError> {
        let path = self.root.join(format!("{name}.json"));
        let data = tokio::fs::read(&path).await?;
        Ok(serde_json::from_slice(&data)?)
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

/// In-memory collections
///
/// Names registered with [`MemorySource::fail`] answer with the given status.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    collections: HashMap<String, Vec<RawRecord>>,
    failures: HashMap<String, u16>,
}

impl MemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, records: Vec<RawRecord>) -> Self {
        self.collections.insert(name.into(), records);
        self
    }

    #[must_use]
    pub fn fail(mut self, name: impl Into<String>, status: u16) -> Self {
        self.failures.insert(name.into(), status);
        self
    }
}

#[async_trait]
impl CollectionSource for MemorySource {
    async fn fetch(&self, name: &str) -> Result<Vec<RawRecord>, FetchError> {
        if let Some(status) = self.failures.get(name) {
            return Err(FetchError::Status(*status));
        }
        self.collections
            .get(name)
            .cloned()
            .ok_or(FetchError::Status(404))
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
