//! Mock fetcher for testing.

use async_trait::async_trait;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::fetcher::{FetchError, ImageFetcher};

/// A recorded fetch for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedFetch {
    pub url: String,
    pub dest: PathBuf,
}

/// Mock implementation of the ImageFetcher trait.
///
/// Writes fixed bytes to the destination instead of downloading.
#[derive(Debug, Clone)]
pub struct MockFetcher {
    fetches: Arc<RwLock<Vec<RecordedFetch>>>,
    failing_urls: Arc<RwLock<HashSet<String>>>,
    content: Arc<RwLock<Vec<u8>>>,
}

impl Default for MockFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MockFetcher {
    /// Create a new mock fetcher.
    pub fn new() -> Self {
        Self {
            fetches: Arc::new(RwLock::new(Vec::new())),
            failing_urls: Arc::new(RwLock::new(HashSet::new())),
            content: Arc::new(RwLock::new(b"mock image".to_vec())),
        }
    }

    /// Make every fetch of `url` fail with a 404.
    pub async fn fail_url(&self, url: impl Into<String>) {
        self.failing_urls.write().await.insert(url.into());
    }

    /// Set the bytes written for each fetch.
    pub async fn set_content(&self, content: impl Into<Vec<u8>>) {
        *self.content.write().await = content.into();
    }

    /// Get all recorded fetches, including failed ones.
    pub async fn recorded_fetches(&self) -> Vec<RecordedFetch> {
        self.fetches.read().await.clone()
    }

    /// Get the number of fetches attempted.
    pub async fn fetch_count(&self) -> usize {
        self.fetches.read().await.len()
    }
}

#[async_trait]
impl ImageFetcher for MockFetcher {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self, url: &str, dest: &Path) -> Result<u64, FetchError> {
        self.fetches.write().await.push(RecordedFetch {
            url: url.to_string(),
            dest: dest.to_path_buf(),
        });

        if self.failing_urls.read().await.contains(url) {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            });
        }

        let content = self.content.read().await.clone();
        tokio::fs::write(dest, &content)
            .await
            .map_err(|source| FetchError::Write {
                path: dest.to_path_buf(),
                source,
            })?;

        Ok(content.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_mock_fetch_writes_content() {
        let dir = TempDir::new().unwrap();
        let fetcher = MockFetcher::new();
        fetcher.set_content(b"png".to_vec()).await;

        let dest = dir.path().join("a.png");
        let written = fetcher.fetch("http://x/a.png", &dest).await.unwrap();

        assert_eq!(written, 3);
        assert_eq!(std::fs::read(&dest).unwrap(), b"png");
        assert_eq!(fetcher.fetch_count().await, 1);
    }

    #[tokio::test]
    async fn test_mock_fetch_failing_url() {
        let dir = TempDir::new().unwrap();
        let fetcher = MockFetcher::new();
        fetcher.fail_url("http://x/bad.png").await;

        let dest = dir.path().join("bad.png");
        let err = fetcher.fetch("http://x/bad.png", &dest).await.unwrap_err();

        assert!(matches!(err, FetchError::Status { status: 404, .. }));
        assert!(!dest.exists());
        assert_eq!(fetcher.recorded_fetches().await[0].url, "http://x/bad.png");
    }
}
