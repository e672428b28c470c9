//! Mock normalizer for testing.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::normalizer::{NormalizeError, Normalizer};

/// Mock implementation of the Normalizer trait.
///
/// Leaves files untouched and records which paths it was asked to resize.
#[derive(Debug, Clone)]
pub struct MockNormalizer {
    normalized: Arc<RwLock<Vec<PathBuf>>>,
    /// Fail when the path's file name contains this text.
    fail_matching: Arc<RwLock<Option<String>>>,
}

impl Default for MockNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockNormalizer {
    /// Create a new mock normalizer.
    pub fn new() -> Self {
        Self {
            normalized: Arc::new(RwLock::new(Vec::new())),
            fail_matching: Arc::new(RwLock::new(None)),
        }
    }

    /// Fail any image whose file name contains `pattern`.
    pub async fn fail_matching(&self, pattern: impl Into<String>) {
        *self.fail_matching.write().await = Some(pattern.into());
    }

    /// Get all paths that were normalized, in call order.
    pub async fn recorded_paths(&self) -> Vec<PathBuf> {
        self.normalized.read().await.clone()
    }
}

#[async_trait]
impl Normalizer for MockNormalizer {
    fn name(&self) -> &str {
        "mock"
    }

    async fn normalize(&self, path: &Path) -> Result<(), NormalizeError> {
        self.normalized.write().await.push(path.to_path_buf());

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        if let Some(pattern) = self.fail_matching.read().await.as_deref() {
            if file_name.contains(pattern) {
                return Err(NormalizeError::Failed {
                    code: Some(1),
                    output: format!("convert: improper image header `{}'", file_name),
                });
            }
        }

        Ok(())
    }

    async fn validate(&self) -> Result<(), NormalizeError> {
        Ok(())
    }
}
