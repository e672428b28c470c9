//! Trait definitions for the normalizer module.

use async_trait::async_trait;
use std::path::Path;

use super::error::NormalizeError;

/// Resizes a stored image in place so it matches the recognizer's input height.
#[async_trait]
pub trait Normalizer: Send + Sync {
    /// Returns the name of this normalizer implementation.
    fn name(&self) -> &str;

    /// Resizes the image at `path`, overwriting it.
    async fn normalize(&self, path: &Path) -> Result<(), NormalizeError>;

    /// Validates that the normalizer is properly configured and ready.
    async fn validate(&self) -> Result<(), NormalizeError>;
}
