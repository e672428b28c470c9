//! Trait definitions for the recognizer module.

use async_trait::async_trait;
use std::path::Path;

use super::error::RecognizerError;

/// Decodes a batch of images listed in a manifest file.
#[async_trait]
pub trait Recognizer: Send + Sync {
    /// Returns the name of this recognizer implementation.
    fn name(&self) -> &str;

    /// Runs the recognizer once over `manifest` and returns its raw output.
    async fn recognize(&self, manifest: &Path) -> Result<String, RecognizerError>;

    /// Validates that the recognizer is properly configured and ready.
    async fn validate(&self) -> Result<(), RecognizerError>;
}
