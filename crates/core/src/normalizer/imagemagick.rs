//! ImageMagick-based normalizer implementation.

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use super::error::NormalizeError;
use super::traits::Normalizer;
use crate::config::NormalizerConfig;
use crate::process::{combined_output, locate_binary};

/// Resizes images in place with ImageMagick's `convert`.
pub struct ImageMagickNormalizer {
    config: NormalizerConfig,
}

impl ImageMagickNormalizer {
    /// Creates a new normalizer with the given configuration.
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Creates a normalizer with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(NormalizerConfig::default())
    }

    /// Builds `convert` arguments for an in-place resize to the target height.
    fn build_args(&self, path: &Path) -> Vec<String> {
        let path = path.to_string_lossy().to_string();
        vec![
            path.clone(),
            "-resize".to_string(),
            format!("x{}", self.config.img_height),
            path,
        ]
    }

    fn map_spawn_error(&self, e: std::io::Error) -> NormalizeError {
        if e.kind() == std::io::ErrorKind::NotFound {
            NormalizeError::NotFound {
                path: self.config.convert_path.clone(),
            }
        } else {
            NormalizeError::Io(e)
        }
    }
}

#[async_trait]
impl Normalizer for ImageMagickNormalizer {
    fn name(&self) -> &str {
        "imagemagick"
    }

    async fn normalize(&self, path: &Path) -> Result<(), NormalizeError> {
        let args = self.build_args(path);
        debug!(path = %path.display(), height = self.config.img_height, "Resizing image");

        let output = Command::new(&self.config.convert_path)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| self.map_spawn_error(e))?;

        if !output.status.success() {
            return Err(NormalizeError::Failed {
                code: output.status.code(),
                output: combined_output(&output),
            });
        }

        Ok(())
    }

    async fn validate(&self) -> Result<(), NormalizeError> {
        match locate_binary(&self.config.convert_path) {
            Some(path) => {
                debug!(path = %path.display(), "Found convert binary");
                Ok(())
            }
            None => Err(NormalizeError::NotFound {
                path: self.config.convert_path.clone(),
            }),
        }
    }
}
