//! Laia-based recognizer implementation.

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use super::error::RecognizerError;
use super::traits::Recognizer;
use crate::config::RecognizerConfig;
use crate::process::{combined_output, locate_binary};

/// Runs `laia-docker decode` against a trained model and symbols table.
///
/// No timeout is applied; callers that need bounded latency wrap the call.
pub struct LaiaRecognizer {
    config: RecognizerConfig,
}

impl LaiaRecognizer {
    /// Creates a new recognizer with the given configuration.
    pub fn new(config: RecognizerConfig) -> Self {
        Self { config }
    }

    /// Builds the decode arguments for one manifest.
    fn build_args(&self, manifest: &Path) -> Vec<String> {
        vec![
            "decode".to_string(),
            "--symbols_table".to_string(),
            self.config.symbols_path.to_string_lossy().to_string(),
            self.config.model_path.to_string_lossy().to_string(),
            manifest.to_string_lossy().to_string(),
        ]
    }

    fn map_spawn_error(&self, e: std::io::Error) -> RecognizerError {
        if e.kind() == std::io::ErrorKind::NotFound {
            RecognizerError::NotFound {
                path: self.config.laia_path.clone(),
            }
        } else {
            RecognizerError::Io(e)
        }
    }
}

#[async_trait]
impl Recognizer for LaiaRecognizer {
    fn name(&self) -> &str {
        "laia"
    }

    async fn recognize(&self, manifest: &Path) -> Result<String, RecognizerError> {
        let args = self.build_args(manifest);
        debug!(manifest = %manifest.display(), "Running recognizer");

        let output = Command::new(&self.config.laia_path)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| self.map_spawn_error(e))?;

        let text = combined_output(&output);

        if !output.status.success() {
            return Err(RecognizerError::Failed {
                code: output.status.code(),
                output: text,
            });
        }

        Ok(text)
    }

    async fn validate(&self) -> Result<(), RecognizerError> {
        match locate_binary(&self.config.laia_path) {
            Some(path) => {
                debug!(path = %path.display(), "Found recognizer binary");
                Ok(())
            }
            None => Err(RecognizerError::NotFound {
                path: self.config.laia_path.clone(),
            }),
        }
    }
}
