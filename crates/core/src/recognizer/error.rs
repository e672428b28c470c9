//! Error types for the recognizer module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while running the recognizer.
#[derive(Debug, Error)]
pub enum RecognizerError {
    /// The recognizer launcher could not be found.
    #[error("Recognizer not found at path: {path}")]
    NotFound { path: PathBuf },

    /// The recognizer exited unsuccessfully.
    #[error("Recognizer exited with code {code:?}")]
    Failed { code: Option<i32>, output: String },

    /// I/O error while spawning or waiting on the process.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RecognizerError {
    /// Captured process output, when there is any.
    pub fn output(&self) -> Option<&str> {
        match self {
            Self::Failed { output, .. } => Some(output),
            _ => None,
        }
    }
}
