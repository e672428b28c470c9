//! Error types for the normalizer module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while resizing an image.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The `convert` binary could not be found.
    #[error("convert not found at path: {path}")]
    NotFound { path: PathBuf },

    /// The resize process exited unsuccessfully.
    #[error("Resize failed with exit code {code:?}: {output}")]
    Failed { code: Option<i32>, output: String },

    /// I/O error while spawning or waiting on the process.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
