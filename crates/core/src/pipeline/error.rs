//! Error types for the recognition pipeline.

use thiserror::Error;

use super::correlator::CorrelationError;
use super::manifest::ManifestError;
use crate::fetcher::FetchError;
use crate::normalizer::NormalizeError;
use crate::recognizer::RecognizerError;

/// A batch-level failure. Any of these aborts the whole batch.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The batch had no images in it.
    #[error("Batch contains no images")]
    EmptyBatch,

    /// An image URL has no file extension in its last segment.
    #[error("Malformed URL for image {id}: {url}")]
    MalformedUrl { id: String, url: String },

    /// Downloading an image failed.
    #[error("Failed downloading image {id}: {source}")]
    FetchFailed {
        id: String,
        #[source]
        source: FetchError,
    },

    /// Resizing an image failed.
    #[error("Failed processing image {id}: {source}")]
    NormalizeFailed {
        id: String,
        #[source]
        source: NormalizeError,
    },

    /// The manifest could not be written.
    #[error("Failed preparing recognition: {0}")]
    ManifestWriteFailed(#[from] ManifestError),

    /// The recognizer could not be run or exited unsuccessfully.
    #[error("Recognizer failed: {0}")]
    RecognizerFailed(#[from] RecognizerError),

    /// The recognizer printed fewer lines than there are images.
    #[error("Recognizer returned {actual} lines for {expected} images")]
    OutputCountMismatch { expected: usize, actual: usize },
}

impl From<CorrelationError> for PipelineError {
    fn from(e: CorrelationError) -> Self {
        match e {
            CorrelationError::OutputCountMismatch { expected, actual } => {
                Self::OutputCountMismatch { expected, actual }
            }
        }
    }
}

impl PipelineError {
    /// Name of the stage that failed, used in logs and metric labels.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::EmptyBatch | Self::MalformedUrl { .. } => "request",
            Self::FetchFailed { .. } => "fetch",
            Self::NormalizeFailed { .. } => "normalize",
            Self::ManifestWriteFailed(_) => "manifest",
            Self::RecognizerFailed(_) => "recognize",
            Self::OutputCountMismatch { .. } => "correlate",
        }
    }

    /// Identifier of the item that caused the failure, if it is item-specific.
    pub fn item_id(&self) -> Option<&str> {
        match self {
            Self::MalformedUrl { id, .. }
            | Self::FetchFailed { id, .. }
            | Self::NormalizeFailed { id, .. } => Some(id),
            _ => None,
        }
    }

    /// Whether the failure is caused by the shape of the request.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::EmptyBatch | Self::MalformedUrl { .. })
    }
}
