//! Types for the recognition pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::error::PipelineError;

/// Explicit configuration handed to the pipeline at construction time.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory holding downloaded images and the manifest.
    pub data_dir: PathBuf,
    /// Manifest file name inside `data_dir`.
    pub manifest_name: String,
}

impl PipelineConfig {
    /// Creates a config with the default manifest name.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            manifest_name: "imgs2decode.txt".to_string(),
        }
    }

    /// Full path of the manifest file.
    pub fn manifest_path(&self) -> PathBuf {
        self.data_dir.join(&self.manifest_name)
    }
}

/// One image to recognize, as submitted by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRequest {
    /// Opaque caller identifier, echoed back in the result.
    #[serde(alias = "Id")]
    pub id: String,
    /// Location to download the image from.
    #[serde(alias = "Url")]
    pub url: String,
}

impl ImageRequest {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
        }
    }
}

/// Request body accepted by the recognition endpoint.
///
/// Either a bare array of images or an object wrapping one.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BatchRequest {
    List(Vec<ImageRequest>),
    Wrapped {
        #[serde(alias = "items")]
        images: Vec<ImageRequest>,
    },
}

impl BatchRequest {
    /// Unwraps the submitted images in their original order.
    pub fn into_images(self) -> Vec<ImageRequest> {
        match self {
            Self::List(images) | Self::Wrapped { images } => images,
        }
    }
}

/// Transcription for one submitted image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognitionResult {
    pub id: String,
    pub value: String,
}

/// An image moving through one batch.
#[derive(Debug, Clone)]
pub struct BatchItem {
    /// Caller identifier.
    pub id: String,
    /// Where the image is downloaded from.
    pub source_url: String,
    /// File name from the URL, without extension.
    pub derived_name: String,
    /// File extension from the URL, without the dot.
    pub derived_extension: String,
    /// Position of the item in the batch.
    pub ordinal: usize,
    /// Where the image lives while the batch runs.
    pub local_path: PathBuf,
    /// Set once the recognizer output has been correlated.
    pub transcription: Option<String>,
}

impl BatchItem {
    /// Builds an item from a request.
    ///
    /// The local file name is prefixed with the batch id and ordinal so that
    /// duplicate URLs and concurrent batches never share a file.
    pub fn new(
        batch_id: &str,
        ordinal: usize,
        request: ImageRequest,
        data_dir: &Path,
    ) -> Result<Self, PipelineError> {
        let parts = split_url_file_name(&request.url)
            .map(|(name, extension)| (name.to_string(), extension.to_string()));
        let Some((derived_name, derived_extension)) = parts else {
            return Err(PipelineError::MalformedUrl {
                id: request.id,
                url: request.url,
            });
        };
        let local_path = data_dir.join(format!(
            "{}-{}-{}.{}",
            batch_id, ordinal, derived_name, derived_extension
        ));

        Ok(Self {
            id: request.id,
            source_url: request.url,
            derived_name,
            derived_extension,
            ordinal,
            local_path,
            transcription: None,
        })
    }

    /// The local file name without extension, which the recognizer echoes.
    pub fn local_stem(&self) -> &str {
        self.local_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
    }
}

impl From<BatchItem> for RecognitionResult {
    fn from(item: BatchItem) -> Self {
        Self {
            id: item.id,
            value: item.transcription.unwrap_or_default(),
        }
    }
}

/// Splits the last path segment of `url` into name and extension.
///
/// Query strings and fragments are ignored. The split happens on the last `.`.
/// Segments containing control characters are refused, since the name ends up
/// on a line of its own in the manifest.
pub fn split_url_file_name(url: &str) -> Option<(&str, &str)> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let segment = path.rsplit('/').next().unwrap_or(path);
    if segment.chars().any(char::is_control) {
        return None;
    }
    let (name, extension) = segment.rsplit_once('.')?;
    if extension.is_empty() {
        return None;
    }
    Some((name, extension))
}
