//! Pipeline module for batch handwritten text recognition.
//!
//! This module provides the `RecognitionPipeline` which, for one batch:
//! - Downloads every image and resizes it to the model's input height
//! - Writes the manifest and runs the recognizer once over the whole batch
//! - Maps output lines back to images by position
//! - Deletes the local image files
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use htr_core::pipeline::{ImageRequest, PipelineConfig, RecognitionPipeline};
//! use htr_core::{HttpFetcher, ImageMagickNormalizer, LaiaRecognizer};
//!
//! let pipeline = RecognitionPipeline::new(
//!     PipelineConfig::new("data"),
//!     Arc::new(HttpFetcher::new(&config.fetcher)?),
//!     Arc::new(ImageMagickNormalizer::new(config.normalizer.clone())),
//!     Arc::new(LaiaRecognizer::new(config.recognizer.clone())),
//! );
//!
//! let results = pipeline
//!     .process(vec![ImageRequest::new("1", "http://example.com/line.png")])
//!     .await?;
//! println!("{}: {}", results[0].id, results[0].value);
//! ```

mod correlator;
mod error;
mod manifest;
mod orchestrator;
mod types;

pub use correlator::{clean_line, correlate, CorrelationError, SPACE_PLACEHOLDER};
pub use error::PipelineError;
pub use manifest::{ManifestError, ManifestWriter};
pub use orchestrator::RecognitionPipeline;
pub use types::{
    split_url_file_name, BatchItem, BatchRequest, ImageRequest, PipelineConfig,
    RecognitionResult,
};
