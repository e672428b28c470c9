//! Testing utilities and mock implementations of the pipeline collaborators.
//!
//! The mocks never touch the network or spawn processes, so a full
//! `RecognitionPipeline` can run inside a temp directory.
//!
//! # Example
//!
//! ```rust,ignore
//! use htr_core::testing::{MockFetcher, MockNormalizer, MockRecognizer};
//!
//! let fetcher = MockFetcher::new();
//! let recognizer = MockRecognizer::echoing();
//!
//! fetcher.fail_url("http://x/broken.png").await;
//!
//! // Build a RecognitionPipeline with Arc::new(fetcher.clone()), ...
//! ```

mod mock_fetcher;
mod mock_normalizer;
mod mock_recognizer;

pub use mock_fetcher::MockFetcher;
pub use mock_normalizer::MockNormalizer;
pub use mock_recognizer::{encode_spaced, MockRecognizer};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::pipeline::ImageRequest;

    /// Builds `count` requests with ids `"0".."count"` and distinct URLs.
    pub fn image_requests(count: usize) -> Vec<ImageRequest> {
        (0..count)
            .map(|i| ImageRequest::new(i.to_string(), format!("http://images.test/line{}.png", i)))
            .collect()
    }
}
