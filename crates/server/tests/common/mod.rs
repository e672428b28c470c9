//! Common test utilities for API testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with mock collaborators injected, so the full recognition flow runs
//! without network access, ImageMagick or Laia.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use htr_core::testing::{MockFetcher, MockNormalizer, MockRecognizer};
use htr_core::{Config, RecognitionPipeline, StorageConfig};
use htr_server::state::AppState;

/// Re-export fixtures for test convenience
pub use htr_core::testing::fixtures;

/// Test fixture for API testing with mock dependencies.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_recognize() {
///     let fixture = TestFixture::new();
///
///     let response = fixture.post("/api/v1/recognize", json!([
///         { "id": "1", "url": "http://x/line.png" }
///     ])).await;
///
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock fetcher - configure failing URLs
    pub fetcher: MockFetcher,
    /// Mock normalizer - configure failing images
    pub normalizer: MockNormalizer,
    /// Mock recognizer - configure output, inspect manifests
    pub recognizer: MockRecognizer,
    /// Data directory images are downloaded into
    pub data_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    /// Parsed JSON body, or `Null` when the body is not JSON.
    pub body: Value,
    /// Raw body text.
    pub text: String,
}

impl TestFixture {
    /// Create a fixture whose recognizer echoes each image's name back.
    pub fn new() -> Self {
        Self::with_recognizer(MockRecognizer::echoing())
    }

    /// Create a fixture with a specific recognizer.
    pub fn with_recognizer(recognizer: MockRecognizer) -> Self {
        let data_dir = TempDir::new().expect("Failed to create temp dir");

        let fetcher = MockFetcher::new();
        let normalizer = MockNormalizer::new();

        let config = Config {
            storage: StorageConfig {
                data_dir: data_dir.path().to_path_buf(),
                ..Default::default()
            },
            ..Default::default()
        };

        let pipeline = Arc::new(RecognitionPipeline::new(
            config.pipeline_config(),
            Arc::new(fetcher.clone()),
            Arc::new(normalizer.clone()),
            Arc::new(recognizer.clone()),
        ));

        let state = Arc::new(AppState::new(config, pipeline));
        let router = htr_server::api::create_router(state);

        Self {
            router,
            fetcher,
            normalizer,
            recognizer,
            data_dir,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        let body = serde_json::to_string(&body).unwrap();
        self.request("POST", path, Some(&body)).await
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a GET request that carries a body.
    pub async fn get_with_body(&self, path: &str, body: Value) -> TestResponse {
        let body = serde_json::to_string(&body).unwrap();
        self.request("GET", path, Some(&body)).await
    }

    /// Image files left in the data directory, ignoring the manifest.
    pub fn leftover_images(&self) -> Vec<String> {
        let manifest = StorageConfig::default().manifest_name;
        std::fs::read_dir(self.data_dir.path())
            .expect("Failed to read data dir")
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| *name != manifest)
            .collect()
    }

    async fn request(&self, method: &str, path: &str, body: Option<&str>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = match body {
            Some(text) => {
                request_builder = request_builder.header("Content-Type", "application/json");
                Body::from(text.to_string())
            }
            None => Body::empty(),
        };

        let request = request_builder.body(body).unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body_bytes).into_owned();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body, text }
    }
}
