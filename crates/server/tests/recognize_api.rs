//! API tests for the recognition endpoint and service routes.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{fixtures, TestFixture};
use htr_core::testing::MockRecognizer;

#[tokio::test]
async fn test_recognize_returns_results_in_request_order() {
    let fixture = TestFixture::new();

    let response = fixture
        .post("/api/v1/recognize", json!(fixtures::image_requests(3)))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!([
            { "id": "0", "value": "line0" },
            { "id": "1", "value": "line1" },
            { "id": "2", "value": "line2" },
        ])
    );
    assert_eq!(fixture.recognizer.invocation_count().await, 1);
    assert!(fixture.leftover_images().is_empty());
}

#[tokio::test]
async fn test_recognize_single_image_example() {
    let fixture =
        TestFixture::with_recognizer(MockRecognizer::with_output("test translated text\n"));

    let response = fixture
        .post(
            "/api/v1/recognize",
            json!([{ "id": "1", "url": "http://x/test.png" }]),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!([{ "id": "1", "value": "translated text" }]));

    let manifests = fixture.recognizer.recorded_manifests().await;
    assert_eq!(manifests.len(), 1);
    assert!(manifests[0][0].ends_with("test.png"));
}

#[tokio::test]
async fn test_recognize_accepts_wrapped_body() {
    let fixture = TestFixture::new();

    let response = fixture
        .post(
            "/api/v1/recognize",
            json!({ "images": [{ "id": "a", "url": "http://x/first.jpg" }] }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!([{ "id": "a", "value": "first" }]));

    let response = fixture
        .post(
            "/api/v1/recognize",
            json!({ "items": [{ "Id": "b", "Url": "http://x/second.jpg" }] }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!([{ "id": "b", "value": "second" }]));
}

#[tokio::test]
async fn test_recognize_over_get() {
    let fixture = TestFixture::new();

    let response = fixture
        .get_with_body(
            "/api/v1/recognize",
            json!([{ "id": "1", "url": "http://x/page.png" }]),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!([{ "id": "1", "value": "page" }]));
}

#[tokio::test]
async fn test_recognize_rejects_empty_body() {
    let fixture = TestFixture::new();

    let response = fixture.post_raw("/api/v1/recognize", "").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = fixture.get("/api/v1/recognize").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    assert_eq!(fixture.recognizer.invocation_count().await, 0);
}

#[tokio::test]
async fn test_recognize_rejects_empty_batch() {
    let fixture = TestFixture::new();

    let response = fixture.post("/api/v1/recognize", json!([])).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.text.contains("no images"));
    assert_eq!(fixture.fetcher.fetch_count().await, 0);
}

#[tokio::test]
async fn test_recognize_rejects_malformed_json() {
    let fixture = TestFixture::new();

    let response = fixture
        .post_raw("/api/v1/recognize", "[{\"id\": \"1\", \"url\": ")
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = fixture
        .post("/api/v1/recognize", json!({ "unexpected": true }))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_recognize_rejects_url_without_extension() {
    let fixture = TestFixture::new();

    let response = fixture
        .post(
            "/api/v1/recognize",
            json!([{ "id": "7", "url": "http://x/no-extension" }]),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.text.contains('7'));
    assert_eq!(fixture.fetcher.fetch_count().await, 0);
}

#[tokio::test]
async fn test_fetch_failure_is_server_error() {
    let fixture = TestFixture::new();
    fixture.fetcher.fail_url("http://x/missing.png").await;

    let response = fixture
        .post(
            "/api/v1/recognize",
            json!([
                { "id": "1", "url": "http://x/ok.png" },
                { "id": "2", "url": "http://x/missing.png" },
            ]),
        )
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.text.starts_with("fetch failed for image 2"));
    assert_eq!(fixture.recognizer.invocation_count().await, 0);
}

#[tokio::test]
async fn test_normalize_failure_is_server_error() {
    let fixture = TestFixture::new();
    fixture.normalizer.fail_matching("broken").await;

    let response = fixture
        .post(
            "/api/v1/recognize",
            json!([{ "id": "9", "url": "http://x/broken.png" }]),
        )
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.text.starts_with("normalize failed for image 9"));
}

#[tokio::test]
async fn test_recognizer_failure_is_server_error() {
    let fixture = TestFixture::with_recognizer(MockRecognizer::failing("model not loaded"));

    let response = fixture
        .post(
            "/api/v1/recognize",
            json!([{ "id": "1", "url": "http://x/line.png" }]),
        )
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.text.starts_with("recognize failed"));
    assert!(fixture.leftover_images().is_empty());
}

#[tokio::test]
async fn test_short_output_is_server_error() {
    let fixture = TestFixture::with_recognizer(MockRecognizer::with_output("a o n e\n"));

    let response = fixture
        .post(
            "/api/v1/recognize",
            json!([
                { "id": "1", "url": "http://x/a.png" },
                { "id": "2", "url": "http://x/b.png" },
            ]),
        )
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.text.starts_with("correlate failed"));
}

#[tokio::test]
async fn test_home() {
    let fixture = TestFixture::new();

    let response = fixture.get("/").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text.contains("running"));
}

#[tokio::test]
async fn test_legacy_paths() {
    let fixture = TestFixture::new();

    let response = fixture.get("/laiaDaemon").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text.contains("running"));

    let response = fixture
        .get_with_body(
            "/laiaDaemon/recognizeImgs",
            json!([{ "Id": "1", "Url": "http://x/old.png" }]),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!([{ "id": "1", "value": "old" }]));

    let response = fixture.post_raw("/laiaDaemon/recognizeImgs", "").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health() {
    let fixture = TestFixture::new();

    let response = fixture.get("/api/v1/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_config_reports_effective_values() {
    let fixture = TestFixture::new();

    let response = fixture.get("/api/v1/config").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["normalizer"]["img_height"], json!(64));
    assert_eq!(response.body["storage"]["manifest_name"], json!("imgs2decode.txt"));
    assert_eq!(
        response.body["storage"]["data_dir"],
        json!(fixture.data_dir.path().to_string_lossy())
    );
}

#[tokio::test]
async fn test_metrics_after_batch() {
    let fixture = TestFixture::new();

    fixture
        .post(
            "/api/v1/recognize",
            json!([{ "id": "1", "url": "http://x/line.png" }]),
        )
        .await;
    let response = fixture.get("/metrics").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text.contains("htr_batches_total"));
    assert!(response.text.contains("htr_http_requests_total"));
    assert!(response.text.contains("/api/v1/recognize"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let fixture = TestFixture::new();

    let response = fixture.get("/api/v1/unknown").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
