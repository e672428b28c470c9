//! Batch recognition endpoint.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::{debug, warn};

use htr_core::{BatchRequest, PipelineError};

use crate::state::AppState;

/// Error response for the recognition endpoint. Always plain text.
#[derive(Debug)]
pub enum RecognizeError {
    /// The body could not be read as a batch.
    BadRequest(String),
    /// The pipeline rejected or failed the batch.
    Pipeline(PipelineError),
}

impl From<PipelineError> for RecognizeError {
    fn from(e: PipelineError) -> Self {
        Self::Pipeline(e)
    }
}

impl IntoResponse for RecognizeError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            Self::Pipeline(e) => {
                let status = if e.is_client_error() {
                    StatusCode::BAD_REQUEST
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR
                };
                (status, describe(&e)).into_response()
            }
        }
    }
}

/// Short diagnostic naming the failing stage and, when known, the item.
fn describe(e: &PipelineError) -> String {
    match e.item_id() {
        Some(id) => format!("{} failed for image {}: {}", e.stage(), id, e),
        None => format!("{} failed: {}", e.stage(), e),
    }
}

/// Recognize a batch of images.
///
/// Accepts either a JSON array of `{id, url}` objects or an object with an
/// `images` array. Responds with `[{id, value}]` in request order.
pub async fn recognize(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<impl IntoResponse, RecognizeError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(RecognizeError::BadRequest("Request body is empty".to_string()));
    }

    let request: BatchRequest = serde_json::from_slice(&body).map_err(|e| {
        debug!(error = %e, "Rejected unparseable batch request");
        RecognizeError::BadRequest(format!("Invalid batch request: {}", e))
    })?;

    let results = state
        .pipeline()
        .process(request.into_images())
        .await
        .inspect_err(|e| warn!(stage = e.stage(), error = %e, "Batch failed"))?;

    Ok(Json(results))
}
