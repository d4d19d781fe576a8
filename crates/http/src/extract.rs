//! Extractors whose rejections use the shared response envelope.

use axum::extract::{rejection::JsonRejection, FromRequest};

use crate::error::AppError;

/// JSON body extractor. Malformed or mistyped bodies are rejected with
/// `400 {"status": "fail", ...}` instead of Axum's plain-text response.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(rejection.body_text())
    }
}
