//! Response envelope shared by every module endpoint.
//!
//! All JSON bodies carry a `status` of `success`, `fail` or `server error`,
//! an optional human readable `message` and an optional `data` payload.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Outcome category reported in the `status` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResponseStatus {
    #[serde(rename = "success")]
    Success,
    #[serde(rename = "fail")]
    Fail,
    #[serde(rename = "server error")]
    ServerError,
}

/// Serialized body of every API response.
#[derive(Debug, Serialize)]
pub struct StatusBody<T: Serialize> {
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Successful API response: status code plus envelope.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    status_code: StatusCode,
    body: StatusBody<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// `200 OK` carrying only `data`
    pub fn ok(data: T) -> Self {
        Self::success(StatusCode::OK, None, Some(data))
    }

    /// `201 Created` carrying a message and `data`
    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self::success(StatusCode::CREATED, Some(message.into()), Some(data))
    }

    fn success(status_code: StatusCode, message: Option<String>, data: Option<T>) -> Self {
        Self {
            status_code,
            body: StatusBody {
                status: ResponseStatus::Success,
                message,
                data,
            },
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }
}

impl ApiResponse<()> {
    /// `200 OK` carrying only a message
    pub fn message(message: impl Into<String>) -> Self {
        Self::success(StatusCode::OK, Some(message.into()), None)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status_code, Json(self.body)).into_response()
    }
}
