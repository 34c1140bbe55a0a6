// HTTP response utilities for JSON bodies
use crate::application::error::GatewayError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

/// Serialize `body` as JSON with the given status
pub fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, Json(body)).into_response()
}

pub fn message_response(status: StatusCode, message: impl Into<String>) -> Response {
    let message: String = message.into();
    json_response(status, json!({ "message": message }))
}

pub fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    let error: String = error.into();
    json_response(status, json!({ "error": error }))
}

pub fn not_found_response() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

/// A write or delete the store refused maps to `failure_message`; anything
/// else is reported as an internal error carrying its message.
pub fn gateway_failure_response(err: &GatewayError, failure_message: &str) -> Response {
    if err.is_rejected() {
        error_response(StatusCode::INTERNAL_SERVER_ERROR, failure_message)
    } else {
        tracing::error!("Error: {}", err);
        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Internal server error: {}", err),
        )
    }
}
