// HTTP request handlers
use crate::domain::data_request::DataRequest;
use crate::infrastructure::http_response::{
    gateway_failure_response, json_response, message_response, not_found_response,
};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use bytes::Bytes;
use chrono::{SecondsFormat, Utc};
use serde_json::json;
use std::sync::Arc;

/// Liveness check
pub async fn health_check() -> Response {
    json_response(
        StatusCode::OK,
        json!({
            "status": "healthy",
            "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        }),
    )
}

/// POST /data
pub async fn create_data(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let request = DataRequest::from_body(&body);

    match state.data_service.create(request).await {
        Ok(()) => message_response(StatusCode::CREATED, "Data created successfully"),
        Err(e) => gateway_failure_response(&e, "Failed to write data"),
    }
}

/// GET /data
pub async fn list_data(State(state): State<Arc<AppState>>) -> Response {
    let rows = state.data_service.list().await;
    json_response(StatusCode::OK, json!({ "data": rows }))
}

/// PUT /data/{id}
pub async fn update_data(
    Path(rest): Path<String>,
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Response {
    let id = last_segment(&rest);
    let request = DataRequest::from_body(&body);

    match state.data_service.update(id, request).await {
        Ok(()) => message_response(StatusCode::OK, format!("Data {} updated successfully", id)),
        Err(e) => gateway_failure_response(&e, "Failed to update data"),
    }
}

/// DELETE /data/{id}
pub async fn delete_data(
    Path(rest): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let id = last_segment(&rest);

    match state.data_service.delete(id).await {
        Ok(()) => message_response(StatusCode::OK, format!("Data {} deleted successfully", id)),
        Err(e) => gateway_failure_response(&e, "Failed to delete data"),
    }
}

pub async fn not_found() -> Response {
    not_found_response()
}

/// `/data/a/b` addresses `b`
fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
