// Route table for the data API
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    create_data, delete_data, health_check, list_data, not_found, update_data,
};
use axum::{
    Router,
    routing::{any, get, put},
};
use std::sync::Arc;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", any(health_check))
        .route("/data", get(list_data).post(create_data).fallback(not_found))
        .route("/data/*id", put(update_data).delete(delete_data).fallback(not_found))
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::data_service::DataService;
    use crate::application::testing::{Behavior, InMemoryRepository};
    use crate::application::timeseries_repository::Row;
    use axum::{
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode, header},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    fn app(repo: Arc<InMemoryRepository>) -> Router {
        let data_service = DataService::new(repo, "mybucket".to_string());
        build_router(Arc::new(AppState { data_service }))
    }

    async fn call(
        router: Router,
        method: Method,
        uri: &str,
        body: &'static str,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::from(body))
            .unwrap();
        let response = router.oneshot(request).await.unwrap();

        let status = response.status();
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_is_always_ok() {
        let (status, body) = call(
            app(Arc::new(InMemoryRepository::failing(Behavior::Unreachable))),
            Method::GET,
            "/health",
            "",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        let timestamp = body["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
    }

    #[tokio::test]
    async fn test_unknown_paths_are_not_found() {
        let repo = Arc::new(InMemoryRepository::default());
        for (method, uri) in [
            (Method::GET, "/"),
            (Method::GET, "/nope"),
            (Method::PATCH, "/data"),
            (Method::DELETE, "/data"),
            (Method::GET, "/data/s1"),
            (Method::POST, "/data/s1"),
        ] {
            let (status, body) = call(app(repo.clone()), method, uri, "").await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(body["error"], "Not found");
        }
        assert!(repo.writes().is_empty());
    }

    #[tokio::test]
    async fn test_post_creates_point() {
        let repo = Arc::new(InMemoryRepository::default());
        let (status, body) = call(
            app(repo.clone()),
            Method::POST,
            "/data",
            r#"{"measurement": "temp", "tags": {"sensor_id": "a"}, "fields": {"value": 20.5}}"#,
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Data created successfully");
        assert_eq!(repo.writes(), vec!["temp,sensor_id=a value=20.5"]);
    }

    #[tokio::test]
    async fn test_malformed_body_uses_defaults() {
        let repo = Arc::new(InMemoryRepository::default());
        let (status, _) = call(app(repo.clone()), Method::POST, "/data", "{oops").await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(repo.writes(), vec!["sensor_data,sensor_id=default value=0"]);
    }

    #[tokio::test]
    async fn test_write_failure_is_500() {
        let repo = Arc::new(InMemoryRepository::failing(Behavior::Rejected));
        let (status, body) = call(app(repo), Method::POST, "/data", "").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to write data");
    }

    #[tokio::test]
    async fn test_unreachable_store_is_internal_error() {
        let repo = Arc::new(InMemoryRepository::failing(Behavior::Unreachable));
        let (status, body) = call(app(repo), Method::PUT, "/data/s1", "").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["error"],
            "Internal server error: InfluxDB write request failed: connection refused"
        );
    }

    #[tokio::test]
    async fn test_invalid_point_is_internal_error() {
        let repo = Arc::new(InMemoryRepository::default());
        let (status, body) = call(
            app(repo.clone()),
            Method::POST,
            "/data",
            r#"{"fields": {"value": null}}"#,
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(
            body["error"]
                .as_str()
                .unwrap()
                .starts_with("Internal server error: invalid data point")
        );
        assert!(repo.writes().is_empty());
    }

    #[tokio::test]
    async fn test_line_break_in_tag_writes_nothing() {
        let repo = Arc::new(InMemoryRepository::default());
        let (status, body) = call(
            app(repo.clone()),
            Method::POST,
            "/data",
            r#"{"tags": {"sensor_id": "a\nevil value=666"}, "fields": {"value": 1}}"#,
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["error"],
            "Internal server error: invalid data point: line break in tag 'sensor_id'"
        );
        assert!(repo.writes().is_empty());
    }

    #[tokio::test]
    async fn test_get_lists_rows() {
        let mut row = Row::new();
        row.insert("_field".to_string(), "value".to_string());
        row.insert("_value".to_string(), "3".to_string());
        let repo = Arc::new(InMemoryRepository::with_rows(vec![row]));

        let (status, body) = call(app(repo), Method::GET, "/data", "").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["_value"], "3");
        assert_eq!(body["data"][0]["_field"], "value");
    }

    #[tokio::test]
    async fn test_get_returns_empty_list_on_query_failure() {
        let repo = Arc::new(InMemoryRepository::failing(Behavior::Rejected));
        let (status, body) = call(app(repo), Method::GET, "/data", "").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], Value::Array(vec![]));
    }

    #[tokio::test]
    async fn test_put_tags_point_with_id() {
        let repo = Arc::new(InMemoryRepository::default());
        let (status, body) = call(
            app(repo.clone()),
            Method::PUT,
            "/data/s7",
            r#"{"fields": {"value": 1}}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Data s7 updated successfully");
        assert_eq!(repo.writes(), vec!["sensor_data,sensor_id=s7 value=1"]);
    }

    #[tokio::test]
    async fn test_put_failure_is_500() {
        let repo = Arc::new(InMemoryRepository::failing(Behavior::Rejected));
        let (status, body) = call(app(repo), Method::PUT, "/data/s7", "").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to update data");
    }

    #[tokio::test]
    async fn test_delete_uses_last_path_segment() {
        let repo = Arc::new(InMemoryRepository::default());
        let (status, body) = call(app(repo.clone()), Method::DELETE, "/data/site/s3", "").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Data s3 deleted successfully");
        let deletes = repo.deletes();
        assert_eq!(
            deletes[0].predicate,
            r#"_measurement="sensor_data" AND sensor_id="s3""#
        );
    }

    #[tokio::test]
    async fn test_delete_failure_is_500() {
        let repo = Arc::new(InMemoryRepository::failing(Behavior::Rejected));
        let (status, body) = call(app(repo), Method::DELETE, "/data/s3", "").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to delete data");
    }
}
