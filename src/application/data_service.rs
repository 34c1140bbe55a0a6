// Data service - CRUD use cases over the time-series store
use crate::application::error::GatewayError;
use crate::application::timeseries_repository::{Row, TimeSeriesRepository};
use crate::domain::data_request::{DEFAULT_MEASUREMENT, DataRequest, SENSOR_TAG};
use crate::domain::deletion::{DeletePredicate, DeleteRequest};
use chrono::Utc;
use std::sync::Arc;

const QUERY_RANGE: &str = "-7d";
const QUERY_LIMIT: usize = 100;

#[derive(Clone)]
pub struct DataService {
    repository: Arc<dyn TimeSeriesRepository>,
    bucket: String,
}

impl DataService {
    pub fn new(repository: Arc<dyn TimeSeriesRepository>, bucket: String) -> Self {
        Self { repository, bucket }
    }

    pub async fn create(&self, request: DataRequest) -> Result<(), GatewayError> {
        let point = request.into_point("default")?;
        self.repository.write(&point.to_line_protocol()).await
    }

    /// Points of the last seven days. Query failures yield an empty list.
    pub async fn list(&self) -> Vec<Row> {
        match self.repository.query(&self.recent_data_query()).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!("Query failed, returning no data: {}", e);
                Vec::new()
            }
        }
    }

    /// The store is append-only, so an update writes a fresh point tagged
    /// with the id.
    pub async fn update(&self, id: &str, request: DataRequest) -> Result<(), GatewayError> {
        let point = request.into_point(id)?;
        self.repository.write(&point.to_line_protocol()).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), GatewayError> {
        let predicate = DeletePredicate::new(DEFAULT_MEASUREMENT, SENSOR_TAG, id);
        let request = DeleteRequest::all_time(&predicate, Utc::now());
        tracing::debug!("Deleting with predicate: {}", request.predicate);
        self.repository.delete(&request).await
    }

    fn recent_data_query(&self) -> String {
        format!(
            "from(bucket: \"{}\")\n  |> range(start: {})\n  |> limit(n: {})",
            self.bucket, QUERY_RANGE, QUERY_LIMIT
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{Behavior, InMemoryRepository};

    fn service(repository: Arc<InMemoryRepository>) -> DataService {
        DataService::new(repository, "mybucket".to_string())
    }

    #[tokio::test]
    async fn test_create_writes_default_point() {
        let repo = Arc::new(InMemoryRepository::default());
        service(repo.clone()).create(DataRequest::default()).await.unwrap();

        assert_eq!(repo.writes(), vec!["sensor_data,sensor_id=default value=0"]);
    }

    #[tokio::test]
    async fn test_update_tags_point_with_id() {
        let repo = Arc::new(InMemoryRepository::default());
        let request = DataRequest::from_body(br#"{"fields": {"value": 7}}"#);
        service(repo.clone()).update("s42", request).await.unwrap();

        assert_eq!(repo.writes(), vec!["sensor_data,sensor_id=s42 value=7"]);
    }

    #[tokio::test]
    async fn test_list_queries_last_week() {
        let mut row = Row::new();
        row.insert("_value".to_string(), "1".to_string());
        let repo = Arc::new(InMemoryRepository::with_rows(vec![row.clone()]));

        let rows = service(repo.clone()).list().await;

        assert_eq!(rows, vec![row]);
        assert_eq!(
            repo.queries(),
            vec!["from(bucket: \"mybucket\")\n  |> range(start: -7d)\n  |> limit(n: 100)"]
        );
    }

    #[tokio::test]
    async fn test_list_swallows_query_failure() {
        let repo = Arc::new(InMemoryRepository::failing(Behavior::Unreachable));
        assert!(service(repo).list().await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_matches_sensor_over_all_time() {
        let repo = Arc::new(InMemoryRepository::default());
        service(repo.clone()).delete("s1").await.unwrap();

        let deletes = repo.deletes();
        assert_eq!(deletes.len(), 1);
        assert_eq!(deletes[0].start, "1970-01-01T00:00:00Z");
        assert!(deletes[0].stop.ends_with('Z'));
        assert_eq!(
            deletes[0].predicate,
            r#"_measurement="sensor_data" AND sensor_id="s1""#
        );
    }

    #[tokio::test]
    async fn test_write_rejection_is_reported() {
        let repo = Arc::new(InMemoryRepository::failing(Behavior::Rejected));
        let err = service(repo).create(DataRequest::default()).await.unwrap_err();
        assert!(err.is_rejected());
    }
}
