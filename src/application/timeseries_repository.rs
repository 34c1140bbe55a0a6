// Repository trait for time-series data access
use crate::application::error::GatewayError;
use crate::domain::deletion::DeleteRequest;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// One result row, keyed by column name.
pub type Row = BTreeMap<String, String>;

#[async_trait]
pub trait TimeSeriesRepository: Send + Sync {
    /// Write line protocol into the configured bucket
    async fn write(&self, line_protocol: &str) -> Result<(), GatewayError>;

    /// Run a Flux query and return its rows
    async fn query(&self, flux: &str) -> Result<Vec<Row>, GatewayError>;

    /// Delete the points matched by a predicate within a time range
    async fn delete(&self, request: &DeleteRequest) -> Result<(), GatewayError>;
}
