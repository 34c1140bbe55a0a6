// In-memory fakes shared by unit tests
use crate::application::error::GatewayError;
use crate::application::timeseries_repository::{Row, TimeSeriesRepository};
use crate::domain::deletion::DeleteRequest;
use async_trait::async_trait;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Behavior {
    #[default]
    Succeed,
    Rejected,
    Unreachable,
}

#[derive(Default)]
pub struct InMemoryRepository {
    behavior: Behavior,
    rows: Vec<Row>,
    writes: Mutex<Vec<String>>,
    queries: Mutex<Vec<String>>,
    deletes: Mutex<Vec<DeleteRequest>>,
}

impl InMemoryRepository {
    pub fn with_rows(rows: Vec<Row>) -> Self {
        Self {
            rows,
            ..Default::default()
        }
    }

    pub fn failing(behavior: Behavior) -> Self {
        Self {
            behavior,
            ..Default::default()
        }
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    pub fn deletes(&self) -> Vec<DeleteRequest> {
        self.deletes.lock().unwrap().clone()
    }

    fn outcome(&self, operation: &'static str) -> Result<(), GatewayError> {
        match self.behavior {
            Behavior::Succeed => Ok(()),
            Behavior::Rejected => Err(GatewayError::Rejected {
                operation,
                status: 400,
                body: "bad request".to_string(),
            }),
            Behavior::Unreachable => Err(GatewayError::Transport {
                operation,
                message: "connection refused".to_string(),
            }),
        }
    }
}

#[async_trait]
impl TimeSeriesRepository for InMemoryRepository {
    async fn write(&self, line_protocol: &str) -> Result<(), GatewayError> {
        self.outcome("write")?;
        self.writes.lock().unwrap().push(line_protocol.to_string());
        Ok(())
    }

    async fn query(&self, flux: &str) -> Result<Vec<Row>, GatewayError> {
        self.queries.lock().unwrap().push(flux.to_string());
        self.outcome("query")?;
        Ok(self.rows.clone())
    }

    async fn delete(&self, request: &DeleteRequest) -> Result<(), GatewayError> {
        self.outcome("delete")?;
        self.deletes.lock().unwrap().push(request.clone());
        Ok(())
    }
}
