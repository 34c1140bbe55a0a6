// Application error types
use crate::domain::data_point::PointError;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("invalid data point: {0}")]
    InvalidPoint(#[from] PointError),

    /// The store answered, but not with the expected status.
    #[error("InfluxDB {operation} returned status {status}: {body}")]
    Rejected {
        operation: &'static str,
        status: u16,
        body: String,
    },

    #[error("InfluxDB {operation} request failed: {message}")]
    Transport {
        operation: &'static str,
        message: String,
    },
}

impl GatewayError {
    pub fn is_rejected(&self) -> bool {
        matches!(self, GatewayError::Rejected { .. })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SecretsError {
    #[error("failed to run {binary}: {source}")]
    DecryptSpawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("error decrypting secrets: {stderr}")]
    Decrypt { stderr: String },

    #[error("decrypted secrets are not valid JSON: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    #[error("failed to store {name}: {message}")]
    ParameterStore { name: String, message: String },
}
