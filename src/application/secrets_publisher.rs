// Secrets publisher - decrypt the secrets file, then push it to the parameter store
use crate::application::error::SecretsError;
use crate::domain::secrets::{InfluxSecrets, PARAMETER_DESCRIPTION};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

#[async_trait]
pub trait SecretsDecryptor: Send + Sync {
    /// Decrypt a file and return its contents as a JSON document
    async fn decrypt(&self, path: &Path) -> Result<String, SecretsError>;
}

#[async_trait]
pub trait ParameterStore: Send + Sync {
    /// Create or overwrite an encrypted parameter
    async fn put_secure(
        &self,
        name: &str,
        value: &str,
        description: &str,
    ) -> Result<(), SecretsError>;
}

#[derive(Clone)]
pub struct SecretsPublisher {
    decryptor: Arc<dyn SecretsDecryptor>,
    store: Arc<dyn ParameterStore>,
}

impl SecretsPublisher {
    pub fn new(decryptor: Arc<dyn SecretsDecryptor>, store: Arc<dyn ParameterStore>) -> Self {
        Self { decryptor, store }
    }

    pub async fn decrypt(&self, path: &Path) -> Result<InfluxSecrets, SecretsError> {
        let plaintext = self.decryptor.decrypt(path).await?;
        let document: serde_json::Value = serde_json::from_str(&plaintext)?;
        Ok(InfluxSecrets::from_document(&document))
    }

    /// Store every parameter in order, stopping at the first failure.
    /// `on_stored` runs after each successful write.
    pub async fn publish(
        &self,
        secrets: &InfluxSecrets,
        mut on_stored: impl FnMut(&'static str) + Send,
    ) -> Result<Vec<&'static str>, SecretsError> {
        let mut stored = Vec::new();
        for parameter in secrets.parameters() {
            self.store
                .put_secure(parameter.name, &parameter.value, PARAMETER_DESCRIPTION)
                .await?;
            tracing::debug!("Stored {}", parameter.name);
            on_stored(parameter.name);
            stored.push(parameter.name);
        }
        Ok(stored)
    }
}
