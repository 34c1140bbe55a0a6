// SOPS-backed secrets decryption
use crate::application::error::SecretsError;
use crate::application::secrets_publisher::SecretsDecryptor;
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;

#[derive(Debug, Clone)]
pub struct SopsDecryptor {
    binary: String,
}

impl SopsDecryptor {
    pub fn new(binary: String) -> Self {
        Self { binary }
    }
}

#[async_trait]
impl SecretsDecryptor for SopsDecryptor {
    async fn decrypt(&self, path: &Path) -> Result<String, SecretsError> {
        tracing::debug!("Running {} --decrypt on {}", self.binary, path.display());
        let output = Command::new(&self.binary)
            .arg("--decrypt")
            .args(["--output-type", "json"])
            .arg(path)
            .output()
            .await
            .map_err(|source| SecretsError::DecryptSpawn {
                binary: self.binary.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(SecretsError::Decrypt {
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
