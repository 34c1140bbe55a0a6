// AWS SSM Parameter Store implementation
use crate::application::error::SecretsError;
use crate::application::secrets_publisher::ParameterStore;
use async_trait::async_trait;
use aws_sdk_ssm::types::ParameterType;

#[derive(Debug, Clone)]
pub struct SsmParameterStore {
    client: aws_sdk_ssm::Client,
}

impl SsmParameterStore {
    pub fn new(client: aws_sdk_ssm::Client) -> Self {
        Self { client }
    }

    /// Build a client from the default AWS credential and region chain
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(aws_sdk_ssm::Client::new(&config))
    }
}

#[async_trait]
impl ParameterStore for SsmParameterStore {
    async fn put_secure(
        &self,
        name: &str,
        value: &str,
        description: &str,
    ) -> Result<(), SecretsError> {
        self.client
            .put_parameter()
            .name(name)
            .value(value)
            .r#type(ParameterType::SecureString)
            .overwrite(true)
            .description(description)
            .send()
            .await
            .map_err(|e| SecretsError::ParameterStore {
                name: name.to_string(),
                message: aws_sdk_ssm::error::DisplayErrorContext(&e).to_string(),
            })?;

        Ok(())
    }
}
