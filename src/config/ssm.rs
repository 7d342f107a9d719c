//! AWS Systems Manager Parameter Store client.
//!
//! Credentials and region come from the default AWS provider chain
//! (environment, profile, container or instance metadata). The SDK config is
//! only loaded on first use, so servers without a secret name never touch it.
//! SDK retries are disabled: a transient failure fails startup.

use aws_config::retry::RetryConfig;
use aws_config::{BehaviorVersion, ConfigLoader};
use aws_sdk_ssm::error::DisplayErrorContext;
use aws_sdk_ssm::Client;
use tokio::sync::OnceCell;

use crate::config::params::{ParameterStore, StoredParameter};
use crate::lifecycle::startup::StartupError;

/// Parameter store backed by AWS SSM `GetParameter`.
#[derive(Debug, Default)]
pub struct SsmParameterStore {
    client: OnceCell<Client>,
}

impl SsmParameterStore {
    /// Store whose client is built lazily from the ambient AWS configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store using an already configured client.
    pub fn with_client(client: Client) -> Self {
        Self {
            client: OnceCell::new_with(Some(client)),
        }
    }

    async fn client(&self) -> &Client {
        self.client
            .get_or_init(|| async {
                let sdk_config = config_loader().load().await;
                Client::new(&sdk_config)
            })
            .await
    }
}

/// Ambient AWS configuration with SDK retries turned off.
pub fn config_loader() -> ConfigLoader {
    aws_config::defaults(BehaviorVersion::latest()).retry_config(RetryConfig::disabled())
}

impl ParameterStore for SsmParameterStore {
    async fn get_parameter(&self, name: &str) -> Result<StoredParameter, StartupError> {
        let output = self
            .client()
            .await
            .get_parameter()
            .name(name)
            .send()
            .await
            .map_err(|e| {
                StartupError::ConfigFetch(format!(
                    "failed to get parameter '{}': {}",
                    name,
                    DisplayErrorContext(&e)
                ))
            })?;

        let parameter = output.parameter().ok_or_else(|| {
            StartupError::ConfigFetch(format!("parameter '{}' not found", name))
        })?;

        let kind = parameter
            .r#type()
            .map(|t| t.as_str().to_string())
            .unwrap_or_default();

        tracing::debug!(name = %name, kind = %kind, "Fetched parameter");

        Ok(StoredParameter {
            kind,
            value: parameter.value().unwrap_or_default().to_string(),
        })
    }
}
