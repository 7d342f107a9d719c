//! Startup params resolution.
//!
//! # Responsibilities
//! - Pick the params source (parameter store, inline JSON, or nothing)
//! - Fetch and validate the stored parameter
//! - Parse the JSON text into an opaque value
//!
//! # Design Decisions
//! - Exactly one fetch attempt, bounded by a timeout; SDK retries are
//!   disabled in `ssm.rs`
//! - The store sits behind a trait so resolution is testable offline

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tokio::time::timeout;

use crate::config::schema::ServerConfig;
use crate::lifecycle::startup::StartupError;

/// Stored type a parameter must have to be accepted.
pub const STRING_PARAMETER_TYPE: &str = "String";

/// Opaque params embedded verbatim in every echo response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StartupParams(Value);

impl StartupParams {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl Default for StartupParams {
    fn default() -> Self {
        Self(Value::Object(Default::default()))
    }
}

/// A parameter as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredParameter {
    /// Stored type name, e.g. "String" or "SecureString".
    pub kind: String,
    pub value: String,
}

/// Remote key-value lookup used to seed the startup params.
pub trait ParameterStore {
    /// Fetch a single parameter by name.
    fn get_parameter(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<StoredParameter, StartupError>> + Send;
}

/// Resolve the startup params from the configured source.
///
/// The store is only consulted when a secret name is configured.
pub async fn resolve_params<S: ParameterStore>(
    config: &ServerConfig,
    store: &S,
) -> Result<StartupParams, StartupError> {
    if let Some(name) = &config.secret_name {
        tracing::info!("Getting secret JSON...");
        let limit = Duration::from_secs(config.secret_fetch_timeout_secs);
        let parameter = timeout(limit, store.get_parameter(name))
            .await
            .map_err(|_| {
                StartupError::ConfigFetch(format!(
                    "parameter store call for '{}' timed out after {} seconds",
                    name, config.secret_fetch_timeout_secs
                ))
            })??;
        return params_from_parameter(parameter);
    }

    match &config.secret_json {
        Some(json) => parse_params(json),
        None => Ok(StartupParams::default()),
    }
}

/// Validate a fetched parameter and parse its value.
pub fn params_from_parameter(parameter: StoredParameter) -> Result<StartupParams, StartupError> {
    if parameter.kind != STRING_PARAMETER_TYPE {
        return Err(StartupError::ConfigFetch(format!(
            "Param must be \"{}\" type: {}",
            STRING_PARAMETER_TYPE, parameter.kind
        )));
    }
    parse_params(&parameter.value)
}

/// Parse JSON text into startup params.
pub fn parse_params(json: &str) -> Result<StartupParams, StartupError> {
    serde_json::from_str(json)
        .map(StartupParams)
        .map_err(StartupError::ConfigParse)
}
