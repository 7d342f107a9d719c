//! Configuration schema definitions.
//!
//! All types derive Serde traits so a resolved configuration can be logged
//! or dumped as JSON.

use serde::{Deserialize, Serialize};

/// Default listening port.
pub const DEFAULT_PORT: u16 = 8000;

/// Root configuration for the diagnostic server.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Prefix used in the greeting text and log lines (e.g., "/api").
    pub base_path: String,

    /// TCP port to listen on.
    pub port: u16,

    /// Parameter store name holding the startup params as JSON text.
    pub secret_name: Option<String>,

    /// Inline JSON used when no secret name is configured.
    pub secret_json: Option<String>,

    /// Upper bound on the single parameter store call, in seconds.
    pub secret_fetch_timeout_secs: u64,

    /// How long in-flight requests may drain after a termination signal.
    pub shutdown_grace_secs: u64,
}

impl ServerConfig {
    /// Address the listener binds to.
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_path: "/".to_string(),
            port: DEFAULT_PORT,
            secret_name: None,
            secret_json: None,
            secret_fetch_timeout_secs: 10,
            shutdown_grace_secs: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.base_path, "/");
        assert_eq!(config.port, 8000);
        assert!(config.secret_name.is_none());
        assert!(config.secret_json.is_none());
        assert_eq!(config.bind_address(), "0.0.0.0:8000");
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let config: ServerConfig = serde_json::from_str(r#"{"port": 9000}"#).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.base_path, "/");
        assert_eq!(config.secret_fetch_timeout_secs, 10);
    }
}
