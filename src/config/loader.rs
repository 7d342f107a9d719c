//! Configuration loading from command-line flags and the environment.
//!
//! Every flag falls back to an environment variable, so the server can be
//! configured purely through its container environment.

use clap::Parser;

use crate::config::schema::{ServerConfig, DEFAULT_PORT};

/// Command-line and environment arguments for the server binary.
#[derive(Debug, Parser)]
#[command(name = "diagnostic-server")]
#[command(about = "Echoes request metadata and serves a togglable health check", long_about = None)]
pub struct ServerArgs {
    /// Prefix used in the greeting text
    #[arg(long, env = "URL_BASE_PATH", default_value = "/")]
    pub base_path: String,

    /// TCP port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT, value_parser = parse_port)]
    pub port: u16,

    /// Parameter store name holding the startup params as JSON
    #[arg(long, env = "SECRET_NAME")]
    pub secret_name: Option<String>,

    /// Inline startup params as JSON (ignored when a secret name is set)
    #[arg(long, env = "SECRET_JSON")]
    pub secret_json: Option<String>,

    /// Timeout for the parameter store call, in seconds
    #[arg(long, env = "SECRET_FETCH_TIMEOUT_SECS", default_value_t = 10)]
    pub secret_fetch_timeout_secs: u64,

    /// Drain window for in-flight requests after SIGTERM, in seconds
    #[arg(long, env = "SHUTDOWN_GRACE_SECS", default_value_t = 10)]
    pub shutdown_grace_secs: u64,
}

impl ServerArgs {
    /// Convert parsed arguments into the server configuration.
    pub fn into_config(self) -> ServerConfig {
        let base_path = if self.base_path.is_empty() {
            ServerConfig::default().base_path
        } else {
            self.base_path
        };

        ServerConfig {
            base_path,
            port: self.port,
            secret_name: self.secret_name.filter(|s| !s.is_empty()),
            secret_json: self.secret_json.filter(|s| !s.is_empty()),
            secret_fetch_timeout_secs: self.secret_fetch_timeout_secs,
            shutdown_grace_secs: self.shutdown_grace_secs,
        }
    }
}

/// Lenient port parsing: anything that is not a usable port number falls
/// back to the default rather than aborting startup.
fn parse_port(raw: &str) -> Result<u16, String> {
    match raw.trim().parse::<u16>() {
        Ok(0) | Err(_) => Ok(DEFAULT_PORT),
        Ok(port) => Ok(port),
    }
}
