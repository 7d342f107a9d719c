//! Startup orchestration.
//!
//! # Responsibilities
//! - Install the termination signal handlers
//! - Resolve the startup params
//! - Bind the listener
//! - Serve until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Params are resolved before the socket is bound (traffic only when ready)

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{resolve_params, ServerConfig, SsmParameterStore};
use crate::http::DiagnosticServer;
use crate::lifecycle::identity::ServerIdentity;
use crate::lifecycle::shutdown::{log_exit, Shutdown};
use crate::lifecycle::signals;

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    /// Parameter store call failed or returned an unusable parameter.
    #[error("{0}")]
    ConfigFetch(String),

    /// Stored or inline params are not valid JSON.
    #[error("Invalid param JSON -- {0}")]
    ConfigParse(#[source] serde_json::Error),

    /// The listener could not be bound or the serve loop failed.
    #[error("Failed to listen on {address}: {source}")]
    Listen {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Resolve params, bind, and serve until a termination signal arrives.
///
/// Signal handlers are registered first, so a termination signal at any
/// point of startup ends the process cleanly.
pub async fn run(config: ServerConfig, identity: ServerIdentity) -> Result<(), StartupError> {
    let termination = signals::Termination::install();
    let shutdown = Shutdown::new();
    let mut shutdown_rx = shutdown.subscribe();
    tokio::spawn(async move {
        shutdown.trigger(termination.recv().await);
    });

    let store = SsmParameterStore::new();
    let params = tokio::select! {
        resolved = resolve_params(&config, &store) => resolved?,
        received = shutdown_rx.recv() => {
            log_exit(received.unwrap_or("shutdown"), &config.base_path);
            return Ok(());
        }
    };

    tracing::info!("Starting server on port {}...", config.port);
    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Listen {
            address: address.clone(),
            source,
        })?;

    let server = DiagnosticServer::new(&config, identity, params);
    tracing::info!("Started for {}", config.base_path);

    server
        .run(listener, shutdown_rx)
        .await
        .map_err(|source| StartupError::Listen { address, source })
}
