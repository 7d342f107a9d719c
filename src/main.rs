//! Diagnostic HTTP server.
//!
//! ```text
//!     Client ──▶ /healthcheck        200 / 500, empty body
//!            ──▶ /healthcheck/log    toggle health check logging, echo
//!            ──▶ /healthcheck/fail   latch failing health check, echo
//!            ──▶ GET  /*             echo
//!            ──▶ POST /*             echo after x-response-delay ms
//! ```
//!
//! Runs on a single-threaded Tokio runtime: delayed responses are timers,
//! not blocked threads.

use std::process::ExitCode;

use clap::Parser;

use diagnostic_server::config::ServerArgs;
use diagnostic_server::lifecycle::{startup, ServerIdentity};
use diagnostic_server::observability::logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let config = ServerArgs::parse().into_config();
    let identity = ServerIdentity::generate();

    logging::init(&identity.server_id);

    tracing::debug!(
        port = config.port,
        base_path = %config.base_path,
        secret_name = ?config.secret_name,
        "Configuration loaded"
    );

    match startup::run(config, identity).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Error while starting up: {}", e);
            ExitCode::FAILURE
        }
    }
}
