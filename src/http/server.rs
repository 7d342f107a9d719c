//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum Router with all handlers
//! - Wire up request tracing
//! - Serve on a listener until shutdown is signalled
//! - Bound the drain window for in-flight requests

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, oneshot};
use tower_http::trace::TraceLayer;

use crate::config::{ServerConfig, StartupParams};
use crate::health::HealthState;
use crate::http::handlers::{
    delayed_echo, echo, fail_healthcheck, healthcheck, toggle_healthcheck_log,
};
use crate::lifecycle::identity::ServerIdentity;
use crate::lifecycle::shutdown::{log_exit, ShutdownReason};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<ServerIdentity>,
    pub base_path: Arc<str>,
    pub health: Arc<HealthState>,
    pub params: Arc<StartupParams>,
}

/// HTTP server for the diagnostic endpoints.
pub struct DiagnosticServer {
    router: Router,
    state: AppState,
    shutdown_grace: Duration,
}

impl DiagnosticServer {
    /// Create a server with fresh health state.
    pub fn new(config: &ServerConfig, identity: ServerIdentity, params: StartupParams) -> Self {
        Self::with_health(config, identity, params, Arc::new(HealthState::new()))
    }

    /// Create a server around existing health state.
    pub fn with_health(
        config: &ServerConfig,
        identity: ServerIdentity,
        params: StartupParams,
        health: Arc<HealthState>,
    ) -> Self {
        let state = AppState {
            identity: Arc::new(identity),
            base_path: Arc::from(config.base_path.as_str()),
            health,
            params: Arc::new(params),
        };

        Self {
            router: Self::build_router(state.clone()),
            state,
            shutdown_grace: Duration::from_secs(config.shutdown_grace_secs),
        }
    }

    /// Build the Axum router.
    ///
    /// POSTs to the health check paths fall through to the delayed echo,
    /// like any other path.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/healthcheck", get(healthcheck).post(delayed_echo))
            .route(
                "/healthcheck/log",
                get(toggle_healthcheck_log).post(delayed_echo),
            )
            .route(
                "/healthcheck/fail",
                get(fail_healthcheck).post(delayed_echo),
            )
            .route("/", get(echo).post(delayed_echo))
            .route("/{*path}", get(echo).post(delayed_echo))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// The router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn health(&self) -> Arc<HealthState> {
        self.state.health.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    ///
    /// After shutdown, new connections are refused and in-flight requests get
    /// at most the configured grace period to finish.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<ShutdownReason>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::debug!(address = %addr, "HTTP server starting");

        let (drain_tx, drain_rx) = oneshot::channel::<()>();
        let server = axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = drain_rx.await;
            })
            .into_future();
        tokio::pin!(server);

        let reason = tokio::select! {
            res = &mut server => return res,
            received = shutdown.recv() => received.unwrap_or("shutdown"),
        };
        log_exit(reason, &self.state.base_path);

        let _ = drain_tx.send(());
        match tokio::time::timeout(self.shutdown_grace, server).await {
            Ok(res) => res?,
            Err(_) => {
                tracing::warn!(
                    grace_secs = self.shutdown_grace.as_secs(),
                    "Grace period elapsed with requests in flight"
                );
            }
        }

        tracing::debug!("HTTP server stopped");
        Ok(())
    }
}
