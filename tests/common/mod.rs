//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use diagnostic_server::config::StartupParams;
use diagnostic_server::health::HealthState;
use diagnostic_server::{DiagnosticServer, ServerConfig, ServerIdentity, Shutdown};

/// A server running on an ephemeral localhost port.
#[allow(dead_code)]
pub struct TestServer {
    pub addr: SocketAddr,
    pub identity: ServerIdentity,
    pub health: Arc<HealthState>,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start a server with the given config and params.
pub async fn start_server(config: ServerConfig, params: Value) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let identity = ServerIdentity::generate();
    let health = Arc::new(HealthState::new());
    let server = DiagnosticServer::with_health(
        &config,
        identity.clone(),
        StartupParams::new(params),
        health.clone(),
    );

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let handle = tokio::spawn(async move { server.run(listener, server_shutdown).await });

    TestServer {
        addr,
        identity,
        health,
        shutdown,
        handle,
    }
}

/// Start a server with default config and empty params.
#[allow(dead_code)]
pub async fn start_default_server() -> TestServer {
    start_server(ServerConfig::default(), serde_json::json!({})).await
}

/// HTTP client that never reuses connections or goes through a proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap()
}
