//! Shutdown behavior of the serve loop.

use std::time::{Duration, Instant};

use diagnostic_server::ServerConfig;
use serde_json::json;

mod common;

#[tokio::test]
async fn test_shutdown_stops_accepting() {
    let server = common::start_default_server().await;
    let client = common::client();
    let root_url = server.url("/");
    assert!(client.get(root_url.clone()).send().await.is_ok());

    server.shutdown.trigger("test");
    let result = tokio::time::timeout(Duration::from_secs(5), server.handle)
        .await
        .expect("server did not stop")
        .unwrap();
    assert!(result.is_ok());

    assert!(client.get(root_url).send().await.is_err());
}

#[tokio::test]
async fn test_drain_is_bounded_by_grace_period() {
    let config = ServerConfig {
        shutdown_grace_secs: 1,
        ..ServerConfig::default()
    };
    let server = common::start_server(config, json!({})).await;

    let url = server.url("/stuck");
    tokio::spawn(async move {
        let _ = common::client()
            .post(url)
            .header("x-response-delay", "60000")
            .send()
            .await;
    });
    tokio::time::sleep(Duration::from_millis(100)).await;

    let start = Instant::now();
    server.shutdown.trigger("test");
    let result = tokio::time::timeout(Duration::from_secs(5), server.handle)
        .await
        .expect("grace period not enforced")
        .unwrap();

    assert!(result.is_ok());
    assert!(start.elapsed() >= Duration::from_millis(900));
}
