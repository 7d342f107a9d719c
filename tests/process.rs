//! End-to-end tests against the compiled binary.

use std::net::TcpListener;
use std::process::{Command, Stdio};
use std::time::Duration;

use serde_json::{json, Value};

fn server_command() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_diagnostic-server"));
    cmd.env_remove("SECRET_NAME")
        .env_remove("SECRET_JSON")
        .env_remove("URL_BASE_PATH")
        .env_remove("RUST_LOG")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    cmd
}

fn free_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

#[test]
fn test_invalid_inline_json_exits_with_failure() {
    let output = server_command()
        .env("PORT", free_port().to_string())
        .env("SECRET_JSON", "{\"unterminated\": ")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Error while starting up: Invalid param JSON -- "));
}

#[cfg(unix)]
#[tokio::test]
async fn test_sigterm_exits_cleanly() {
    let port = free_port();
    let child = server_command()
        .env("PORT", port.to_string())
        .env("URL_BASE_PATH", "/e2e")
        .env("SECRET_JSON", r#"{"stage":"test","replicas":2}"#)
        .spawn()
        .unwrap();

    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let url = format!("http://127.0.0.1:{}/ready", port);
    let mut body = None;
    for _ in 0..50 {
        if let Ok(res) = client.get(&url).send().await {
            body = Some(res.json::<Value>().await.unwrap());
            break;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    let body = body.expect("server never became ready");
    assert_eq!(body["params"], json!({"stage": "test", "replicas": 2}));
    assert_eq!(body["message"], "Greetings from /e2e");

    let status = Command::new("kill")
        .args(["-TERM", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(status.success());

    let output = tokio::task::spawn_blocking(move || child.wait_with_output())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let server_id = body["serverId"].as_str().unwrap();
    assert!(stdout.contains(&format!("[{}] Starting server on port {}...", server_id, port)));
    assert!(stdout.contains("Started for /e2e"));
    assert!(stdout.contains("GET request to /e2e: /ready"));
    assert!(stdout.contains("SIGTERM for /e2e. Exiting..."));
}

/// Parameter store endpoint that accepts connections and never answers.
#[cfg(unix)]
fn silent_endpoint() -> (u16, std::sync::mpsc::Receiver<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let mut held = Vec::new();
        for stream in listener.incoming().flatten() {
            held.push(stream);
            let _ = tx.send(());
        }
    });
    (port, rx)
}

#[cfg(unix)]
#[test]
fn test_sigterm_during_param_fetch_exits_cleanly() {
    let (endpoint_port, connected) = silent_endpoint();
    let child = server_command()
        .env("PORT", free_port().to_string())
        .env("SECRET_NAME", "/diag/params")
        .env("SECRET_FETCH_TIMEOUT_SECS", "60")
        .env("AWS_ENDPOINT_URL", format!("http://127.0.0.1:{}", endpoint_port))
        .env("AWS_REGION", "us-east-1")
        .env("AWS_ACCESS_KEY_ID", "AKIDEXAMPLE")
        .env("AWS_SECRET_ACCESS_KEY", "secret")
        .env("AWS_EC2_METADATA_DISABLED", "true")
        .spawn()
        .unwrap();

    connected
        .recv_timeout(Duration::from_secs(20))
        .expect("parameter fetch never reached the endpoint");

    let status = Command::new("kill")
        .args(["-TERM", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(status.success());

    let output = child.wait_with_output().unwrap();
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Getting secret JSON..."));
    assert!(stdout.contains("SIGTERM for /. Exiting..."));
    assert!(!stdout.contains("Started for"));
}
