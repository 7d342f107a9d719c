//! Route handlers.
//!
//! None of these can fail: every request gets either an empty status
//! response or an echo body.

use axum::extract::{OriginalUri, State};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::http::request::{headers_json, response_delay};
use crate::http::response::{greeting, EchoResponse};
use crate::http::server::AppState;

/// `GET /healthcheck`: 200, or 500 once the failure latch is set.
pub async fn healthcheck(State(state): State<AppState>) -> StatusCode {
    if state.health.record_check() {
        tracing::info!("Healthcheck");
    }

    if state.health.is_failing() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    }
}

/// `GET /healthcheck/log`: flip health check logging.
pub async fn toggle_healthcheck_log(
    State(state): State<AppState>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
) -> Response {
    let log = state.health.toggle_logging();
    tracing::debug!(log_health_check = ?log, "Health check logging toggled");
    echo_body(&state, &method, &uri, &headers)
}

/// `GET /healthcheck/fail`: latch the health check into failing.
pub async fn fail_healthcheck(
    State(state): State<AppState>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
) -> Response {
    state.health.latch_failure();
    tracing::debug!("Health check failure latched");
    echo_body(&state, &method, &uri, &headers)
}

/// `GET *`: echo immediately.
pub async fn echo(
    State(state): State<AppState>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
) -> Response {
    log_request(&state, &method, &uri);
    echo_body(&state, &method, &uri, &headers)
}

/// `POST *`: echo after the delay requested by `x-response-delay`.
///
/// The delay suspends this request only; other requests keep being served.
pub async fn delayed_echo(
    State(state): State<AppState>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
) -> Response {
    log_request(&state, &method, &uri);

    let delay = response_delay(&headers);
    tracing::debug!(delay_ms = delay.as_millis() as u64, "Delaying response");
    tokio::time::sleep(delay).await;

    echo_body(&state, &method, &uri, &headers)
}

fn log_request(state: &AppState, method: &Method, uri: &axum::http::Uri) {
    tracing::info!("{} request to {}: {}", method, state.base_path, request_url(uri));
}

/// Path and query exactly as requested.
fn request_url(uri: &axum::http::Uri) -> String {
    uri.path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string())
}

/// Build the echo body. Health state is read after any toggle so the body
/// reflects the new value.
fn echo_body(
    state: &AppState,
    method: &Method,
    uri: &axum::http::Uri,
    headers: &HeaderMap,
) -> Response {
    EchoResponse {
        identity: &state.identity,
        message: greeting(&state.base_path),
        method: method.to_string(),
        url: request_url(uri),
        headers: headers_json(headers),
        health: state.health.snapshot(),
        params: &state.params,
    }
    .into_response()
}
