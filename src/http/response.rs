//! Echo response body.
//!
//! # Design Decisions
//! - Field order matches what clients of the echo endpoint already parse
//! - Bodies are pretty-printed with two-space indentation

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::StartupParams;
use crate::health::HealthSnapshot;
use crate::lifecycle::identity::ServerIdentity;

/// Request metadata echoed back to the caller.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EchoResponse<'a> {
    #[serde(flatten)]
    pub identity: &'a ServerIdentity,
    pub message: String,
    pub method: String,
    pub url: String,
    pub headers: Map<String, Value>,
    #[serde(flatten)]
    pub health: HealthSnapshot,
    pub params: &'a StartupParams,
}

impl IntoResponse for EchoResponse<'_> {
    fn into_response(self) -> Response {
        match serde_json::to_string_pretty(&self) {
            Ok(body) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                body,
            )
                .into_response(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize echo response");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// Greeting included in every echo body.
pub fn greeting(base_path: &str) -> String {
    format!("Greetings from {}", base_path)
}
