//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, tracing layer)
//!     → handlers.rs (health check routes, catch-all echo)
//!     → request.rs (delay header, header flattening)
//!     → response.rs (echo body)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{DEFAULT_RESPONSE_DELAY_MS, X_RESPONSE_DELAY};
pub use server::{AppState, DiagnosticServer};
