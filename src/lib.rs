//! Diagnostic HTTP server library.
//!
//! Echoes request metadata back to callers and exposes a togglable health
//! check, optionally seeded with params from AWS SSM Parameter Store.

pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::ServerConfig;
pub use http::DiagnosticServer;
pub use lifecycle::{ServerIdentity, Shutdown, StartupError};
