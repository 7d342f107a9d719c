//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (timestamped, server-id prefixed lines on stdout)
//! tower-http TraceLayer produces:
//!     → per-request spans and events (debug level)
//! ```
//!
//! # Design Decisions
//! - Log level configurable via `RUST_LOG`
//! - Every line carries the server id so interleaved replicas can be told apart

pub mod logging;
