//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! GET /healthcheck      → state.rs (read latch, consume log countdown)
//! GET /healthcheck/log  → state.rs (toggle logging)
//! GET /healthcheck/fail → state.rs (latch failure)
//! echo responses        → state.rs (snapshot)
//! ```
//!
//! # Design Decisions
//! - State is injected into the router, never a module-level global
//! - The failure latch has no reset path

pub mod state;

pub use state::{HealthSnapshot, HealthState, LogHealthCheck};
