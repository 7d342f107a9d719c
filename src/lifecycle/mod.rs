//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Generate identity → Resolve params → Bind listener → Serve
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Bounded drain → Exit 0
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger shutdown
//! ```
//!
//! # Design Decisions
//! - Startup failures exit with status 1
//! - Shutdown drain is bounded well below the platform's 30 second kill deadline

pub mod identity;
pub mod shutdown;
pub mod signals;
pub mod startup;

pub use identity::ServerIdentity;
pub use shutdown::{Shutdown, ShutdownReason};
pub use startup::StartupError;
