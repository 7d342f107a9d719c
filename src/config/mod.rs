//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! CLI flags / environment
//!     → loader.rs (clap, lenient defaults)
//!     → ServerConfig (immutable)
//!
//! Before the listener binds:
//!     ServerConfig.secret_name → ssm.rs (one GetParameter call)
//!     ServerConfig.secret_json → parsed inline
//!     → params.rs → StartupParams (opaque JSON, shared via Arc)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload
//! - All fields have defaults so an empty environment is valid
//! - Params resolution failures are fatal at startup

pub mod loader;
pub mod params;
pub mod schema;
pub mod ssm;

pub use loader::ServerArgs;
pub use params::{resolve_params, ParameterStore, StartupParams, StoredParameter};
pub use schema::ServerConfig;
pub use ssm::SsmParameterStore;
