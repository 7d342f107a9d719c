//! Health check state.
//!
//! # States
//! - `fail_health_check`: latch, false → true only
//! - `log_health_check`: countdown or flag
//!
//! # Transitions
//! ```text
//! GET /healthcheck:      Countdown(n > 0) → Countdown(n - 1), logged
//!                        Flag(true)       → Flag(true), logged
//!                        otherwise        → unchanged, not logged
//! GET /healthcheck/log:  truthy → Flag(false), falsy → Flag(true)
//! GET /healthcheck/fail: fail_health_check := true
//! ```
//!
//! The toggle discards any remaining countdown. That is existing behavior
//! and is kept as-is.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use serde::Serialize;

/// Number of health checks logged after startup.
pub const DEFAULT_LOGGED_CHECKS: u32 = 5;

/// Whether health checks are logged.
///
/// Serialized as a bare number or boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LogHealthCheck {
    /// Log the next `n` checks, then stop.
    Countdown(u32),
    /// Log every check, or none.
    Flag(bool),
}

impl LogHealthCheck {
    pub fn is_enabled(&self) -> bool {
        match *self {
            LogHealthCheck::Countdown(n) => n > 0,
            LogHealthCheck::Flag(on) => on,
        }
    }

    /// Negate truthiness.
    pub fn toggled(&self) -> Self {
        LogHealthCheck::Flag(!self.is_enabled())
    }
}

impl Default for LogHealthCheck {
    fn default() -> Self {
        LogHealthCheck::Countdown(DEFAULT_LOGGED_CHECKS)
    }
}

/// Point-in-time view of the health state, as echoed in responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSnapshot {
    pub log_health_check: LogHealthCheck,
    pub fail_health_check: bool,
}

/// Process-wide health check flags, shared by all handlers.
#[derive(Debug, Default)]
pub struct HealthState {
    fail_health_check: AtomicBool,
    log_health_check: Mutex<LogHealthCheck>,
}

impl HealthState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one health check.
    ///
    /// Returns whether this check should be logged, consuming one unit of
    /// the countdown when one is active.
    pub fn record_check(&self) -> bool {
        let mut log = self.log_guard();
        let current = *log;
        match current {
            LogHealthCheck::Countdown(n) if n > 0 => {
                *log = LogHealthCheck::Countdown(n - 1);
                true
            }
            LogHealthCheck::Countdown(_) => false,
            LogHealthCheck::Flag(on) => on,
        }
    }

    /// Flip health check logging and return the new value.
    pub fn toggle_logging(&self) -> LogHealthCheck {
        let mut log = self.log_guard();
        *log = log.toggled();
        *log
    }

    /// Latch the health check into the failing state.
    pub fn latch_failure(&self) {
        self.fail_health_check.store(true, Ordering::SeqCst);
    }

    pub fn is_failing(&self) -> bool {
        self.fail_health_check.load(Ordering::SeqCst)
    }

    pub fn log_health_check(&self) -> LogHealthCheck {
        *self.log_guard()
    }

    pub fn snapshot(&self) -> HealthSnapshot {
        HealthSnapshot {
            log_health_check: self.log_health_check(),
            fail_health_check: self.is_failing(),
        }
    }

    fn log_guard(&self) -> std::sync::MutexGuard<'_, LogHealthCheck> {
        // The guarded value is a plain Copy enum; a poisoned lock still holds a valid value.
        self.log_health_check
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
