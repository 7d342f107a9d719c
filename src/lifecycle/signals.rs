//! OS signal handling.
//!
//! SIGTERM and SIGINT both end the process; there is no reload signal.
//! Handlers are registered eagerly by [`Termination::install`], so a signal
//! delivered while startup is still fetching params is queued, not fatal.

/// Registered termination signal handlers.
#[cfg(unix)]
pub struct Termination {
    sigterm: Option<tokio::signal::unix::Signal>,
    sigint: Option<tokio::signal::unix::Signal>,
}

#[cfg(unix)]
impl Termination {
    /// Register SIGTERM and SIGINT handlers. Must be called within a Tokio
    /// runtime.
    pub fn install() -> Self {
        use tokio::signal::unix::{signal, SignalKind};

        let sigterm = signal(SignalKind::terminate())
            .map_err(|e| tracing::warn!(error = %e, "Failed to install SIGTERM handler"))
            .ok();
        let sigint = signal(SignalKind::interrupt())
            .map_err(|e| tracing::warn!(error = %e, "Failed to install SIGINT handler"))
            .ok();

        Self { sigterm, sigint }
    }

    /// Wait for a termination signal and return its name.
    pub async fn recv(mut self) -> &'static str {
        tokio::select! {
            _ = recv_or_pending(self.sigterm.as_mut()) => "SIGTERM",
            _ = recv_or_pending(self.sigint.as_mut()) => "SIGINT",
        }
    }
}

#[cfg(unix)]
async fn recv_or_pending(signal: Option<&mut tokio::signal::unix::Signal>) {
    match signal {
        Some(s) => {
            s.recv().await;
        }
        None => std::future::pending().await,
    }
}

/// Registered termination signal handlers.
#[cfg(not(unix))]
pub struct Termination;

#[cfg(not(unix))]
impl Termination {
    pub fn install() -> Self {
        Termination
    }

    /// Wait for Ctrl+C and return the signal name.
    pub async fn recv(self) -> &'static str {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        "SIGINT"
    }
}
