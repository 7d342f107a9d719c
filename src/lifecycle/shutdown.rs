//! Shutdown coordination.

use tokio::sync::broadcast;

/// Why the server is stopping, e.g. the signal name.
pub type ShutdownReason = &'static str;

/// Broadcasts a single shutdown notice to the serve loop and any other
/// subscriber.
#[derive(Debug)]
pub struct Shutdown {
    tx: broadcast::Sender<ShutdownReason>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ShutdownReason> {
        self.tx.subscribe()
    }

    /// Notify all current subscribers. Subscribers created afterwards do
    /// not see the notice.
    pub fn trigger(&self, reason: ShutdownReason) {
        if self.tx.send(reason).is_err() {
            tracing::debug!(reason, "Shutdown triggered with no subscribers");
        }
    }
}

/// Log the line marking a signal-initiated exit.
pub fn log_exit(reason: ShutdownReason, base_path: &str) {
    tracing::info!("{} for {}. Exiting...", reason, base_path);
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
