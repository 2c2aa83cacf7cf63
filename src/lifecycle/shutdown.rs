//! Shutdown coordination.

use tokio::sync::broadcast;

/// Coordinator for graceful shutdown.
///
/// Provides a broadcast channel that the server and any long-running task
/// can subscribe to.
#[derive(Debug)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Trigger the shutdown signal.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Trigger the shutdown signal once the process receives SIGINT/SIGTERM.
    pub fn trigger_on_signal(&self) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            crate::lifecycle::signals::wait_for_signal().await;
            let _ = tx.send(());
        });
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
