//! Shutdown coordination for the service.

use std::future::Future;
use std::time::Duration;

use tokio::sync::broadcast;

/// Coordinator for graceful shutdown.
///
/// Provides a broadcast channel that all long-running tasks can subscribe to.
pub struct Shutdown {
    /// Broadcast channel sender.
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

    /// Get the number of active subscribers (tasks still running).
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of waiting for a task to drain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainOutcome<T> {
    /// The task finished within the grace period, with its output.
    Completed(T),
    /// The grace period elapsed first.
    TimedOut,
}

/// Wait for `task` to finish, giving up after `grace`.
pub async fn drain<F>(task: F, grace: Duration) -> DrainOutcome<F::Output>
where
    F: Future,
{
    match tokio::time::timeout(grace, task).await {
        Ok(output) => DrainOutcome::Completed(output),
        Err(_) => {
            tracing::warn!(grace_secs = grace.as_secs(), "Drain deadline exceeded, forcing exit");
            DrainOutcome::TimedOut
        }
    }
}
