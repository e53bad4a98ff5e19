//! HTTP hosting runtime.
//!
//! # Responsibilities
//! - Drive the bootstrapped application handle over TCP
//! - Stop accepting on the shutdown signal and drain in-flight requests
//!
//! The server never builds routes itself: everything it serves comes from
//! the [`EntryPoint`] it was given.

use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::lifecycle::EntryPoint;
use crate::service::App;

/// HTTP server hosting one application handle.
pub struct HttpServer {
    entry: EntryPoint<App>,
}

impl HttpServer {
    /// Create a server for the given entry point.
    pub fn new(entry: EntryPoint<App>) -> Self {
        Self { entry }
    }

    /// The entry point this server drives.
    pub fn entry_point(&self) -> &EntryPoint<App> {
        &self.entry
    }

    /// Run the server until `shutdown` fires, accepting connections on `listener`.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            service = %self.entry.info().name,
            version = %self.entry.info().version,
            "HTTP server starting"
        );

        axum::serve(listener, self.entry.router())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
