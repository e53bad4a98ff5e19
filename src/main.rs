//! Sheriff Config Service
//!
//! Hosts the sheriff configuration service over HTTP.
//!
//! # Startup
//!
//! ```text
//!   CLI args ──▶ config (file + env) ──▶ logging ──▶ metrics
//!                                                      │
//!                                                      ▼
//!            HttpServer ◀── EntryPoint<App> ◀── bootstrap(create_app)
//!                │
//!                ▼
//!   serve until SIGINT/SIGTERM ──▶ drain (bounded) ──▶ exit
//! ```
//!
//! Any failure before the listener is bound is fatal and exits non-zero.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;

use sheriff_config::config;
use sheriff_config::lifecycle::{bootstrap, drain, signals, DrainOutcome, Shutdown};
use sheriff_config::observability::{logging, metrics};
use sheriff_config::service::create_app;
use sheriff_config::HttpServer;

#[derive(Parser)]
#[command(name = "sheriff-config")]
#[command(about = "Sheriff Config Service", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = config::load_or_default(cli.config.as_deref())?;
    logging::init_logging(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config_file = ?cli.config,
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        "sheriff-config starting"
    );

    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address.parse()?)?;
    }

    let bind_address = config.listener.bind_address.clone();
    let grace = Duration::from_secs(config.timeouts.shutdown_grace_secs);

    let entry = bootstrap(|| create_app(config))?;

    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(entry);
    let mut server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    tokio::select! {
        result = &mut server_task => {
            // Server exited on its own; no signal to wait for.
            result??;
            return Ok(());
        }
        _ = signals::wait_for_shutdown() => {}
    }

    shutdown.trigger();
    match drain(&mut server_task, grace).await {
        DrainOutcome::Completed(Ok(Ok(()))) => {}
        DrainOutcome::Completed(Ok(Err(e))) => {
            tracing::error!(error = %e, "HTTP server failed while draining");
        }
        DrainOutcome::Completed(Err(e)) => {
            tracing::error!(error = %e, "HTTP server task panicked or was cancelled");
        }
        DrainOutcome::TimedOut => server_task.abort(),
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
