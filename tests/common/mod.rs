//! Shared utilities for integration tests.

use std::net::SocketAddr;

use axum::{body::Body, http::Request, response::Response};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower::ServiceExt;

use sheriff_config::{bootstrap, create_app, HttpServer, ServiceConfig, Shutdown};
use sheriff_config::lifecycle::EntryPoint;
use sheriff_config::App;

/// A config suitable for tests: loopback, ephemeral port.
#[allow(dead_code)]
pub fn test_config() -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config
}

/// Bootstrap the real application from `config`.
#[allow(dead_code)]
pub fn entry_point(config: ServiceConfig) -> EntryPoint<App> {
    bootstrap(|| create_app(config)).expect("application should construct")
}

/// Send one request through the application in-process.
#[allow(dead_code)]
pub async fn send(entry: &EntryPoint<App>, request: Request<Body>) -> Response {
    entry.router().oneshot(request).await.unwrap()
}

/// Read a response body to a string.
#[allow(dead_code)]
pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// A server running on an ephemeral loopback port.
#[allow(dead_code)]
pub struct RunningServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub task: JoinHandle<Result<(), std::io::Error>>,
}

/// Start `entry` on 127.0.0.1 with an OS-assigned port.
#[allow(dead_code)]
pub async fn start_server(entry: EntryPoint<App>) -> RunningServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(entry);
    let task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    RunningServer { addr, shutdown, task }
}
