//! Sheriff Config Service library.
//!
//! The service is assembled by a single factory ([`service::create_app`]),
//! bound once by [`lifecycle::bootstrap`], and driven by [`HttpServer`].

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;
pub mod service;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::{bootstrap, EntryPoint, Shutdown};
pub use service::{create_app, App};
