//! Application factory.
//!
//! # Data Flow
//! ```text
//! ServiceConfig
//!     → create_app (validate, assemble routes + middleware)
//!     → App (opaque, ready-to-serve handle)
//!     → lifecycle::bootstrap → EntryPoint<App> → http::HttpServer
//! ```
//!
//! # Design Decisions
//! - The factory owns all wiring; the server only drives what it is given
//! - Construction is synchronous and fallible; failure aborts startup

pub mod app;
pub mod error;
pub mod handlers;

pub use app::{create_app, App, AppState, ServiceInfo, SERVICE_NAME};
pub use error::ServiceError;
