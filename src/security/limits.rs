//! Request size limits.
//!
//! Bodies larger than the configured maximum are rejected with
//! 413 Payload Too Large before the handler reads them.

use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;

use crate::config::SecurityConfig;

/// Wrap `router` with the configured body size limit.
pub fn apply(router: Router, config: &SecurityConfig) -> Router {
    router.layer(RequestBodyLimitLayer::new(config.max_body_size))
}
