use thiserror::Error;

use crate::config::ConfigError;

/// Failure to construct the application.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
