//! Runtime error types.

use thiserror::Error;

use courier_core::{ApiError, TransportError};

pub use crate::config::{ConfigError, ConfigResult};

/// Errors that can occur during runtime operations.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The transport could not be built or the listener could not bind.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A Bot API call made by the runtime failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
