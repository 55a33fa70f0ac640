//! Core error types.

use thiserror::Error;

/// Errors raised by path resolution and secret construction.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The host cannot report a home or profile directory, or the
    /// `FEDISCORD_HOME` override is unusable.
    #[error("environment unavailable: {0}")]
    EnvironmentUnavailable(String),

    /// A token was empty after trimming whitespace.
    #[error("token cannot be empty")]
    EmptyToken,

    /// Creating or securing the configuration directory failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
