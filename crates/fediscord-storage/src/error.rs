//! Credential store error types.

use std::fmt;
use std::path::PathBuf;

use fediscord_core::CoreError;
use fediscord_crypto::CryptoError;
use thiserror::Error;

/// A persisted artifact that can be missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    /// The Discord token, under either representation.
    Token,
    /// The Fediverse handle.
    Handle,
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token => f.write_str("Discord token"),
            Self::Handle => f.write_str("Fediverse handle"),
        }
    }
}

/// Errors returned by [`CredentialStore`](crate::CredentialStore).
///
/// No variant ever carries token bytes.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No configuration directory could be resolved.
    #[error("environment unavailable: {0}")]
    EnvironmentUnavailable(String),

    /// The requested artifact has not been stored.
    #[error("{0} not found")]
    NotFound(Artifact),

    /// The encryption preference has never been chosen.
    #[error("encryption preference not set")]
    NotSet,

    /// The encryption tool is needed but not installed.
    #[error("{tool} is not installed ({install_hint})")]
    ToolUnavailable {
        /// Program that was looked up.
        tool: String,
        /// How to install it.
        install_hint: String,
    },

    /// The encryption tool failed; nothing on disk was changed.
    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    /// The encryption tool could not decrypt the stored token.
    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    /// A filesystem operation failed.
    #[error("storage failed at {}: {source}", path.display())]
    StorageFailed {
        /// Path being read, written or removed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An empty token was offered for storage.
    #[error("token cannot be empty")]
    EmptyToken,
}

impl StoreError {
    /// Whether this is a missing-artifact error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Whether this is the unset-preference error.
    #[must_use]
    pub fn is_not_set(&self) -> bool {
        matches!(self, Self::NotSet)
    }

    pub(crate) fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::StorageFailed {
            path: path.into(),
            source,
        }
    }
}

impl From<CryptoError> for StoreError {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::ToolUnavailable { tool, install_hint } => {
                Self::ToolUnavailable { tool, install_hint }
            },
            CryptoError::EncryptionFailed(msg) => Self::EncryptionFailed(msg),
            CryptoError::DecryptionFailed(msg) => Self::DecryptionFailed(msg),
        }
    }
}

impl From<CoreError> for StoreError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::EnvironmentUnavailable(msg) => Self::EnvironmentUnavailable(msg),
            CoreError::EmptyToken => Self::EmptyToken,
            CoreError::Io(source) => Self::StorageFailed {
                path: PathBuf::new(),
                source,
            },
        }
    }
}

/// Result type for credential store operations.
pub type StoreResult<T> = Result<T, StoreError>;
