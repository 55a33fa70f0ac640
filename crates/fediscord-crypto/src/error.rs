//! Encryption tool error types.

use thiserror::Error;

/// Errors that can occur while invoking the encryption tool.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The tool is not installed or not on the search path.
    #[error("{tool} is not installed ({install_hint})")]
    ToolUnavailable {
        /// Program that was looked up.
        tool: String,
        /// How to install it.
        install_hint: String,
    },

    /// Encryption failed (non-zero exit, spawn failure, or no output).
    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    /// Decryption failed (non-zero exit, wrong passphrase, or no output).
    #[error("decryption failed: {0}")]
    DecryptionFailed(String),
}

/// Result type for encryption tool operations.
pub type CryptoResult<T> = Result<T, CryptoError>;
