//! Fediverse collaborator error types.

use thiserror::Error;

/// Errors from handle validation and instance probing.
#[derive(Debug, Error)]
pub enum FediverseError {
    /// The input is not `username@domain`.
    #[error("invalid handle '{0}': expected username@domain (for example alice@mastodon.social)")]
    InvalidHandle(String),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    /// The instance could not be reached or its response not read.
    #[error("instance {domain} could not be reached: {reason}")]
    Unreachable {
        /// Domain that was probed.
        domain: String,
        /// Transport error description.
        reason: String,
    },

    /// The response was not a Mastodon API instance document.
    #[error("instance {domain} did not return a valid Mastodon API response")]
    NotMastodonApi {
        /// Domain that was probed.
        domain: String,
    },

    /// The instance runs a platform known not to support the connection.
    #[error("instance is running {version}, which is {platform} and does not support Mastodon API connections")]
    Incompatible {
        /// Version string the instance reported.
        version: String,
        /// The matched platform name.
        platform: String,
    },
}

/// Result type for Fediverse operations.
pub type FediverseResult<T> = Result<T, FediverseError>;
