//! Discord client error types.

use thiserror::Error;

/// Errors from the authorization URL request. None of them carry the token.
#[derive(Debug, Error)]
pub enum DiscordError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    /// The token cannot be sent as an HTTP header value.
    #[error("token contains characters that cannot be sent in a header")]
    InvalidToken,

    /// The request failed in transport or the body could not be read.
    #[error("request to the Discord API failed: {0}")]
    Request(String),

    /// The body was not the expected JSON document.
    #[error("Discord API returned an unexpected response (HTTP {status})")]
    InvalidResponse {
        /// HTTP status code.
        status: u16,
    },

    /// The JSON carried no authorization URL.
    #[error(
        "Discord API did not return an authorization URL (HTTP {status}{}); check the token and network connectivity",
        detail(.message)
    )]
    MissingUrl {
        /// HTTP status code.
        status: u16,
        /// Discord's `message` field, if any.
        message: Option<String>,
    },
}

fn detail(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

/// Result type for Discord operations.
pub type DiscordResult<T> = Result<T, DiscordError>;
