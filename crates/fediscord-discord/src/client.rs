//! Authorization URL request.

use std::time::Duration;

use fediscord_core::SecretToken;
use fediscord_fediverse::Handle;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{DiscordError, DiscordResult};

/// Default Discord API base.
pub const DEFAULT_API_BASE: &str = "https://discord.com/api/v9";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

const AUTHORIZE_PATH: &str = "/connections/mastodon/authorize";

#[derive(Debug, Deserialize)]
struct AuthorizeResponse {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Client for Discord's Mastodon connection endpoint.
#[derive(Debug, Clone)]
pub struct DiscordClient {
    client: reqwest::Client,
    api_base: String,
}

impl DiscordClient {
    /// Create a client against `api_base` with a request `timeout`.
    ///
    /// # Errors
    ///
    /// [`DiscordError::Client`] if the HTTP client cannot be built.
    pub fn new(api_base: impl Into<String>, timeout: Duration) -> DiscordResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("fediscord/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DiscordError::Client(e.to_string()))?;

        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
        })
    }

    /// The configured API base.
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Ask Discord for the URL that links `handle` to the account behind
    /// `token`.
    ///
    /// The body is decoded whatever the status code; a non-empty `url`
    /// field is success.
    ///
    /// # Errors
    ///
    /// - [`DiscordError::InvalidToken`] if the token is not a valid header
    /// - [`DiscordError::Request`] on transport errors
    /// - [`DiscordError::InvalidResponse`] if the body is not JSON
    /// - [`DiscordError::MissingUrl`] if the JSON has no usable `url`
    pub async fn connection_url(&self, handle: &Handle, token: &SecretToken) -> DiscordResult<String> {
        let mut auth =
            HeaderValue::from_str(token.expose()).map_err(|_| DiscordError::InvalidToken)?;
        auth.set_sensitive(true);

        let endpoint = format!("{}{AUTHORIZE_PATH}", self.api_base);
        debug!(endpoint = %endpoint, handle = %handle, "requesting authorization URL");

        let response = self
            .client
            .get(&endpoint)
            .query(&[("handle", handle.mention())])
            .header(AUTHORIZATION, auth)
            .send()
            .await
            .map_err(|e| DiscordError::Request(e.without_url().to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| DiscordError::Request(e.without_url().to_string()))?;

        let parsed: AuthorizeResponse = serde_json::from_slice(&body).map_err(|_| {
            warn!(status, "Discord API response is not JSON");
            DiscordError::InvalidResponse { status }
        })?;

        match parsed.url {
            Some(url) if !url.trim().is_empty() => Ok(url),
            _ => {
                warn!(status, "Discord API response has no authorization URL");
                Err(DiscordError::MissingUrl {
                    status,
                    message: parsed.message,
                })
            },
        }
    }
}
