//! Instance compatibility probe.
//!
//! Issues one `GET /api/v1/instance` and accepts the instance when the
//! response carries a non-empty `version` that does not name a platform
//! known to lack Mastodon API connection support. The HTTP status is not
//! inspected; only the body decides.

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{FediverseError, FediverseResult};

/// Default probe timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Platforms whose version strings mark them as incompatible.
pub const DEFAULT_INCOMPATIBLE_PLATFORMS: [&str; 4] = ["misskey", "firefish", "calckey", "foundkey"];

const INSTANCE_PATH: &str = "/api/v1/instance";

/// What the instance reported about itself.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InstanceInfo {
    /// Server version string, e.g. `4.2.1` or `3.0.0 (compatible; Pleroma 2.5)`.
    #[serde(default)]
    pub version: String,
    /// Instance title, when present.
    #[serde(default)]
    pub title: Option<String>,
}

/// Checks that a domain speaks the Mastodon API.
#[derive(Debug, Clone)]
pub struct InstanceProber {
    client: reqwest::Client,
    scheme: String,
    incompatible: Vec<String>,
}

impl InstanceProber {
    /// Create a prober using https, `timeout` and the default platform list.
    ///
    /// # Errors
    ///
    /// [`FediverseError::Client`] if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> FediverseResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("fediscord/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FediverseError::Client(e.to_string()))?;

        Ok(Self {
            client,
            scheme: "https".to_string(),
            incompatible: DEFAULT_INCOMPATIBLE_PLATFORMS
                .iter()
                .map(ToString::to_string)
                .collect(),
        })
    }

    /// Override the URL scheme (`http` for local test servers).
    #[must_use]
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Replace the incompatible-platform list. Matching is
    /// case-insensitive.
    #[must_use]
    pub fn with_incompatible_platforms<I, S>(mut self, platforms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.incompatible = platforms
            .into_iter()
            .map(|p| p.into().to_lowercase())
            .collect();
        self
    }

    /// Probe `domain`.
    ///
    /// # Errors
    ///
    /// - [`FediverseError::Unreachable`] on transport errors
    /// - [`FediverseError::NotMastodonApi`] if the body is not JSON with a
    ///   non-empty `version`
    /// - [`FediverseError::Incompatible`] if the version names a known
    ///   incompatible platform
    pub async fn probe(&self, domain: &str) -> FediverseResult<InstanceInfo> {
        let url = format!("{}://{domain}{INSTANCE_PATH}", self.scheme);
        debug!(url = %url, "probing instance");

        let unreachable = |e: reqwest::Error| FediverseError::Unreachable {
            domain: domain.to_string(),
            reason: e.to_string(),
        };
        let body = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(unreachable)?
            .bytes()
            .await
            .map_err(unreachable)?;

        let not_mastodon = || FediverseError::NotMastodonApi {
            domain: domain.to_string(),
        };
        let info: InstanceInfo = serde_json::from_slice(&body).map_err(|_| not_mastodon())?;
        if info.version.trim().is_empty() {
            return Err(not_mastodon());
        }

        let lowered = info.version.to_lowercase();
        if let Some(platform) = self.incompatible.iter().find(|p| lowered.contains(p.as_str())) {
            warn!(domain, version = %info.version, "incompatible instance");
            return Err(FediverseError::Incompatible {
                version: info.version,
                platform: platform.clone(),
            });
        }

        debug!(domain, version = %info.version, "instance is compatible");
        Ok(info)
    }
}
