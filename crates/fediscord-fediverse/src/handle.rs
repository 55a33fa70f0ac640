//! Fediverse handle parsing.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{FediverseError, FediverseResult};

/// A validated `username@domain` handle, stored without a leading `@`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Handle {
    value: String,
}

impl Handle {
    /// Validate `raw`.
    ///
    /// Surrounding whitespace and one leading `@` are dropped. The username
    /// may hold letters, digits and underscores; the domain letters, digits,
    /// hyphens and dots, ending in a label of at least two letters.
    ///
    /// # Errors
    ///
    /// [`FediverseError::InvalidHandle`] if the pattern does not match.
    pub fn parse(raw: &str) -> FediverseResult<Self> {
        static HANDLE: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[A-Za-z0-9_]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$").expect("invalid regex")
        });

        let trimmed = raw.trim();
        let value = trimmed.strip_prefix('@').unwrap_or(trimmed);
        if !HANDLE.is_match(value) {
            return Err(FediverseError::InvalidHandle(raw.trim().to_string()));
        }
        Ok(Self {
            value: value.to_string(),
        })
    }

    /// Everything before the `@`.
    #[must_use]
    pub fn username(&self) -> &str {
        self.value
            .split_once('@')
            .map_or(self.value.as_str(), |(username, _)| username)
    }

    /// Everything after the first `@`.
    #[must_use]
    pub fn domain(&self) -> &str {
        self.value
            .split_once('@')
            .map_or("", |(_, domain)| domain)
    }

    /// `@username@domain`, as Discord expects it.
    #[must_use]
    pub fn mention(&self) -> String {
        format!("@{}", self.value)
    }

    /// `username@domain`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl FromStr for Handle {
    type Err = FediverseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_at_is_stripped() {
        let handle = Handle::parse("@alice@example.social").unwrap();
        assert_eq!(handle.to_string(), "alice@example.social");
        assert_eq!(handle.username(), "alice");
        assert_eq!(handle.domain(), "example.social");
        assert_eq!(handle.mention(), "@alice@example.social");
    }

    #[test]
    fn test_accepts_subdomains_and_hyphens() {
        let handle: Handle = "  bob_99@social.my-host.co.uk \n".parse().unwrap();
        assert_eq!(handle.domain(), "social.my-host.co.uk");
    }

    #[test]
    fn test_rejects_malformed() {
        for raw in [
            "",
            "alice",
            "@alice",
            "alice@",
            "alice@localhost",
            "alice@example.s",
            "alice@example.123",
            "al.ice@example.social",
            "alice@@example.social",
            "@@alice@example.social",
            "alice@exa mple.social",
        ] {
            assert!(
                matches!(Handle::parse(raw), Err(FediverseError::InvalidHandle(_))),
                "accepted {raw:?}"
            );
        }
    }
}
