//! Configuration types.
//!
//! Every field has a value in the embedded `defaults.toml`, so the merged
//! tree always deserializes completely. The `Default` impls mirror that
//! file for callers that never touch disk.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Encryption tool settings.
    pub encryption: EncryptionSection,
    /// Discord API settings.
    pub discord: DiscordSection,
    /// Fediverse instance probe settings.
    pub fediverse: FediverseSection,
    /// Logging settings.
    pub logging: LoggingSection,
}

/// `[encryption]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptionSection {
    /// Program name on `PATH` or path to a binary.
    pub program: String,
    /// Value passed to `--cipher-algo`.
    pub cipher_algo: String,
}

impl Default for EncryptionSection {
    fn default() -> Self {
        Self {
            program: "gpg".to_string(),
            cipher_algo: "AES256".to_string(),
        }
    }
}

/// `[discord]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscordSection {
    /// Base URL of the Discord API.
    pub api_base: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for DiscordSection {
    fn default() -> Self {
        Self {
            api_base: "https://discord.com/api/v9".to_string(),
            timeout_secs: 15,
        }
    }
}

/// `[fediverse]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FediverseSection {
    /// `http` or `https`.
    pub scheme: String,
    /// Probe timeout in seconds.
    pub timeout_secs: u64,
    /// Platform names rejected when found in an instance's version string.
    pub incompatible_platforms: Vec<String>,
}

impl Default for FediverseSection {
    fn default() -> Self {
        Self {
            scheme: "https".to_string(),
            timeout_secs: 10,
            incompatible_platforms: ["misskey", "firefish", "calckey", "foundkey"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// `[logging]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSection {
    /// Filter directive, e.g. `warn` or `fediscord_storage=debug`.
    pub level: String,
    /// One of `pretty`, `compact`, `json`, `full`.
    pub format: String,
    /// Write logs to daily-rolling files in this directory instead of
    /// stderr.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
    /// Extra per-target filter directives, e.g. `reqwest=info`.
    #[serde(default)]
    pub directives: Vec<String>,
    /// Prefix each event with a timestamp. File logging always does.
    #[serde(default)]
    pub timestamps: bool,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "compact".to_string(),
            directory: None,
            directives: Vec::new(),
            timestamps: false,
        }
    }
}
