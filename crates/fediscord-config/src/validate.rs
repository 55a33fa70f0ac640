//! Post-merge configuration validation.

use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;

/// Accepted range for every timeout, in seconds.
pub const TIMEOUT_RANGE: std::ops::RangeInclusive<u64> = 1..=300;

const LOG_FORMATS: [&str; 4] = ["pretty", "compact", "json", "full"];

/// Validate a fully-merged and deserialized configuration.
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_encryption(config)?;
    validate_discord(config)?;
    validate_fediverse(config)?;
    validate_logging(config)?;
    Ok(())
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.to_owned(),
        message: message.into(),
    }
}

fn validate_timeout(field: &str, secs: u64) -> ConfigResult<()> {
    if TIMEOUT_RANGE.contains(&secs) {
        Ok(())
    } else {
        Err(invalid(
            field,
            format!(
                "timeout {secs}s is out of range; must be between {} and {}",
                TIMEOUT_RANGE.start(),
                TIMEOUT_RANGE.end()
            ),
        ))
    }
}

fn validate_encryption(config: &Config) -> ConfigResult<()> {
    if config.encryption.program.trim().is_empty() {
        return Err(invalid("encryption.program", "program cannot be empty"));
    }
    if config.encryption.cipher_algo.trim().is_empty() {
        return Err(invalid("encryption.cipher_algo", "cipher_algo cannot be empty"));
    }
    Ok(())
}

fn validate_discord(config: &Config) -> ConfigResult<()> {
    let base = &config.discord.api_base;
    if !(base.starts_with("https://") || base.starts_with("http://")) {
        return Err(invalid(
            "discord.api_base",
            format!("'{base}' must start with http:// or https://"),
        ));
    }
    validate_timeout("discord.timeout_secs", config.discord.timeout_secs)
}

fn validate_fediverse(config: &Config) -> ConfigResult<()> {
    let scheme = &config.fediverse.scheme;
    if !matches!(scheme.as_str(), "http" | "https") {
        return Err(invalid(
            "fediverse.scheme",
            format!("unsupported scheme '{scheme}'; expected http or https"),
        ));
    }
    if config
        .fediverse
        .incompatible_platforms
        .iter()
        .any(|p| p.trim().is_empty())
    {
        return Err(invalid(
            "fediverse.incompatible_platforms",
            "platform names cannot be empty",
        ));
    }
    validate_timeout("fediverse.timeout_secs", config.fediverse.timeout_secs)
}

fn validate_logging(config: &Config) -> ConfigResult<()> {
    if config.logging.level.trim().is_empty() {
        return Err(invalid("logging.level", "level cannot be empty"));
    }
    let format = config.logging.format.to_ascii_lowercase();
    if !LOG_FORMATS.contains(&format.as_str()) {
        return Err(invalid(
            "logging.format",
            format!(
                "unknown format '{}'; expected one of: {}",
                config.logging.format,
                LOG_FORMATS.join(", ")
            ),
        ));
    }
    if config
        .logging
        .directory
        .as_deref()
        .is_some_and(|dir| dir.trim().is_empty())
    {
        return Err(invalid("logging.directory", "directory cannot be empty"));
    }
    if config.logging.directives.iter().any(|d| d.trim().is_empty()) {
        return Err(invalid("logging.directives", "directives cannot be empty"));
    }
    Ok(())
}
