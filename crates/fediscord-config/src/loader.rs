//! Layered configuration loading.
//!
//! 1. Parse the embedded `defaults.toml`
//! 2. Merge the user file, if present
//! 3. Apply `FEDISCORD_*` environment overrides
//! 4. Deserialize and validate

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::env::{apply_env_overrides, collect_env_vars};
use crate::error::{ConfigError, ConfigResult};
use crate::merge::deep_merge;
use crate::types::Config;
use crate::validate;

/// Embedded default configuration.
const DEFAULTS_TOML: &str = include_str!("defaults.toml");

/// Maximum allowed config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1_048_576;

/// A validated configuration plus where its values came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// The merged configuration.
    pub config: Config,
    /// The user file, if one was found and merged.
    pub source_file: Option<PathBuf>,
    /// Environment variables that overrode a value.
    pub env_overrides: Vec<&'static str>,
}

/// Load configuration using `user_file` and the process environment.
///
/// A missing `user_file` is not an error.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the file is unreadable, oversized or
/// malformed, an environment value does not parse, or the merged result
/// fails validation.
pub fn load(user_file: &Path) -> ConfigResult<LoadedConfig> {
    load_with_env(user_file, &collect_env_vars())
}

/// Like [`load`], with an explicit environment.
///
/// # Errors
///
/// See [`load`].
pub fn load_with_env<S: ::std::hash::BuildHasher>(
    user_file: &Path,
    env_vars: &HashMap<String, String, S>,
) -> ConfigResult<LoadedConfig> {
    let mut merged: toml::Value =
        toml::from_str(DEFAULTS_TOML).map_err(|e| ConfigError::ParseError {
            path: "<embedded defaults>".to_owned(),
            source: e,
        })?;

    let source_file = match try_load_file(user_file)? {
        Some(overlay) => {
            deep_merge(&mut merged, &overlay);
            info!(path = %user_file.display(), "loaded user config");
            Some(user_file.to_path_buf())
        },
        None => None,
    };

    let env_overrides = apply_env_overrides(&mut merged, env_vars)?;
    if !env_overrides.is_empty() {
        debug!(count = env_overrides.len(), "applied environment overrides");
    }

    let config: Config =
        merged
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::ParseError {
                path: "<merged config>".to_owned(),
                source: e,
            })?;

    validate::validate(&config)?;

    Ok(LoadedConfig {
        config,
        source_file,
        env_overrides,
    })
}

/// Try to load a file, returning `None` if the file doesn't exist.
///
/// The size cap is checked against metadata before anything is read.
fn try_load_file(path: &Path) -> ConfigResult<Option<toml::Value>> {
    let read_error = |e: std::io::Error| ConfigError::ReadError {
        path: path.display().to_string(),
        source: e,
    };

    let metadata = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "config file not found, skipping");
            return Ok(None);
        },
        Err(e) => return Err(read_error(e)),
    };
    if metadata.len() > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::ValidationError {
            field: path.display().to_string(),
            message: format!(
                "config file is {} bytes, exceeding the {MAX_CONFIG_FILE_SIZE} byte limit",
                metadata.len()
            ),
        });
    }

    let content = std::fs::read_to_string(path).map_err(read_error)?;

    let value: toml::Value = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env() -> HashMap<String, String> {
        HashMap::new()
    }

    #[test]
    fn test_defaults_parse_to_default_config() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_with_env(&dir.path().join("config.toml"), &no_env()).unwrap();

        assert_eq!(loaded.config, Config::default());
        assert!(loaded.source_file.is_none());
        assert!(loaded.env_overrides.is_empty());
    }

    #[test]
    fn test_user_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[fediverse]\nincompatible_platforms = [\"misskey\"]\n\n[discord]\ntimeout_secs = 20\n",
        )
        .unwrap();

        let loaded = load_with_env(&path, &no_env()).unwrap();

        assert_eq!(loaded.source_file.as_deref(), Some(path.as_path()));
        assert_eq!(loaded.config.discord.timeout_secs, 20);
        assert_eq!(
            loaded.config.discord.api_base,
            "https://discord.com/api/v9"
        );
        assert_eq!(loaded.config.fediverse.incompatible_platforms, vec!["misskey"]);
    }

    #[test]
    fn test_env_beats_user_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[logging]\nlevel = \"info\"\n").unwrap();
        let env = HashMap::from([("FEDISCORD_LOG_LEVEL".to_string(), "trace".to_string())]);

        let loaded = load_with_env(&path, &env).unwrap();

        assert_eq!(loaded.config.logging.level, "trace");
        assert_eq!(loaded.env_overrides, vec!["FEDISCORD_LOG_LEVEL"]);
    }

    #[test]
    fn test_file_logging_keys_from_user_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[logging]\ndirectory = \"/var/log/fediscord\"\ndirectives = [\"reqwest=info\"]\n",
        )
        .unwrap();

        let loaded = load_with_env(&path, &no_env()).unwrap();

        assert_eq!(
            loaded.config.logging.directory.as_deref(),
            Some("/var/log/fediscord")
        );
        assert_eq!(loaded.config.logging.directives, vec!["reqwest=info"]);
        assert!(!loaded.config.logging.timestamps);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[discord\n").unwrap();

        let err = load_with_env(&path, &no_env()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { ref path, .. } if path.ends_with("config.toml")));
    }

    #[test]
    fn test_wrong_type_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[discord]\ntimeout_secs = \"soon\"\n").unwrap();

        assert!(matches!(
            load_with_env(&path, &no_env()),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn test_invalid_value_is_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[fediverse]\nscheme = \"ftp\"\n").unwrap();

        assert!(matches!(
            load_with_env(&path, &no_env()),
            Err(ConfigError::ValidationError { ref field, .. }) if field == "fediverse.scheme"
        ));
    }

    #[test]
    fn test_oversized_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let padding = "#".repeat(1_048_577);
        std::fs::write(&path, padding).unwrap();

        assert!(matches!(
            load_with_env(&path, &no_env()),
            Err(ConfigError::ValidationError { .. })
        ));
    }

    #[test]
    fn test_size_cap_checked_before_reading() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        // Not UTF-8, so reading it would surface a ReadError instead.
        std::fs::write(&path, [0xFF_u8]).unwrap();
        std::fs::OpenOptions::new()
            .write(true)
            .open(&path)
            .unwrap()
            .set_len(2_097_152)
            .unwrap();

        let err = load_with_env(&path, &no_env()).unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { ref message, .. } if message.contains("byte limit")),
            "unexpected error: {err}"
        );
    }
}
