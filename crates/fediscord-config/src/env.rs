//! Environment variable overrides.
//!
//! `FEDISCORD_*` variables sit above both the defaults and the user file.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::merge::set_path;

/// Mapping from environment variable name to config field path.
struct EnvMapping {
    var_name: &'static str,
    field_path: &'static str,
    kind: ValueKind,
}

#[derive(Clone, Copy)]
enum ValueKind {
    Str,
    Seconds,
    /// Comma-separated; blank items are dropped.
    List,
}

const ENV_MAPPINGS: &[EnvMapping] = &[
    EnvMapping {
        var_name: "FEDISCORD_GPG_PROGRAM",
        field_path: "encryption.program",
        kind: ValueKind::Str,
    },
    EnvMapping {
        var_name: "FEDISCORD_DISCORD_API_BASE",
        field_path: "discord.api_base",
        kind: ValueKind::Str,
    },
    EnvMapping {
        var_name: "FEDISCORD_DISCORD_TIMEOUT_SECS",
        field_path: "discord.timeout_secs",
        kind: ValueKind::Seconds,
    },
    EnvMapping {
        var_name: "FEDISCORD_FEDIVERSE_TIMEOUT_SECS",
        field_path: "fediverse.timeout_secs",
        kind: ValueKind::Seconds,
    },
    EnvMapping {
        var_name: "FEDISCORD_LOG_LEVEL",
        field_path: "logging.level",
        kind: ValueKind::Str,
    },
    EnvMapping {
        var_name: "FEDISCORD_LOG_FORMAT",
        field_path: "logging.format",
        kind: ValueKind::Str,
    },
    EnvMapping {
        var_name: "FEDISCORD_LOG_DIR",
        field_path: "logging.directory",
        kind: ValueKind::Str,
    },
    EnvMapping {
        var_name: "FEDISCORD_LOG_DIRECTIVES",
        field_path: "logging.directives",
        kind: ValueKind::List,
    },
];

/// Snapshot the `FEDISCORD_*` variables from the process environment.
#[must_use]
pub fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars()
        .filter(|(k, _)| k.starts_with("FEDISCORD_"))
        .collect()
}

/// Apply every mapped variable present in `env_vars` to `merged`.
///
/// Empty values are ignored. Returns the names of the variables applied.
///
/// # Errors
///
/// [`ConfigError::EnvError`] if a numeric variable does not parse.
pub(crate) fn apply_env_overrides<S: ::std::hash::BuildHasher>(
    merged: &mut toml::Value,
    env_vars: &HashMap<String, String, S>,
) -> ConfigResult<Vec<&'static str>> {
    let mut applied = Vec::new();

    for mapping in ENV_MAPPINGS {
        let Some(raw) = env_vars.get(mapping.var_name) else {
            continue;
        };
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }

        let value = match mapping.kind {
            ValueKind::Str => toml::Value::String(raw.to_owned()),
            ValueKind::Seconds => {
                let secs: i64 = raw.parse().map_err(|_| ConfigError::EnvError {
                    var_name: mapping.var_name.to_owned(),
                    message: format!("expected a whole number of seconds, got '{raw}'"),
                })?;
                toml::Value::Integer(secs)
            },
            ValueKind::List => toml::Value::Array(
                raw.split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(|item| toml::Value::String(item.to_owned()))
                    .collect(),
            ),
        };

        debug!(
            var = mapping.var_name,
            field = mapping.field_path,
            "applying env var override"
        );
        set_path(merged, mapping.field_path, value);
        applied.push(mapping.var_name);
    }

    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_tree() -> toml::Value {
        toml::Value::Table(toml::map::Map::new())
    }

    #[test]
    fn test_overrides_strings_and_numbers() {
        let env = HashMap::from([
            ("FEDISCORD_GPG_PROGRAM".to_string(), "gpg2".to_string()),
            (
                "FEDISCORD_DISCORD_TIMEOUT_SECS".to_string(),
                " 30 ".to_string(),
            ),
            ("UNRELATED".to_string(), "x".to_string()),
        ]);
        let mut tree = empty_tree();

        let applied = apply_env_overrides(&mut tree, &env).unwrap();

        assert_eq!(
            applied,
            vec!["FEDISCORD_GPG_PROGRAM", "FEDISCORD_DISCORD_TIMEOUT_SECS"]
        );
        assert_eq!(tree["encryption"]["program"].as_str(), Some("gpg2"));
        assert_eq!(tree["discord"]["timeout_secs"].as_integer(), Some(30));
    }

    #[test]
    fn test_log_directory_and_directives() {
        let env = HashMap::from([
            ("FEDISCORD_LOG_DIR".to_string(), "/var/log/fediscord".to_string()),
            (
                "FEDISCORD_LOG_DIRECTIVES".to_string(),
                "reqwest=info, ,fediscord_storage=debug".to_string(),
            ),
        ]);
        let mut tree = empty_tree();

        apply_env_overrides(&mut tree, &env).unwrap();

        assert_eq!(
            tree["logging"]["directory"].as_str(),
            Some("/var/log/fediscord")
        );
        let directives: Vec<_> = tree["logging"]["directives"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(directives, vec!["reqwest=info", "fediscord_storage=debug"]);
    }

    #[test]
    fn test_empty_values_are_ignored() {
        let env = HashMap::from([("FEDISCORD_LOG_LEVEL".to_string(), "  ".to_string())]);
        let mut tree = empty_tree();
        assert!(apply_env_overrides(&mut tree, &env).unwrap().is_empty());
    }

    #[test]
    fn test_bad_number_is_env_error() {
        let env = HashMap::from([(
            "FEDISCORD_FEDIVERSE_TIMEOUT_SECS".to_string(),
            "ten".to_string(),
        )]);
        let err = apply_env_overrides(&mut empty_tree(), &env).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::EnvError { ref var_name, .. } if var_name == "FEDISCORD_FEDIVERSE_TIMEOUT_SECS"
        ));
    }
}
