//! Bridge from `fediscord_config::Config` to the domain types.

use std::time::Duration;

use anyhow::{Context as _, Result};
use fediscord_config::Config;
use fediscord_crypto::GpgCipher;
use fediscord_discord::DiscordClient;
use fediscord_fediverse::InstanceProber;
use fediscord_telemetry::{LogConfig, LogFormat};

/// Build the logging setup; `--verbose` forces `debug`.
///
/// An unknown format falls back to compact, since validation already
/// rejects it when the file is loaded. `stderr_is_terminal` decides colors
/// for the stderr target; file logs never carry them.
pub(crate) fn to_log_config(config: &Config, verbose: bool, stderr_is_terminal: bool) -> LogConfig {
    let logging = &config.logging;
    let format = logging
        .format
        .parse::<LogFormat>()
        .unwrap_or(LogFormat::Compact);
    let level = if verbose {
        "debug".to_string()
    } else {
        logging.level.clone()
    };

    let mut log = logging
        .directives
        .iter()
        .fold(LogConfig::new(level).with_format(format), |log, d| {
            log.with_directive(d.clone())
        });
    if logging.timestamps {
        log = log.with_timestamps();
    }
    match &logging.directory {
        Some(dir) => log.with_file_logging(dir).with_timestamps(),
        None if !stderr_is_terminal => log.without_ansi(),
        None => log,
    }
}

/// Build the encryption tool adapter.
pub(crate) fn to_cipher(config: &Config) -> GpgCipher {
    GpgCipher::new()
        .with_program(config.encryption.program.clone())
        .with_cipher_algo(config.encryption.cipher_algo.clone())
}

/// Build the instance prober.
pub(crate) fn to_prober(config: &Config) -> Result<InstanceProber> {
    let prober = InstanceProber::new(Duration::from_secs(config.fediverse.timeout_secs))
        .context("failed to set up the instance probe")?
        .with_scheme(config.fediverse.scheme.clone())
        .with_incompatible_platforms(config.fediverse.incompatible_platforms.iter().cloned());
    Ok(prober)
}

/// Build the Discord client.
pub(crate) fn to_discord_client(config: &Config) -> Result<DiscordClient> {
    DiscordClient::new(
        config.discord.api_base.clone(),
        Duration::from_secs(config.discord.timeout_secs),
    )
    .context("failed to set up the Discord client")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use fediscord_crypto::Cipher;
    use fediscord_telemetry::LogTarget;

    #[test]
    fn test_log_config_follows_config() {
        let mut config = Config::default();
        config.logging.level = "info".into();
        config.logging.format = "json".into();

        let log = to_log_config(&config, false, true);
        assert_eq!(log.level, "info");
        assert_eq!(log.format, LogFormat::Json);
        assert_eq!(log.target, LogTarget::Stderr);
        assert!(log.ansi);
        assert!(!log.timestamps);
    }

    #[test]
    fn test_verbose_forces_debug() {
        let log = to_log_config(&Config::default(), true, true);
        assert_eq!(log.level, "debug");
        assert_eq!(log.format, LogFormat::Compact);
    }

    #[test]
    fn test_log_directory_selects_file_target() {
        let mut config = Config::default();
        config.logging.directory = Some("/var/log/fediscord".into());
        config.logging.directives = vec!["reqwest=info".into(), "fediscord_storage=debug".into()];

        let log = to_log_config(&config, false, true);

        assert_eq!(
            log.target,
            LogTarget::File(PathBuf::from("/var/log/fediscord"))
        );
        assert!(!log.ansi);
        assert!(log.timestamps);
        assert_eq!(log.directives, vec!["reqwest=info", "fediscord_storage=debug"]);
    }

    #[test]
    fn test_redirected_stderr_drops_colors() {
        let mut config = Config::default();
        config.logging.timestamps = true;

        let log = to_log_config(&config, false, false);

        assert_eq!(log.target, LogTarget::Stderr);
        assert!(!log.ansi);
        assert!(log.timestamps);
    }

    #[test]
    fn test_cipher_uses_configured_program() {
        let mut config = Config::default();
        config.encryption.program = "gpg2".into();
        assert_eq!(to_cipher(&config).name(), "gpg2");
    }

    #[test]
    fn test_clients_build_from_defaults() {
        let config = Config::default();
        assert_eq!(
            to_discord_client(&config).unwrap().api_base(),
            "https://discord.com/api/v9"
        );
        assert!(to_prober(&config).is_ok());
    }
}
