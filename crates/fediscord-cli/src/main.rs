//! Fediscord - Fediverse to Discord connection tool.
//!
//! Stores a Discord token (encrypted with GnuPG by default) and a Fediverse
//! handle, then asks Discord for the authorization URL that links the
//! account to a Discord profile. With no subcommand an interactive menu is
//! shown.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use fediscord_core::ConfigPaths;

mod commands;
mod config_bridge;
mod prompt;
mod theme;

use commands::{Action, Context, menu};

/// Fediscord - link a Fediverse account to Discord
#[derive(Parser)]
#[command(name = "fediscord")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration directory, an absolute path (overrides FEDISCORD_HOME)
    #[arg(long, global = true, value_name = "DIR")]
    home: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// First-time setup: token, encryption choice and handle
    Setup,

    /// Generate the Discord authorization URL
    Connect,

    /// Show the stored configuration
    Show,

    /// Replace the stored Discord token
    Token,

    /// Replace the stored Fediverse handle
    Handle,

    /// Change how the token is protected
    Encryption,

    /// Delete every stored artifact
    Delete {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Check the environment and the stored files
    Doctor,
}

impl Commands {
    fn action(&self) -> Action {
        match self {
            Self::Setup => Action::Setup,
            Self::Connect => Action::Connect,
            Self::Show => Action::Show,
            Self::Token => Action::Token,
            Self::Handle => Action::Handle,
            Self::Encryption => Action::Encryption,
            Self::Delete { yes } => Action::Delete { assume_yes: *yes },
            Self::Doctor => Action::Doctor,
        }
    }
}

/// `--home` wins over `FEDISCORD_HOME`; both must be absolute.
fn resolve_paths(home: Option<PathBuf>) -> Result<ConfigPaths> {
    Ok(match home {
        Some(dir) => ConfigPaths::from_override(dir, "--home")?,
        None => ConfigPaths::resolve()?,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = resolve_paths(cli.home)?;

    // A broken config file must not lock the user out; doctor reports it.
    let (loaded, config_error) = match fediscord_config::load(&paths.config_path()) {
        Ok(loaded) => (Some(loaded), None),
        Err(e) => (None, Some(e)),
    };
    let config = loaded
        .as_ref()
        .map(|l| l.config.clone())
        .unwrap_or_default();

    let log_config =
        config_bridge::to_log_config(&config, cli.verbose, std::io::stderr().is_terminal());
    if let Err(e) = fediscord_telemetry::setup_logging(&log_config) {
        eprintln!("Failed to initialize logging: {e}");
    }
    if let Some(e) = &config_error {
        tracing::warn!(error = %e, "Configuration ignored, using defaults");
    }

    let ctx = Context::new(paths, config, loaded, config_error)?;

    match cli.command {
        Some(command) => command.action().run(&ctx).await,
        None => menu::run_menu(&ctx).await,
    }
}
