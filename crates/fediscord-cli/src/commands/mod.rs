//! CLI command implementations.

use anyhow::{Result, anyhow};
use fediscord_config::{Config, ConfigError, LoadedConfig};
use fediscord_core::ConfigPaths;
use fediscord_discord::DiscordClient;
use fediscord_fediverse::{Handle, InstanceInfo, InstanceProber};
use fediscord_storage::{CredentialStore, StoreError};

use crate::config_bridge;
use crate::theme::Theme;

pub(crate) mod connect;
pub(crate) mod delete;
pub(crate) mod doctor;
pub(crate) mod encryption;
pub(crate) mod handle;
pub(crate) mod menu;
pub(crate) mod setup;
pub(crate) mod show;
pub(crate) mod token;

/// Everything a command needs, built once at start-up.
pub(crate) struct Context {
    pub(crate) store: CredentialStore,
    pub(crate) prober: InstanceProber,
    pub(crate) discord: DiscordClient,
    /// The configuration file as loaded, `None` when it failed.
    pub(crate) loaded: Option<LoadedConfig>,
    pub(crate) config_error: Option<ConfigError>,
}

impl Context {
    pub(crate) fn new(
        paths: ConfigPaths,
        config: Config,
        loaded: Option<LoadedConfig>,
        config_error: Option<ConfigError>,
    ) -> Result<Self> {
        let cipher = config_bridge::to_cipher(&config);
        Ok(Self {
            store: CredentialStore::new(paths, Box::new(cipher)),
            prober: config_bridge::to_prober(&config)?,
            discord: config_bridge::to_discord_client(&config)?,
            loaded,
            config_error,
        })
    }

    pub(crate) fn paths(&self) -> &ConfigPaths {
        self.store.paths()
    }
}

/// One user-facing operation, reachable as a subcommand or a menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    Setup,
    Connect,
    Show,
    Token,
    Handle,
    Encryption,
    Delete { assume_yes: bool },
    Doctor,
}

impl Action {
    /// Menu entries in display order.
    pub(crate) const MENU: [Self; 8] = [
        Self::Setup,
        Self::Connect,
        Self::Show,
        Self::Token,
        Self::Handle,
        Self::Encryption,
        Self::Delete { assume_yes: false },
        Self::Doctor,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Setup => "Setup configuration",
            Self::Connect => "Generate connection URL",
            Self::Show => "View stored configuration",
            Self::Token => "Update Discord token",
            Self::Handle => "Update Fediverse handle",
            Self::Encryption => "Change encryption settings",
            Self::Delete { .. } => "Delete all data",
            Self::Doctor => "Run diagnostics",
        }
    }

    pub(crate) async fn run(self, ctx: &Context) -> Result<()> {
        match self {
            Self::Setup => setup::run_setup(ctx).await,
            Self::Connect => connect::run_connect(ctx).await,
            Self::Show => show::run_show(ctx),
            Self::Token => token::run_token(ctx),
            Self::Handle => handle::run_handle(ctx).await,
            Self::Encryption => encryption::run_encryption(ctx),
            Self::Delete { assume_yes } => delete::run_delete(ctx, assume_yes),
            Self::Doctor => doctor::run_doctor(ctx),
        }
    }
}

/// Probe the handle's instance and print what it reported.
///
/// Returns the error instead of printing it so callers decide whether a
/// failed probe is fatal.
pub(crate) async fn probe_and_report(
    ctx: &Context,
    handle: &Handle,
) -> fediscord_fediverse::FediverseResult<InstanceInfo> {
    println!("{}", Theme::success(&format!("Instance: {}", handle.domain())));
    let info = ctx.prober.probe(handle.domain()).await?;
    println!(
        "{}",
        Theme::success(&format!("Instance is running: {}", info.version))
    );
    if let Some(title) = &info.title {
        println!("  {}", Theme::dimmed(title));
    }
    Ok(info)
}

/// Turn a store error into a message fit for the terminal.
///
/// Missing artifacts point the user at `setup`; a missing tool includes
/// the install hint.
pub(crate) fn describe(err: StoreError) -> anyhow::Error {
    match err {
        StoreError::NotFound(artifact) => {
            anyhow!("No {artifact} found. Run setup first (fediscord setup)")
        },
        other => anyhow!(other),
    }
}
