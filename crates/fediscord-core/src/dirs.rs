//! Configuration directory resolution.
//!
//! Every piece of durable state lives in one directory, chosen per host
//! convention unless `$FEDISCORD_HOME` overrides it.
//!
//! # Layout
//!
//! ```text
//! ~/.fediverse-discord/           (ConfigPaths, 0700)
//! ├── discord_token.enc             (ciphertext from the encryption tool, 0600)
//! ├── discord_token.txt             (plaintext token, 0600)
//! ├── fediverse_handle.txt          (user@domain, 0600)
//! ├── .use_encryption               (`true` / `false`, absent = unset)
//! └── config.toml                   (optional user configuration)
//! ```
//!
//! At most one of the two token files exists at a time; the credential
//! store enforces that.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::error::{CoreError, CoreResult};

/// Environment variable that overrides the configuration directory.
pub const HOME_ENV_VAR: &str = "FEDISCORD_HOME";

/// Directory name used under the platform base directory.
const APP_DIR_NAME: &str = "fediverse-discord";

const ENCRYPTED_TOKEN_FILE: &str = "discord_token.enc";
const PLAIN_TOKEN_FILE: &str = "discord_token.txt";
const HANDLE_FILE: &str = "fediverse_handle.txt";
const PREFERENCE_FILE: &str = ".use_encryption";
const CONFIG_FILE: &str = "config.toml";

/// The configuration directory and the fixed artifact paths inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    root: PathBuf,
}

impl ConfigPaths {
    /// Resolve the configuration directory for this host.
    ///
    /// Checks `$FEDISCORD_HOME` first, then falls back to the platform
    /// convention: `~/.fediverse-discord` on Unix-like hosts,
    /// `~/Library/Application Support/fediverse-discord` on macOS and
    /// `%APPDATA%\fediverse-discord` on Windows.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EnvironmentUnavailable`] if the override is empty
    /// or relative, or if the host reports no home directory.
    pub fn resolve() -> CoreResult<Self> {
        Self::resolve_from(std::env::var_os(HOME_ENV_VAR), BaseDirs::new())
    }

    fn resolve_from(override_root: Option<OsString>, base: Option<BaseDirs>) -> CoreResult<Self> {
        if let Some(custom) = override_root {
            return Self::from_override(custom, HOME_ENV_VAR);
        }

        let base = base.ok_or_else(|| {
            CoreError::EnvironmentUnavailable("could not determine the home directory".into())
        })?;
        let root = platform_root(&base);
        tracing::debug!(root = %root.display(), "resolved configuration directory");
        Ok(Self { root })
    }

    /// Use a user-supplied directory, named `source` in the error.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EnvironmentUnavailable`] if `root` is empty or
    /// relative.
    pub fn from_override(root: impl Into<PathBuf>, source: &str) -> CoreResult<Self> {
        let root = root.into();
        if root.as_os_str().is_empty() || !root.is_absolute() {
            return Err(CoreError::EnvironmentUnavailable(format!(
                "{source} must be an absolute path"
            )));
        }
        Ok(Self { root })
    }

    /// Create from an explicit path (useful for testing).
    #[must_use]
    pub fn from_path(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Ensure the directory exists with owner-only permissions.
    ///
    /// Idempotent: an existing directory is left in place and its mode is
    /// reset to `0o700` on Unix.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or permission setting fails.
    pub fn ensure(&self) -> io::Result<()> {
        std::fs::create_dir_all(&self.root)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.root, std::fs::Permissions::from_mode(0o700))?;
        }
        Ok(())
    }

    /// Root directory path.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to the encrypted token artifact.
    #[must_use]
    pub fn encrypted_token_path(&self) -> PathBuf {
        self.root.join(ENCRYPTED_TOKEN_FILE)
    }

    /// Path to the plaintext token artifact.
    #[must_use]
    pub fn plain_token_path(&self) -> PathBuf {
        self.root.join(PLAIN_TOKEN_FILE)
    }

    /// Path to the Fediverse handle artifact.
    #[must_use]
    pub fn handle_path(&self) -> PathBuf {
        self.root.join(HANDLE_FILE)
    }

    /// Path to the encryption preference flag.
    #[must_use]
    pub fn preference_path(&self) -> PathBuf {
        self.root.join(PREFERENCE_FILE)
    }

    /// Path to the optional user configuration file.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }
}

#[cfg(target_os = "windows")]
fn platform_root(base: &BaseDirs) -> PathBuf {
    // Roaming %APPDATA%.
    base.config_dir().join(APP_DIR_NAME)
}

#[cfg(target_os = "macos")]
fn platform_root(base: &BaseDirs) -> PathBuf {
    // ~/Library/Application Support
    base.config_dir().join(APP_DIR_NAME)
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn platform_root(base: &BaseDirs) -> PathBuf {
    base.home_dir().join(format!(".{APP_DIR_NAME}"))
}
