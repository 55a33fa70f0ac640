//! Consistency check over the configuration directory.

use std::fmt;
use std::path::PathBuf;

use tracing::debug;

use crate::mode::{Protection, TokenState};
use crate::store::{CredentialStore, PreferenceFlag};

/// A problem found by [`CredentialStore::verify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inconsistency {
    /// Both token artifacts exist.
    BothRepresentations,
    /// The token is stored under the other representation than the
    /// preference asks for. Reads still succeed (the encrypted artifact
    /// wins), so this is informational.
    PreferenceMismatch {
        /// What the preference says.
        preference: Protection,
        /// What is on disk.
        stored: Protection,
    },
    /// The directory or an artifact is readable or writable by others.
    InsecurePermissions {
        /// Offending path.
        path: PathBuf,
        /// Permission bits (`mode & 0o777`).
        mode: u32,
    },
    /// The preference artifact holds neither `true` nor `false`.
    UnreadablePreference {
        /// What it holds, trimmed.
        content: String,
    },
}

impl Inconsistency {
    /// Whether this is corruption rather than an advisory.
    #[must_use]
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Self::BothRepresentations | Self::UnreadablePreference { .. }
        )
    }
}

impl fmt::Display for Inconsistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BothRepresentations => {
                f.write_str("both an encrypted and a plain text token are stored")
            },
            Self::PreferenceMismatch { preference, stored } => write!(
                f,
                "preference is {preference} but the token is stored as {stored}"
            ),
            Self::InsecurePermissions { path, mode } => {
                write!(f, "{} has mode {mode:o}, expected owner-only", path.display())
            },
            Self::UnreadablePreference { content } => {
                write!(f, "encryption preference holds {content:?}")
            },
        }
    }
}

impl CredentialStore {
    /// Inspect the directory for states the store never produces itself.
    ///
    /// Read errors on individual artifacts are skipped; an empty result
    /// means nothing suspicious was found.
    #[must_use]
    pub fn verify(&self) -> Vec<Inconsistency> {
        let mut found = Vec::new();
        let state = self.token_state();

        if state == TokenState::Conflicted {
            found.push(Inconsistency::BothRepresentations);
        }

        match self.preference_flag() {
            Ok(PreferenceFlag::Set(preference)) => {
                if state != TokenState::Conflicted
                    && let Some(stored) = state.authoritative()
                    && stored != preference
                {
                    found.push(Inconsistency::PreferenceMismatch { preference, stored });
                }
            },
            Ok(PreferenceFlag::Unreadable(content)) => {
                found.push(Inconsistency::UnreadablePreference { content });
            },
            Ok(PreferenceFlag::Unset) | Err(_) => {},
        }

        found.extend(self.insecure_permissions());
        debug!(count = found.len(), "consistency check finished");
        found
    }

    #[cfg(unix)]
    fn insecure_permissions(&self) -> Vec<Inconsistency> {
        use std::os::unix::fs::PermissionsExt;

        let paths = self.paths();
        [
            paths.root().to_path_buf(),
            paths.encrypted_token_path(),
            paths.plain_token_path(),
            paths.handle_path(),
            paths.preference_path(),
        ]
        .into_iter()
        .filter_map(|path| {
            let mode = std::fs::metadata(&path).ok()?.permissions().mode() & 0o777;
            (mode & 0o077 != 0).then_some(Inconsistency::InsecurePermissions { path, mode })
        })
        .collect()
    }

    #[cfg(not(unix))]
    fn insecure_permissions(&self) -> Vec<Inconsistency> {
        Vec::new()
    }
}
