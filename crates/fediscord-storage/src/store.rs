//! The credential store.
//!
//! Owns every artifact under the configuration directory:
//!
//! ```text
//! <root>/
//! ├── discord_token.enc      # encrypted token (exclusive with .txt)
//! ├── discord_token.txt      # plaintext token (exclusive with .enc)
//! ├── fediverse_handle.txt   # user@domain
//! └── .use_encryption        # "true" | "false"; absent means unset
//! ```
//!
//! Replacing the token always writes the new representation durably
//! before removing the old one, and encryption happens before anything is
//! written, so a failing tool leaves the previous token intact.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use fediscord_core::{ConfigPaths, SecretToken};
use fediscord_crypto::Cipher;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::error::{Artifact, StoreError, StoreResult};
use crate::mode::{Protection, SwitchOutcome, TokenState};

const TOOL_INSTALL_HINT: &str = "install it and make sure it is on PATH";

/// Raw reading of the preference artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PreferenceFlag {
    Unset,
    Set(Protection),
    Unreadable(String),
}

/// Persists the Discord token, the Fediverse handle and the encryption
/// preference under one configuration directory.
#[derive(Debug)]
pub struct CredentialStore {
    paths: ConfigPaths,
    cipher: Box<dyn Cipher>,
}

impl CredentialStore {
    /// Create a store over `paths`, using `cipher` for the encrypted form.
    ///
    /// Nothing is created on disk until the first write.
    #[must_use]
    pub fn new(paths: ConfigPaths, cipher: Box<dyn Cipher>) -> Self {
        Self { paths, cipher }
    }

    /// The configuration paths.
    #[must_use]
    pub fn paths(&self) -> &ConfigPaths {
        &self.paths
    }

    /// The encryption tool adapter.
    #[must_use]
    pub fn cipher(&self) -> &dyn Cipher {
        self.cipher.as_ref()
    }

    // ---------------------------------------------------------------
    // Preference
    // ---------------------------------------------------------------

    /// Read the encryption preference.
    ///
    /// A value other than `true`/`false` is read as [`Protection::Plain`]
    /// and logged; [`CredentialStore::verify`] reports it.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotSet`] if no preference was ever chosen, or
    /// [`StoreError::StorageFailed`] if the artifact cannot be read.
    pub fn get_preference(&self) -> StoreResult<Protection> {
        match self.preference_flag()? {
            PreferenceFlag::Unset => Err(StoreError::NotSet),
            PreferenceFlag::Set(protection) => Ok(protection),
            PreferenceFlag::Unreadable(_) => {
                warn!("encryption preference is neither true nor false, treating it as plain text");
                Ok(Protection::Plain)
            },
        }
    }

    /// Write the encryption preference. Token artifacts are not touched.
    ///
    /// # Errors
    ///
    /// [`StoreError::StorageFailed`] if the artifact cannot be written.
    pub fn set_preference(&self, protection: Protection) -> StoreResult<()> {
        self.write_atomic(&self.paths.preference_path(), protection.as_flag().as_bytes())?;
        info!(preference = %protection, "encryption preference saved");
        Ok(())
    }

    pub(crate) fn preference_flag(&self) -> StoreResult<PreferenceFlag> {
        let path = self.paths.preference_path();
        let Some(raw) = read_optional(&path)? else {
            return Ok(PreferenceFlag::Unset);
        };
        let text = String::from_utf8_lossy(&raw);
        Ok(match Protection::from_flag(&text) {
            Some(protection) => PreferenceFlag::Set(protection),
            None => PreferenceFlag::Unreadable(text.trim().to_string()),
        })
    }

    // ---------------------------------------------------------------
    // Token
    // ---------------------------------------------------------------

    /// Which token artifacts currently exist.
    #[must_use]
    pub fn token_state(&self) -> TokenState {
        TokenState::from_presence(self.has_encrypted_token(), self.has_plain_token())
    }

    /// Whether the encrypted token artifact exists.
    #[must_use]
    pub fn has_encrypted_token(&self) -> bool {
        self.paths.encrypted_token_path().is_file()
    }

    /// Whether the plaintext token artifact exists.
    #[must_use]
    pub fn has_plain_token(&self) -> bool {
        self.paths.plain_token_path().is_file()
    }

    /// Store `token` under `protection`, replacing any previous token.
    ///
    /// The new artifact is written and synced before the artifact of the
    /// other representation is removed. If encryption fails nothing on disk
    /// changes.
    ///
    /// # Errors
    ///
    /// - [`StoreError::EmptyToken`] for a blank token
    /// - [`StoreError::ToolUnavailable`] / [`StoreError::EncryptionFailed`]
    ///   when encrypting
    /// - [`StoreError::StorageFailed`] on filesystem errors
    pub fn store_token(&self, token: &SecretToken, protection: Protection) -> StoreResult<()> {
        if token.expose().trim().is_empty() {
            return Err(StoreError::EmptyToken);
        }

        let (target, stale) = match protection {
            Protection::Encrypted => {
                if !self.cipher.is_available() {
                    return Err(self.tool_unavailable());
                }
                let blob = self.cipher.encrypt(token.expose().as_bytes())?;
                let target = self.paths.encrypted_token_path();
                self.write_atomic(&target, &blob)?;
                (target, self.paths.plain_token_path())
            },
            Protection::Plain => {
                let target = self.paths.plain_token_path();
                self.write_atomic(&target, token.expose().as_bytes())?;
                (target, self.paths.encrypted_token_path())
            },
        };
        debug!(path = %target.display(), "token artifact written");

        remove_if_exists(&stale)?;
        info!(protection = %protection, "token stored");
        Ok(())
    }

    /// Read the token.
    ///
    /// The encrypted artifact is authoritative whenever it exists, whatever
    /// the preference says. If it exists and the tool is missing this fails
    /// rather than falling back to a plaintext artifact.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] if no token is stored
    /// - [`StoreError::ToolUnavailable`] / [`StoreError::DecryptionFailed`]
    ///   for the encrypted form
    /// - [`StoreError::StorageFailed`] on filesystem errors
    pub fn retrieve_token(&self) -> StoreResult<SecretToken> {
        let state = self.token_state();
        if state == TokenState::Conflicted {
            warn!("both token representations exist, reading the encrypted one");
        }

        match state.authoritative() {
            None => Err(StoreError::NotFound(Artifact::Token)),
            Some(Protection::Encrypted) => self.decrypt_token(),
            Some(Protection::Plain) => {
                let path = self.paths.plain_token_path();
                let raw = Zeroizing::new(
                    read_optional(&path)?.ok_or(StoreError::NotFound(Artifact::Token))?,
                );
                SecretToken::from_bytes(&raw).map_err(|_| StoreError::NotFound(Artifact::Token))
            },
        }
    }

    fn decrypt_token(&self) -> StoreResult<SecretToken> {
        if !self.cipher.is_available() {
            return Err(self.tool_unavailable());
        }
        let path = self.paths.encrypted_token_path();
        let blob = read_optional(&path)?.ok_or(StoreError::NotFound(Artifact::Token))?;
        debug!(path = %path.display(), "decrypting token");
        let plain = self.cipher.decrypt(&blob)?;
        SecretToken::from_bytes(&plain)
            .map_err(|_| StoreError::DecryptionFailed("decrypted token is empty".to_string()))
    }

    /// Re-store the token under `target` and record `target` as the
    /// preference.
    ///
    /// The token is converted first and the preference written last, so a
    /// failed conversion leaves both untouched. Also resolves the
    /// both-artifacts corruption state.
    ///
    /// # Errors
    ///
    /// Any error from [`CredentialStore::retrieve_token`],
    /// [`CredentialStore::store_token`] or
    /// [`CredentialStore::set_preference`].
    pub fn switch_protection(&self, target: Protection) -> StoreResult<SwitchOutcome> {
        let state = self.token_state();
        let preference_matches = self.preference_flag()? == PreferenceFlag::Set(target);

        let converted = match state {
            TokenState::Absent => false,
            TokenState::Encrypted | TokenState::Plain if state.authoritative() == Some(target) => {
                false
            },
            TokenState::Encrypted | TokenState::Plain | TokenState::Conflicted => {
                let token = self.retrieve_token()?;
                self.store_token(&token, target)?;
                true
            },
        };

        if converted {
            self.set_preference(target)?;
            info!(protection = %target, "token converted");
            Ok(SwitchOutcome::Converted)
        } else if preference_matches {
            Ok(SwitchOutcome::Unchanged)
        } else {
            self.set_preference(target)?;
            Ok(SwitchOutcome::PreferenceOnly)
        }
    }

    // ---------------------------------------------------------------
    // Handle
    // ---------------------------------------------------------------

    /// Overwrite the stored handle. Surrounding whitespace is dropped.
    ///
    /// # Errors
    ///
    /// [`StoreError::StorageFailed`] if the artifact cannot be written.
    pub fn store_handle(&self, handle: &str) -> StoreResult<()> {
        self.write_atomic(&self.paths.handle_path(), handle.trim().as_bytes())?;
        info!(handle = %handle.trim(), "handle stored");
        Ok(())
    }

    /// Read the stored handle.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if absent or blank, or
    /// [`StoreError::StorageFailed`] if it cannot be read.
    pub fn retrieve_handle(&self) -> StoreResult<String> {
        let raw = read_optional(&self.paths.handle_path())?
            .ok_or(StoreError::NotFound(Artifact::Handle))?;
        let handle = String::from_utf8_lossy(&raw).trim().to_string();
        if handle.is_empty() {
            return Err(StoreError::NotFound(Artifact::Handle));
        }
        Ok(handle)
    }

    // ---------------------------------------------------------------
    // Deletion
    // ---------------------------------------------------------------

    /// Remove the whole configuration directory. A missing directory is not
    /// an error.
    ///
    /// # Errors
    ///
    /// [`StoreError::StorageFailed`] if removal fails part way; whatever was
    /// already removed stays removed.
    pub fn delete_all(&self) -> StoreResult<()> {
        let root = self.paths.root();
        match fs::remove_dir_all(root) {
            Ok(()) => {
                info!(path = %root.display(), "configuration directory removed");
                Ok(())
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::storage(root, e)),
        }
    }

    // ---------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------

    fn tool_unavailable(&self) -> StoreError {
        StoreError::ToolUnavailable {
            tool: self.cipher.name().to_string(),
            install_hint: TOOL_INSTALL_HINT.to_string(),
        }
    }

    /// Write `contents` to `path` through a synced owner-only temp file in
    /// the same directory, then rename it into place.
    fn write_atomic(&self, path: &Path, contents: &[u8]) -> StoreResult<()> {
        let root = self.paths.root();
        self.paths
            .ensure()
            .map_err(|e| StoreError::storage(root, e))?;

        let mut tmp = tempfile::Builder::new()
            .prefix(".fediscord-")
            .tempfile_in(root)
            .map_err(|e| StoreError::storage(root, e))?;
        tmp.write_all(contents)
            .map_err(|e| StoreError::storage(tmp.path(), e))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| StoreError::storage(tmp.path(), e))?;
        restrict_to_owner(tmp.path()).map_err(|e| StoreError::storage(tmp.path(), e))?;
        tmp.persist(path)
            .map_err(|e| StoreError::storage(path, e.error))?;
        Ok(())
    }
}

/// Read a whole artifact, mapping "does not exist" to `None`.
fn read_optional(path: &Path) -> StoreResult<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::storage(path, e)),
    }
}

fn remove_if_exists(path: &Path) -> StoreResult<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "stale token artifact removed");
            Ok(())
        },
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(StoreError::storage(path, e)),
    }
}

#[cfg(unix)]
fn restrict_to_owner(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_to_owner(_path: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fediscord_test::{MockCipher, TestHome, test_token};

    fn store(home: &TestHome, cipher: &MockCipher) -> CredentialStore {
        CredentialStore::new(home.paths(), Box::new(cipher.clone()))
    }

    #[test]
    fn test_encrypted_artifact_is_not_plaintext() {
        let home = TestHome::new();
        let cipher = MockCipher::new();
        let store = store(&home, &cipher);

        store
            .store_token(&test_token("secret"), Protection::Encrypted)
            .unwrap();
        let on_disk = fs::read(home.paths().encrypted_token_path()).unwrap();
        assert_eq!(on_disk, MockCipher::seal(b"secret"));
        assert!(!store.has_plain_token());
    }

    #[test]
    fn test_plain_token_is_trimmed_on_read() {
        let home = TestHome::new();
        let store = store(&home, &MockCipher::new());
        home.paths().ensure().unwrap();
        fs::write(home.paths().plain_token_path(), "abc.def \n").unwrap();

        assert_eq!(store.retrieve_token().unwrap().expose(), "abc.def");
    }

    #[test]
    fn test_blank_artifacts_read_as_not_found() {
        let home = TestHome::new();
        let store = store(&home, &MockCipher::new());
        home.paths().ensure().unwrap();
        fs::write(home.paths().plain_token_path(), "\n").unwrap();
        fs::write(home.paths().handle_path(), "  ").unwrap();

        assert!(store.retrieve_token().unwrap_err().is_not_found());
        assert!(store.retrieve_handle().unwrap_err().is_not_found());
    }

    #[test]
    fn test_unknown_preference_reads_as_plain() {
        let home = TestHome::new();
        let store = store(&home, &MockCipher::new());
        home.paths().ensure().unwrap();
        fs::write(home.paths().preference_path(), "maybe").unwrap();

        assert_eq!(store.get_preference().unwrap(), Protection::Plain);
        assert_eq!(
            store.preference_flag().unwrap(),
            PreferenceFlag::Unreadable("maybe".into())
        );
    }

    #[test]
    fn test_store_without_tool_touches_nothing() {
        let home = TestHome::new();
        let cipher = MockCipher::unavailable();
        let store = store(&home, &cipher);

        let err = store
            .store_token(&test_token("secret"), Protection::Encrypted)
            .unwrap_err();
        assert!(matches!(err, StoreError::ToolUnavailable { ref tool, .. } if tool == "mock"));
        assert_eq!(cipher.encrypt_calls(), 0);
        assert!(!home.paths().root().exists());
    }

    #[test]
    fn test_writes_recreate_directory_after_delete_all() {
        let home = TestHome::new();
        let store = store(&home, &MockCipher::new());

        store.store_handle("alice@example.social").unwrap();
        store.delete_all().unwrap();
        store.delete_all().unwrap();
        store.store_handle("bob@example.social").unwrap();

        assert_eq!(store.retrieve_handle().unwrap(), "bob@example.social");
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let home = TestHome::new();
        let store = store(&home, &MockCipher::new());
        store
            .store_token(&test_token("secret"), Protection::Plain)
            .unwrap();
        store.set_preference(Protection::Plain).unwrap();

        let names: Vec<String> = fs::read_dir(home.paths().root())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert!(names.iter().all(|n| !n.starts_with(".fediscord-")), "{names:?}");
    }

    #[cfg(unix)]
    #[test]
    fn test_artifacts_are_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let home = TestHome::new();
        let store = store(&home, &MockCipher::new());
        store
            .store_token(&test_token("secret"), Protection::Encrypted)
            .unwrap();
        store.store_handle("alice@example.social").unwrap();

        for path in [
            home.paths().encrypted_token_path(),
            home.paths().handle_path(),
        ] {
            let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
            assert_eq!(mode, 0o600, "{}", path.display());
        }
        let dir_mode = fs::metadata(home.paths().root())
            .unwrap()
            .permissions()
            .mode()
            & 0o777;
        assert_eq!(dir_mode, 0o700);
    }

    #[test]
    fn test_switch_protection_outcomes() {
        let home = TestHome::new();
        let cipher = MockCipher::new();
        let store = store(&home, &cipher);

        assert_eq!(
            store.switch_protection(Protection::Encrypted).unwrap(),
            SwitchOutcome::PreferenceOnly
        );
        assert_eq!(
            store.switch_protection(Protection::Encrypted).unwrap(),
            SwitchOutcome::Unchanged
        );

        store
            .store_token(&test_token("secret"), Protection::Plain)
            .unwrap();
        assert_eq!(
            store.switch_protection(Protection::Encrypted).unwrap(),
            SwitchOutcome::Converted
        );
        assert_eq!(store.token_state(), TokenState::Encrypted);
        assert_eq!(store.retrieve_token().unwrap().expose(), "secret");
    }

    #[test]
    fn test_failed_switch_keeps_preference() {
        let home = TestHome::new();
        let cipher = MockCipher::new();
        let store = store(&home, &cipher);
        store.set_preference(Protection::Plain).unwrap();
        store
            .store_token(&test_token("secret"), Protection::Plain)
            .unwrap();

        cipher.set_failing(true);
        assert!(store.switch_protection(Protection::Encrypted).is_err());
        assert_eq!(store.get_preference().unwrap(), Protection::Plain);
        assert_eq!(store.token_state(), TokenState::Plain);
    }
}
