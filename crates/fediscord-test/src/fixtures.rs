//! Test fixtures for common types.

use std::path::Path;

use fediscord_core::{ConfigPaths, SecretToken};
use tempfile::TempDir;

/// A throwaway configuration directory.
///
/// The [`ConfigPaths`] root is a not-yet-created subdirectory of a fresh
/// temp dir, so tests also exercise lazy directory creation. Everything is
/// removed when the fixture is dropped.
#[derive(Debug)]
pub struct TestHome {
    dir: TempDir,
    paths: ConfigPaths,
}

impl Default for TestHome {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHome {
    /// Create a new fixture.
    ///
    /// # Panics
    ///
    /// Panics if a temp directory cannot be created.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let paths = ConfigPaths::from_path(dir.path().join("fediverse-discord"));
        Self { dir, paths }
    }

    /// Paths rooted in this fixture.
    #[must_use]
    pub fn paths(&self) -> ConfigPaths {
        self.paths.clone()
    }

    /// The enclosing temp directory.
    #[must_use]
    pub fn temp_root(&self) -> &Path {
        self.dir.path()
    }
}

/// Create a test token.
///
/// # Panics
///
/// Panics if `raw` is blank.
#[must_use]
#[allow(clippy::expect_used)]
pub fn test_token(raw: &str) -> SecretToken {
    SecretToken::new(raw).expect("test token must not be blank")
}

/// Install a `tracing` subscriber that writes to the test harness output.
///
/// Safe to call from many tests; only the first call installs anything.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
