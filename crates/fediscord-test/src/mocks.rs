//! Mock implementations for testing.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use fediscord_crypto::{Cipher, CryptoError, CryptoResult};
use zeroize::Zeroizing;

/// Marker prepended to every blob the mock produces.
pub const MOCK_CIPHERTEXT_PREFIX: &[u8] = b"MOCKENC1:";

const XOR_KEY: u8 = 0x5a;

/// In-memory stand-in for the encryption tool.
///
/// Encryption is a reversible transform (prefix + XOR) so blobs never equal
/// their plaintext. Clones share state, so a test can hand one clone to the
/// store and keep another to flip switches and read counters.
#[derive(Debug, Clone)]
pub struct MockCipher {
    state: Arc<MockState>,
}

#[derive(Debug)]
struct MockState {
    available: AtomicBool,
    failing: AtomicBool,
    encrypt_calls: AtomicUsize,
    decrypt_calls: AtomicUsize,
}

impl Default for MockCipher {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCipher {
    /// Create an available, working mock.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(MockState {
                available: AtomicBool::new(true),
                failing: AtomicBool::new(false),
                encrypt_calls: AtomicUsize::new(0),
                decrypt_calls: AtomicUsize::new(0),
            }),
        }
    }

    /// Create a mock that reports the tool as not installed.
    #[must_use]
    pub fn unavailable() -> Self {
        let mock = Self::new();
        mock.set_available(false);
        mock
    }

    /// Create a mock whose encrypt and decrypt calls fail.
    #[must_use]
    pub fn failing() -> Self {
        let mock = Self::new();
        mock.set_failing(true);
        mock
    }

    /// Toggle whether the tool appears installed.
    pub fn set_available(&self, available: bool) {
        self.state.available.store(available, Ordering::SeqCst);
    }

    /// Toggle whether encrypt/decrypt fail as if the tool exited non-zero.
    pub fn set_failing(&self, failing: bool) {
        self.state.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of `encrypt` calls so far.
    #[must_use]
    pub fn encrypt_calls(&self) -> usize {
        self.state.encrypt_calls.load(Ordering::SeqCst)
    }

    /// Number of `decrypt` calls so far.
    #[must_use]
    pub fn decrypt_calls(&self) -> usize {
        self.state.decrypt_calls.load(Ordering::SeqCst)
    }

    /// Produce the blob the mock would write for `plaintext`, without
    /// touching the counters.
    #[must_use]
    pub fn seal(plaintext: &[u8]) -> Vec<u8> {
        let mut blob = MOCK_CIPHERTEXT_PREFIX.to_vec();
        blob.extend(plaintext.iter().map(|b| b ^ XOR_KEY));
        blob
    }

    fn check(&self) -> Result<(), CryptoError> {
        if !self.state.available.load(Ordering::SeqCst) {
            return Err(CryptoError::ToolUnavailable {
                tool: "mock".into(),
                install_hint: "enable the mock".into(),
            });
        }
        Ok(())
    }
}

impl Cipher for MockCipher {
    fn name(&self) -> &str {
        "mock"
    }

    fn is_available(&self) -> bool {
        self.state.available.load(Ordering::SeqCst)
    }

    fn encrypt(&self, plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
        self.state.encrypt_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        if self.state.failing.load(Ordering::SeqCst) {
            return Err(CryptoError::EncryptionFailed("mock exited with 2".into()));
        }
        Ok(Self::seal(plaintext))
    }

    fn decrypt(&self, ciphertext: &[u8]) -> CryptoResult<Zeroizing<Vec<u8>>> {
        self.state.decrypt_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        if self.state.failing.load(Ordering::SeqCst) {
            return Err(CryptoError::DecryptionFailed("mock exited with 2".into()));
        }
        let body = ciphertext
            .strip_prefix(MOCK_CIPHERTEXT_PREFIX)
            .ok_or_else(|| CryptoError::DecryptionFailed("not a mock blob".into()))?;
        Ok(Zeroizing::new(body.iter().map(|b| b ^ XOR_KEY).collect()))
    }
}
