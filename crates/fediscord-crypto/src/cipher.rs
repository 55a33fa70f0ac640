//! Capability interface over the encryption tool.

use std::fmt;

use zeroize::Zeroizing;

use crate::error::CryptoResult;

/// Symmetric encrypt/decrypt over byte buffers.
///
/// Implementations are stateless from the caller's point of view: every
/// call is a blocking, synchronous round-trip with no timeout, since the
/// tool may wait indefinitely on an interactive passphrase prompt.
pub trait Cipher: Send + Sync + fmt::Debug {
    /// Short name used in log events and user-facing messages.
    fn name(&self) -> &str;

    /// Whether the tool can be invoked at all. Absence is a normal `false`.
    fn is_available(&self) -> bool;

    /// Encrypt `plaintext`, returning the opaque ciphertext blob.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::ToolUnavailable`](crate::CryptoError::ToolUnavailable)
    /// or [`CryptoError::EncryptionFailed`](crate::CryptoError::EncryptionFailed).
    fn encrypt(&self, plaintext: &[u8]) -> CryptoResult<Vec<u8>>;

    /// Decrypt a blob previously produced by [`Cipher::encrypt`].
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::ToolUnavailable`](crate::CryptoError::ToolUnavailable)
    /// or [`CryptoError::DecryptionFailed`](crate::CryptoError::DecryptionFailed).
    fn decrypt(&self, ciphertext: &[u8]) -> CryptoResult<Zeroizing<Vec<u8>>>;
}
