//! Redacting wrapper for the Discord token.

use std::fmt;

use zeroize::Zeroizing;

use crate::error::{CoreError, CoreResult};

/// Placeholder shown wherever a secret would otherwise be formatted.
pub const REDACTED: &str = "[REDACTED]";

/// A non-empty Discord token.
///
/// The backing string is zeroized on drop, and neither `Debug` nor
/// `Display` reveal it. Use [`SecretToken::expose`] at the one place the raw
/// value is actually needed (the authorization header, the encryption
/// tool's stdin, the plaintext artifact).
#[derive(Clone, PartialEq, Eq)]
pub struct SecretToken(Zeroizing<String>);

impl SecretToken {
    /// Build a token, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyToken`] if nothing remains after trimming.
    pub fn new(raw: impl Into<String>) -> CoreResult<Self> {
        let raw = Zeroizing::new(raw.into());
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CoreError::EmptyToken);
        }
        Ok(Self(Zeroizing::new(trimmed.to_owned())))
    }

    /// Build a token from raw bytes (e.g. decrypted tool output).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyToken`] if the bytes are empty after
    /// trimming. Invalid UTF-8 sequences are replaced, which yields a token
    /// the remote API will reject rather than a panic here.
    pub fn from_bytes(bytes: &[u8]) -> CoreResult<Self> {
        let text = Zeroizing::new(String::from_utf8_lossy(bytes).into_owned());
        Self::new(text.as_str())
    }

    /// The raw token.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// First `chars` characters followed by `...`, for status displays.
    #[must_use]
    pub fn preview(&self, chars: usize) -> String {
        let head: String = self.0.chars().take(chars).collect();
        format!("{head}...")
    }

    /// Length of the token in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; kept for clippy's `len_without_is_empty`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecretToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretToken({REDACTED})")
    }
}

impl fmt::Display for SecretToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_whitespace() {
        let token = SecretToken::new("\t abc.def \n").unwrap();
        assert_eq!(token.expose(), "abc.def");
        assert_eq!(token.len(), 7);
    }

    #[test]
    fn test_rejects_empty_and_blank() {
        assert!(matches!(SecretToken::new(""), Err(CoreError::EmptyToken)));
        assert!(matches!(SecretToken::new("   \n"), Err(CoreError::EmptyToken)));
    }

    #[test]
    fn test_from_bytes() {
        let token = SecretToken::from_bytes(b"secret\n").unwrap();
        assert_eq!(token.expose(), "secret");
        assert!(SecretToken::from_bytes(b"\n").is_err());
    }

    #[test]
    fn test_debug_and_display_are_redacted() {
        let token = SecretToken::new("super-secret-value").unwrap();
        assert!(!format!("{token:?}").contains("super"));
        assert_eq!(token.to_string(), REDACTED);
    }

    #[test]
    fn test_preview() {
        let token = SecretToken::new("0123456789abcdef").unwrap();
        assert_eq!(token.preview(10), "0123456789...");

        let short = SecretToken::new("abc").unwrap();
        assert_eq!(short.preview(10), "abc...");
    }
}
