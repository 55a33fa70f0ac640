//! Typed forms of the encryption flag and the on-disk token state.

use std::fmt;

/// How the token is (or should be) stored.
///
/// The typed form of the `use encryption` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protection {
    /// Encrypted blob produced by the encryption tool.
    Encrypted,
    /// Raw UTF-8 bytes.
    Plain,
}

impl Protection {
    /// Map the boolean flag.
    #[must_use]
    pub fn from_encrypted(use_encryption: bool) -> Self {
        if use_encryption {
            Self::Encrypted
        } else {
            Self::Plain
        }
    }

    /// Whether this is [`Protection::Encrypted`].
    #[must_use]
    pub fn is_encrypted(self) -> bool {
        matches!(self, Self::Encrypted)
    }

    /// Literal written to the preference artifact.
    #[must_use]
    pub fn as_flag(self) -> &'static str {
        match self {
            Self::Encrypted => "true",
            Self::Plain => "false",
        }
    }

    /// Parse the preference artifact. Surrounding whitespace is ignored.
    #[must_use]
    pub fn from_flag(raw: &str) -> Option<Self> {
        match raw.trim() {
            "true" => Some(Self::Encrypted),
            "false" => Some(Self::Plain),
            _ => None,
        }
    }

    /// The other representation.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::Encrypted => Self::Plain,
            Self::Plain => Self::Encrypted,
        }
    }
}

impl fmt::Display for Protection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encrypted => f.write_str("encrypted"),
            Self::Plain => f.write_str("plain text"),
        }
    }
}

/// Which token artifacts are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    /// Neither artifact exists.
    Absent,
    /// Only the encrypted artifact exists.
    Encrypted,
    /// Only the plaintext artifact exists.
    Plain,
    /// Both exist. Never produced by the store itself.
    Conflicted,
}

impl TokenState {
    /// Classify from artifact presence.
    #[must_use]
    pub fn from_presence(encrypted: bool, plain: bool) -> Self {
        match (encrypted, plain) {
            (false, false) => Self::Absent,
            (true, false) => Self::Encrypted,
            (false, true) => Self::Plain,
            (true, true) => Self::Conflicted,
        }
    }

    /// The representation a read would use. The encrypted artifact wins
    /// whenever it exists.
    #[must_use]
    pub fn authoritative(self) -> Option<Protection> {
        match self {
            Self::Absent => None,
            Self::Encrypted | Self::Conflicted => Some(Protection::Encrypted),
            Self::Plain => Some(Protection::Plain),
        }
    }

    /// Whether any token artifact exists.
    #[must_use]
    pub fn is_present(self) -> bool {
        !matches!(self, Self::Absent)
    }
}

/// Result of [`CredentialStore::switch_protection`](crate::CredentialStore::switch_protection).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// The token was re-stored under the new representation.
    Converted,
    /// No token needed converting; only the preference was written.
    PreferenceOnly,
    /// Token and preference already matched.
    Unchanged,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_round_trip() {
        assert_eq!(Protection::from_flag("true\n"), Some(Protection::Encrypted));
        assert_eq!(Protection::from_flag(" false"), Some(Protection::Plain));
        assert_eq!(Protection::from_flag("yes"), None);
        assert_eq!(Protection::Encrypted.as_flag(), "true");
        assert_eq!(Protection::from_encrypted(false), Protection::Plain);
        assert_eq!(Protection::Plain.other(), Protection::Encrypted);
    }

    #[test]
    fn test_token_state() {
        assert_eq!(TokenState::from_presence(false, false), TokenState::Absent);
        assert_eq!(
            TokenState::from_presence(true, true).authoritative(),
            Some(Protection::Encrypted)
        );
        assert_eq!(
            TokenState::from_presence(false, true).authoritative(),
            Some(Protection::Plain)
        );
        assert!(!TokenState::Absent.is_present());
    }
}
