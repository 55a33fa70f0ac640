//! Fediscord Storage - The credential store.
//!
//! Persists three things under one configuration directory:
//!
//! - the Discord token, as exactly one of an encrypted blob or plain text
//! - the encryption preference, a tri-state flag (`true`, `false`, unset)
//! - the Fediverse handle
//!
//! # Invariants
//!
//! - At most one token representation exists after any store operation.
//! - Replacing the token writes the new artifact before removing the old.
//! - A failing encryption tool leaves every artifact untouched.
//! - An existing encrypted artifact is never bypassed in favour of a
//!   plaintext one, even when the tool is missing.
//! - Token bytes never reach a log event or an error message.
//!
//! # Example
//!
//! ```no_run
//! use fediscord_core::{ConfigPaths, SecretToken};
//! use fediscord_crypto::GpgCipher;
//! use fediscord_storage::{CredentialStore, Protection};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = CredentialStore::new(ConfigPaths::resolve()?, Box::new(GpgCipher::new()));
//! store.set_preference(Protection::Encrypted)?;
//! store.store_token(&SecretToken::new("mfa.token")?, Protection::Encrypted)?;
//! let token = store.retrieve_token()?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod consistency;
mod error;
mod mode;
mod store;

pub use consistency::Inconsistency;
pub use error::{Artifact, StoreError, StoreResult};
pub use mode::{Protection, SwitchOutcome, TokenState};
pub use store::CredentialStore;
