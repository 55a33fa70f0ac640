//! Fediscord Crypto - Encryption tool adapter.
//!
//! The tool never implements cryptography itself. It shells out to an
//! external symmetric-encryption program (GnuPG by default) and treats it
//! as an opaque, fallible collaborator:
//!
//! - [`Cipher`]: the capability interface the credential store depends on
//! - [`GpgCipher`]: the production implementation
//!
//! # Security
//!
//! Secrets are streamed over the child's stdin and never placed on its
//! argument list, which other local users can read. Any passphrase prompt
//! belongs to the tool; this crate never sees or stores a passphrase.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod cipher;
mod error;
mod gpg;

pub use cipher::Cipher;
pub use error::{CryptoError, CryptoResult};
pub use gpg::{DEFAULT_CIPHER_ALGO, DEFAULT_PROGRAM, GpgCipher};
