//! Fediscord Test - Shared test utilities.
//!
//! This crate provides test doubles and fixtures that can be used across
//! the fediscord crates as a dev-dependency.
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! fediscord-test.workspace = true
//! ```
//!
//! Then use in your tests:
//!
//! ```rust,ignore
//! use fediscord_test::{MockCipher, TestHome};
//!
//! let home = TestHome::new();
//! let cipher = MockCipher::new();
//! let store = CredentialStore::new(home.paths(), Box::new(cipher.clone()));
//!
//! cipher.set_failing(true);
//! assert!(store.store_token(&token, Protection::Encrypted).is_err());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
