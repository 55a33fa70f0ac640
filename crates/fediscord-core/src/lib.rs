//! Fediscord Core - Shared types for the Fediverse to Discord connection tool.
//!
//! This crate provides:
//! - [`ConfigPaths`]: resolution of the single configuration directory and
//!   the fixed artifact paths inside it
//! - [`SecretToken`]: a zeroizing, redacting wrapper for the Discord token
//!
//! # Example
//!
//! ```
//! use fediscord_core::{ConfigPaths, SecretToken};
//!
//! let paths = ConfigPaths::from_path("/tmp/fediscord-doc");
//! assert!(paths.plain_token_path().ends_with("discord_token.txt"));
//!
//! let token = SecretToken::new("  mfa.abcdef  ").unwrap();
//! assert_eq!(token.expose(), "mfa.abcdef");
//! assert_eq!(format!("{token:?}"), "SecretToken([REDACTED])");
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod dirs;
pub mod prelude;

mod error;
mod secret;

pub use dirs::ConfigPaths;
pub use error::{CoreError, CoreResult};
pub use secret::{REDACTED, SecretToken};
