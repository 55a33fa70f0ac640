//! Fediscord Discord - Authorization URL generator.
//!
//! Exchanges a Discord token and a Fediverse handle for the URL that
//! completes the Mastodon connection in a browser. The token travels only
//! in the `authorization` header, which is marked sensitive, and never
//! appears in errors or logs.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod client;
mod error;

pub use client::{DEFAULT_API_BASE, DEFAULT_TIMEOUT, DiscordClient};
pub use error::{DiscordError, DiscordResult};
