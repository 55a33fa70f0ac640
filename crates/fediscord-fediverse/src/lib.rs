//! Fediscord Fediverse - Handle validation and instance probing.
//!
//! - [`Handle`]: a validated `username@domain`
//! - [`InstanceProber`]: checks that a domain serves the Mastodon API
//!
//! # Example
//!
//! ```
//! use fediscord_fediverse::Handle;
//!
//! let handle = Handle::parse("@alice@example.social").unwrap();
//! assert_eq!(handle.as_str(), "alice@example.social");
//! assert_eq!(handle.domain(), "example.social");
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod error;
mod handle;
mod probe;

pub use error::{FediverseError, FediverseResult};
pub use handle::Handle;
pub use probe::{DEFAULT_INCOMPATIBLE_PLATFORMS, DEFAULT_TIMEOUT, InstanceInfo, InstanceProber};
