//! Fediscord Config - Layered TOML configuration.
//!
//! Precedence, lowest to highest:
//!
//! 1. Embedded defaults (`defaults.toml`)
//! 2. `<config dir>/config.toml`
//! 3. `FEDISCORD_*` environment variables
//!
//! Command-line flags are applied on top by the binary. The configuration
//! file is only ever read, never written.
//!
//! ```toml
//! [encryption]
//! program = "gpg2"
//!
//! [fediverse]
//! timeout_secs = 20
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod env;
mod error;
mod loader;
mod merge;
mod types;
mod validate;

pub use env::collect_env_vars;
pub use error::{ConfigError, ConfigResult};
pub use loader::{LoadedConfig, load, load_with_env};
pub use types::{Config, DiscordSection, EncryptionSection, FediverseSection, LoggingSection};
pub use validate::{TIMEOUT_RANGE, validate};
