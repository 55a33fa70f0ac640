//! Fediscord Telemetry - Logging for the fediscord tool.
//!
//! This crate provides configurable `tracing` subscriber setup with
//! several output formats and targets. The CLI defaults to quiet
//! (`warn`, compact, stderr) so interactive prompts stay readable.
//!
//! # Example
//!
//! ```rust,no_run
//! use fediscord_telemetry::{LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), fediscord_telemetry::TelemetryError> {
//! let config = LogConfig::new("debug")
//!     .with_format(LogFormat::Pretty)
//!     .with_directive("reqwest=warn");
//!
//! setup_logging(&config)?;
//! tracing::info!("logging ready");
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

mod error;
mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{LOG_FILE_PREFIX, LogConfig, LogFormat, LogTarget, setup_logging};
