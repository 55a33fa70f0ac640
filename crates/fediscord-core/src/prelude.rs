//! Prelude module - commonly used types for convenient import.
//!
//! Use `use fediscord_core::prelude::*;` to import all essential types.

// Errors
pub use crate::{CoreError, CoreResult};

// Paths
pub use crate::ConfigPaths;

// Secrets
pub use crate::{REDACTED, SecretToken};
