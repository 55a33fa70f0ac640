//! Prelude module - commonly used types for convenient import.
//!
//! Use `use fediscord_storage::prelude::*;` to import all essential types.

// Errors
pub use crate::{Artifact, StoreError, StoreResult};

// Store and its state types
pub use crate::{CredentialStore, Inconsistency, Protection, SwitchOutcome, TokenState};
