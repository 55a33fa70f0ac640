//! Prelude module - commonly used types for convenient import.
//!
//! Use `use fediscord_fediverse::prelude::*;` to import all essential types.

pub use crate::{FediverseError, FediverseResult, Handle, InstanceInfo, InstanceProber};
