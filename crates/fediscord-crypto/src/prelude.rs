//! Prelude module - commonly used types for convenient import.
//!
//! Use `use fediscord_crypto::prelude::*;` to import all essential types.

// Errors
pub use crate::{CryptoError, CryptoResult};

// Cipher interface and implementations
pub use crate::{Cipher, GpgCipher};
