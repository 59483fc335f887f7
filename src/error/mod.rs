//! Error handling
//!
//! Domain-specific error types for the server modules.

pub mod types;

pub use types::{AuthError, StorageError};
