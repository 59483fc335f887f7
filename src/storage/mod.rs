//! File system storage
//!
//! Path containment validation, directory listing, and download target
//! resolution, all scoped beneath the configured root.

pub mod operations;
pub mod results;
pub mod validation;

pub use operations::{list_directory, prepare_file_retrieval};
pub use results::{Entry, ResolvedFile};
pub use validation::{Resolution, resolve_logical_path};
