//! Storage result types
//!
//! Defines result structures returned by storage operations.

use serde::Serialize;
use std::path::PathBuf;

/// One item in a directory listing.
///
/// Serialized as `{"name": ..., "isDir": ...}` on the wire.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    #[serde(rename = "isDir")]
    pub is_dir: bool,
}

impl Entry {
    pub fn new(name: impl Into<String>, is_dir: bool) -> Self {
        Self {
            name: name.into(),
            is_dir,
        }
    }

    /// The synthetic `..` navigation entry. Not backed by a stat call.
    pub fn parent() -> Self {
        Self::new("..", true)
    }
}

/// A validated download target: the real path and its total size.
#[derive(Debug, Clone)]
pub struct ResolvedFile {
    pub path: PathBuf,
    pub length: u64,
}

impl ResolvedFile {
    /// File name for the Content-Disposition header.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "download".to_string())
    }
}
