//! File download streaming
//!
//! Turns validated download targets into chunked byte streams.

pub mod file_ops;

pub use file_ops::{FileDownload, open_download};
