//! Download progress tracking
//!
//! Client-side per-file progress state, fed by a download read loop.

pub mod tracker;

pub use tracker::{DownloadState, ProgressTracker};
