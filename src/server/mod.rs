//! Server lifecycle
//!
//! Listener setup, shared state, and the serve loop.

pub mod core;

pub use core::{AppState, Server};
