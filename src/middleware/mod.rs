//! Request middleware
//!
//! Session authentication gate and request logging.

pub mod auth;
pub mod logging;

pub use auth::{AuthenticatedUser, SESSION_COOKIE, ensure_authenticated, session_cookie};
pub use logging::log_request;
