//! Authentication middleware
//!
//! Gates the file API behind a valid session cookie. Requests that pass
//! carry an `AuthenticatedUser` extension; handlers hand that principal
//! to the storage operations explicitly instead of reading any ambient
//! state.

use axum::extract::{Request, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use log::warn;

use crate::server::AppState;

/// Name of the session cookie set at login.
pub const SESSION_COOKIE: &str = "filegate_session";

/// The principal attached to every request that passed the session check.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub username: String,
}

/// Extracts the session token from the Cookie header, if present.
pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

/// Rejects requests without a live session and attaches the principal
/// otherwise.
pub async fn ensure_authenticated(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match session_cookie(request.headers()) {
        Some(token) => token,
        None => return (StatusCode::UNAUTHORIZED, "Unauthorized").into_response(),
    };

    let username = {
        let mut sessions = state.sessions.lock().await;
        sessions.authenticate(&token)
    };

    match username {
        Some(username) => {
            request
                .extensions_mut()
                .insert(AuthenticatedUser { username });
            next.run(request).await
        }
        None => {
            warn!("Rejected request with an invalid or expired session token");
            (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
        }
    }
}
