//! API request handlers
//!
//! Thin wrappers that extract request data, run the core operations with
//! the root and principal passed explicitly, and map results onto HTTP
//! responses.

use axum::Json;
use axum::body::Body;
use axum::extract::{Extension, Path, State};
use axum::http::{HeaderMap, Response as HttpResponse, StatusCode, header};
use axum::response::{IntoResponse, Response};
use log::{error, info, warn};
use serde::Deserialize;
use serde_json::json;

use crate::auth::validate_credentials;
use crate::http::responses::ApiError;
use crate::middleware::{AuthenticatedUser, SESSION_COOKIE, session_cookie};
use crate::server::AppState;
use crate::storage::{self, Entry};
use crate::transfer;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Response {
    if let Err(e) = validate_credentials(
        &state.credentials,
        &state.config,
        &request.username,
        &request.password,
    ) {
        warn!("Login failed: {}", e);
        return ApiError::Unauthorized.into_response();
    }

    let token = {
        let mut sessions = state.sessions.lock().await;
        sessions.create(&request.username, state.config.session_ttl())
    };

    info!("User {} logged in", request.username);

    let cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Strict; Max-Age={}",
        SESSION_COOKIE,
        token,
        state.config.session_ttl_secs
    );

    (
        [(header::SET_COOKIE, cookie)],
        Json(json!({ "username": request.username })),
    )
        .into_response()
}

/// GET /api/logout
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = session_cookie(&headers) {
        let removed = {
            let mut sessions = state.sessions.lock().await;
            sessions.remove(&token)
        };
        if let Some(session) = removed {
            info!("User {} logged out", session.username);
        }
    }

    // Expire the cookie regardless of whether a session existed.
    let cookie = format!("{}=; Path=/; HttpOnly; Max-Age=0", SESSION_COOKIE);
    ([(header::SET_COOKIE, cookie)], "Logged out").into_response()
}

/// GET /api/current_user
pub async fn current_user(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let username = match session_cookie(&headers) {
        Some(token) => {
            let mut sessions = state.sessions.lock().await;
            sessions.authenticate(&token)
        }
        None => None,
    };

    match username {
        Some(username) => Json(json!({ "username": username })).into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Not authenticated" })),
        )
            .into_response(),
    }
}

/// GET /api/files
pub async fn list_root(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<Entry>>, ApiError> {
    list_at(&state, &user, "").await
}

/// GET /api/files/{subDir}
pub async fn list_sub_dir(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(sub_dir): Path<String>,
) -> Result<Json<Vec<Entry>>, ApiError> {
    list_at(&state, &user, &sub_dir).await
}

async fn list_at(
    state: &AppState,
    user: &AuthenticatedUser,
    sub_dir: &str,
) -> Result<Json<Vec<Entry>>, ApiError> {
    if sub_dir.len() > state.config.max_path_length {
        warn!(
            "User {} sent an oversized listing path ({} bytes)",
            user.username,
            sub_dir.len()
        );
        return Err(ApiError::BadRequest);
    }

    // The timeout bounds the whole resolve + enumerate + stat fan-out.
    let listing = tokio::time::timeout(
        state.config.request_timeout(),
        storage::list_directory(&state.root, &user.username, sub_dir),
    )
    .await
    .map_err(|_| {
        error!("Listing of {:?} timed out", sub_dir);
        ApiError::Internal
    })??;

    Ok(Json(listing))
}

/// GET /api/download/{filePath}
pub async fn download_file(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(file_path): Path<String>,
) -> Result<Response, ApiError> {
    if file_path.len() > state.config.max_path_length {
        warn!(
            "User {} sent an oversized download path ({} bytes)",
            user.username,
            file_path.len()
        );
        return Err(ApiError::BadRequest);
    }

    let resolved =
        storage::prepare_file_retrieval(&state.root, &user.username, &file_path).await?;

    let download = transfer::open_download(&resolved, state.config.buffer_size)
        .await
        .map_err(|e| {
            error!("Failed to open {} for download: {}", resolved.path.display(), e);
            ApiError::Internal
        })?;

    let file_name = resolved.file_name().replace('"', "");

    HttpResponse::builder()
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(header::CONTENT_LENGTH, download.length)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file_name),
        )
        .body(Body::from_stream(download.stream))
        .map_err(|e| {
            error!("Failed to build download response: {}", e);
            ApiError::Internal
        })
}
