//! HTTP surface
//!
//! Routes, request handlers, and error-to-status mapping for the API.
//! The file endpoints sit behind the session gate; the auth endpoints do
//! their own session checks.

pub mod handlers;
pub mod responses;

use axum::Router;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post};

use crate::middleware;
use crate::server::AppState;

pub use responses::ApiError;

/// Builds the API router over the shared server state.
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/files", get(handlers::list_root))
        .route("/api/files/*sub_dir", get(handlers::list_sub_dir))
        .route("/api/download/*file_path", get(handlers::download_file))
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware::ensure_authenticated,
        ));

    Router::new()
        .route("/api/login", post(handlers::login))
        .route("/api/logout", get(handlers::logout))
        .route("/api/current_user", get(handlers::current_user))
        .merge(protected)
        .layer(from_fn(middleware::log_request))
        .with_state(state)
}
