//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One Axum router serves both surfaces: the JSON API under `/api` and the
//! server-rendered page shell for every other path. HTML forms post to
//! `/auth/*` and redirect back into the shell, so the site works without
//! client-side scripting.

pub mod auth;
pub mod market;
pub mod views;

use axum::Router;
use axum::middleware;
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// The full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/healthz", get(healthz))
        // JSON session lifecycle.
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/begin", post(auth::begin))
        .route("/api/auth/complete", post(auth::complete))
        .route("/api/auth/close", post(auth::close))
        .route("/api/auth/logout", post(auth::logout))
        // Form posts from the page shell.
        .route("/auth/begin", post(auth::begin_form))
        .route("/auth/complete", post(auth::complete_form))
        .route("/auth/close", post(auth::close_form))
        .route("/auth/logout", post(auth::logout_form))
        .route("/api/view", get(views::view))
        .route("/api/nav", get(views::nav))
        .route("/api/breadcrumbs", get(views::crumbs))
        .route("/api/marketplace/credits", get(market::credits))
        .route("/api/estimator", post(market::estimate))
        .route("/carbon-estimator", get(views::page).post(market::estimate_form))
        .route("/api/listings", get(market::list_listings))
        .route("/api/listings/{id}", delete(market::delete_listing))
        .route("/", get(views::page))
        .route("/{*path}", get(views::page))
        .layer(middleware::from_fn_with_state(state.clone(), auth::refresh_session))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
