/**
 * Router Configuration
 *
 * This module binds every route the application serves:
 *
 * - `GET /` - home view
 * - `GET|POST /register` - registration form and handler
 * - `GET|POST /login` - login form and handler
 * - `GET /auth/google` - OAuth initiation (profile scope)
 * - `GET /auth/google/secrets` - OAuth callback
 * - `GET /secrets` - secrets listing (anonymous visitors included)
 * - `GET|POST /submit` - secret submission (authenticated only)
 * - `GET /logout` - session termination
 *
 * Static assets are served from the public directory under `/static`, and
 * unknown routes fall back to a plain 404.
 */

use axum::routing::get;
use axum::Router;
use tower_http::services::ServeDir;

use crate::auth::handlers::{login, logout, oauth, register};
use crate::routes::pages;
use crate::secrets::handlers as secrets;
use crate::server::state::AppState;

/// Create the Axum router with all routes configured.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route(
            "/register",
            get(register::register_form).post(register::register),
        )
        .route("/login", get(login::login_form).post(login::login))
        .route("/auth/google", get(oauth::google_start))
        .route("/auth/google/secrets", get(oauth::google_callback))
        .route("/secrets", get(secrets::list_secrets))
        .route(
            "/submit",
            get(secrets::submit_form).post(secrets::submit_secret),
        )
        .route("/logout", get(logout::logout))
        .nest_service("/static", ServeDir::new("public"))
        .fallback(pages::not_found)
        .with_state(state)
}
