/**
 * Application State Management
 *
 * This module defines the application state structure and implements the
 * `FromRef` conversions for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` is the single container for everything handlers need:
 * - the user store connection pool
 * - the session signer (issues and verifies session cookies)
 * - the Google OAuth client
 *
 * It is built once at startup and cloned per request; all fields are cheap
 * to clone (pool and keys are internally reference-counted).
 */

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::auth::google::GoogleOAuth;
use crate::auth::session::SessionSigner;
use crate::server::config::AppConfig;

/// Shared application state, passed to the router at startup.
#[derive(Clone)]
pub struct AppState {
    /// User store connection pool
    pub pool: PgPool,
    /// Session cookie signer / verifier
    pub sessions: SessionSigner,
    /// Google OAuth client
    pub google: GoogleOAuth,
}

impl AppState {
    /// Assemble the state from loaded configuration and a connected pool.
    pub fn new(config: &AppConfig, pool: PgPool) -> Self {
        Self {
            pool,
            sessions: SessionSigner::new(&config.secret_key),
            google: config.google.clone(),
        }
    }
}

/// Allow handlers to extract the store pool directly.
impl FromRef<AppState> for PgPool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.pool.clone()
    }
}

/// Allow extractors to reach the session signer without the full state.
impl FromRef<AppState> for SessionSigner {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.sessions.clone()
    }
}
