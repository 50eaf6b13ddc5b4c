/**
 * Server Initialization
 *
 * This module handles the setup of the Axum application: connecting the
 * user store, running migrations, building the shared state, and assembling
 * the router.
 *
 * # Error Handling
 *
 * Unlike request-level store failures (which are logged and answered with a
 * redirect), a store connection failure here is fatal: the server does not
 * start without its store.
 */

use axum::Router;
use sqlx::PgPool;
use thiserror::Error;

use crate::routes::router::create_router;
use crate::server::config::AppConfig;
use crate::server::state::AppState;

/// Errors that abort server startup.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("failed to connect to the user store: {0}")]
    Store(#[from] sqlx::Error),

    #[error("failed to run store migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Create and configure the Axum application.
///
/// # Initialization Steps
///
/// 1. Connect the user store pool (fatal on failure)
/// 2. Run embedded migrations
/// 3. Build `AppState` from the configuration and the pool
/// 4. Assemble the router with all routes bound
pub async fn create_app(config: AppConfig) -> Result<Router, InitError> {
    tracing::info!("Connecting to the user store...");
    let pool = PgPool::connect(&config.database_url).await?;
    tracing::info!("Successfully connected to the user store");

    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Store migrations up to date");

    let state = AppState::new(&config, pool);

    Ok(create_router(state))
}
