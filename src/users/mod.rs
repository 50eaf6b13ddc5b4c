/**
 * User Model and Store Operations
 *
 * This module defines the `User` record and every query the application
 * runs against the user store. All operations are async and return explicit
 * `Result<_, StoreError>` values; nothing here knows about HTTP.
 *
 * # Lifecycle
 *
 * A user is created either by local registration (username + password hash)
 * or by a first Google login (google_id only, via an atomic find-or-create).
 * The only mutation afterwards is overwriting the `secret` column. No
 * operation deletes a user.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by the user store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint (username or google_id) was violated.
    #[error("a user with this identity already exists")]
    DuplicateUser,

    /// The store could not be reached or the query failed.
    #[error("user store unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),
}

/// A user record.
///
/// `username`/`password_hash` are set for locally registered accounts,
/// `google_id` for accounts created through OAuth; at least one identity is
/// always present (enforced by the schema). `active` is stored but never
/// read by any handler.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID), assigned at creation
    pub id: Uuid,
    /// Username (unique; absent for OAuth-only accounts)
    pub username: Option<String>,
    /// Hashed password (bcrypt; absent for OAuth-only accounts)
    pub password_hash: Option<String>,
    /// Google account id (unique; absent for local accounts)
    pub google_id: Option<String>,
    /// The user's submitted secret, if any
    pub secret: Option<String>,
    /// Dead field carried from the historical schema; never interpreted
    pub active: Option<bool>,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

const USER_COLUMNS: &str =
    "id, username, password_hash, google_id, secret, active, created_at, updated_at";

/// Create a locally registered user.
///
/// The caller supplies an already-hashed password; raw passwords never reach
/// this module. A username collision maps to `StoreError::DuplicateUser`.
pub async fn create_local(
    pool: &PgPool,
    username: &str,
    password_hash: &str,
) -> Result<User, StoreError> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users (id, username, password_hash, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(username)
    .bind(password_hash)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            StoreError::DuplicateUser
        } else {
            StoreError::Unavailable(e)
        }
    })?;

    Ok(user)
}

/// Get a user by username.
pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, StoreError> {
    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        SELECT {USER_COLUMNS}
        FROM users
        WHERE username = $1
        "#
    ))
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Get a user by ID.
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, StoreError> {
    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        SELECT {USER_COLUMNS}
        FROM users
        WHERE id = $1
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Find the user linked to a Google account id, creating one if absent.
///
/// A single upsert makes the find-or-create atomic with respect to
/// concurrent identical callbacks: both resolve to the same row.
pub async fn find_or_create_by_google_id(
    pool: &PgPool,
    google_id: &str,
) -> Result<User, StoreError> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users (id, google_id, created_at, updated_at)
        VALUES ($1, $2, $3, $3)
        ON CONFLICT (google_id) DO UPDATE SET updated_at = $3
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(google_id)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Overwrite a user's secret (last write wins, no history kept).
///
/// Returns `None` when the id resolves to no record, e.g. a session whose
/// user was deleted out-of-band; the caller treats that as a silent no-op.
pub async fn set_secret(
    pool: &PgPool,
    id: Uuid,
    secret: &str,
) -> Result<Option<User>, StoreError> {
    let now = Utc::now();

    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        UPDATE users
        SET secret = $1, updated_at = $2
        WHERE id = $3
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(secret)
    .bind(now)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// All users whose secret has been submitted (non-NULL), oldest first.
pub async fn find_secret_holders(pool: &PgPool) -> Result<Vec<User>, StoreError> {
    let users = sqlx::query_as::<_, User>(&format!(
        r#"
        SELECT {USER_COLUMNS}
        FROM users
        WHERE secret IS NOT NULL
        ORDER BY created_at
        "#
    ))
    .fetch_all(pool)
    .await?;

    Ok(users)
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
