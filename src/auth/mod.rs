/**
 * Authentication
 *
 * This module owns every way a request can become an authenticated user:
 *
 * - `Credentials` is the closed set of authentication strategies. There are
 *   exactly two: local username/password and the Google authorization-code
 *   callback. Both funnel through the single `authenticate` entry point,
 *   which resolves them to an `AuthenticatedUser` or an `AuthError`.
 * - `password` hashes and verifies local credentials (bcrypt).
 * - `session` issues and verifies the signed session cookie and provides
 *   the request extractors for the current user.
 * - `google` performs the provider-side half of the OAuth exchange.
 * - `handlers` contains the HTTP handlers for register, login, logout, and
 *   the Google route pair.
 */

use crate::server::state::AppState;
use crate::users::{self, StoreError, User};
use thiserror::Error;

pub mod google;
pub mod handlers;
pub mod password;
pub mod session;

/// Authentication failures.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown username or wrong password. The two cases are deliberately
    /// indistinguishable to the caller.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The provider declined consent or the code exchange failed.
    #[error("provider rejected the authorization: {0}")]
    OAuthDenied(String),

    /// The user store failed underneath the strategy.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A session token could not be issued or verified.
    #[error("session token error: {0}")]
    Session(#[from] jsonwebtoken::errors::Error),
}

/// The closed set of authentication strategies.
#[derive(Debug)]
pub enum Credentials {
    /// Local username + password login
    Local { username: String, password: String },
    /// Google OAuth callback carrying the authorization code
    Google { code: String },
}

/// A resolved identity: the stored record plus the provider-supplied
/// display name. The name is session-only; it is never persisted.
#[derive(Debug)]
pub struct AuthenticatedUser {
    pub user: User,
    pub name: Option<String>,
}

/// Resolve credentials to a stored user.
///
/// Local credentials are checked against the stored bcrypt hash; a missing
/// user, a missing hash (OAuth-only account), and a mismatched password all
/// collapse into `InvalidCredentials`. Google credentials run the code
/// exchange and then an atomic find-or-create keyed on the Google id, so a
/// first login creates the account and later logins reuse it.
pub async fn authenticate(
    state: &AppState,
    credentials: Credentials,
) -> Result<AuthenticatedUser, AuthError> {
    match credentials {
        Credentials::Local { username, password } => {
            let user = users::find_by_username(&state.pool, &username)
                .await?
                .ok_or(AuthError::InvalidCredentials)?;

            let hash = user
                .password_hash
                .as_deref()
                .ok_or(AuthError::InvalidCredentials)?;

            let valid = password::verify(&password, hash).map_err(|e| {
                tracing::error!("password verification error: {:?}", e);
                AuthError::InvalidCredentials
            })?;

            if !valid {
                return Err(AuthError::InvalidCredentials);
            }

            Ok(AuthenticatedUser { user, name: None })
        }
        Credentials::Google { code } => {
            let profile = state.google.exchange_code(&code).await?;
            let user = users::find_or_create_by_google_id(&state.pool, &profile.id).await?;
            Ok(AuthenticatedUser {
                user,
                name: profile.name,
            })
        }
    }
}
