/**
 * Application Error Types
 *
 * This module defines the error taxonomy for the request-handling layer.
 * Each variant carries its user-visible behavior: a redirect target. The
 * user cannot distinguish one failure from another beyond which form they
 * land on; that uniformity is deliberate.
 */

use thiserror::Error;

/// Handler-boundary errors.
///
/// Variants map one-to-one onto the failure modes of the application:
/// duplicate registration, failed local login, a declined or broken OAuth
/// exchange, an unreachable store, and a session id that resolves to no
/// record.
#[derive(Debug, Error)]
pub enum AppError {
    /// Registration attempted with a username that already exists
    #[error("a user with this username already exists")]
    DuplicateUser,

    /// Unknown username, wrong password, or an unusable session
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The OAuth provider declined or the exchange failed
    #[error("OAuth authorization failed: {0}")]
    OAuthDenied(String),

    /// The user store could not be reached or a query failed
    #[error("user store unavailable: {0}")]
    StoreUnavailable(#[source] sqlx::Error),

    /// A session referenced a user record that no longer exists
    #[error("user record not found")]
    NotFound,
}

impl AppError {
    /// The redirect target shown to the user for this error.
    pub fn redirect_target(&self) -> &'static str {
        match self {
            Self::DuplicateUser => "/register",
            Self::AuthenticationFailed => "/login",
            Self::OAuthDenied(_) => "/login",
            Self::StoreUnavailable(_) => "/",
            Self::NotFound => "/",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_user_returns_to_registration() {
        assert_eq!(AppError::DuplicateUser.redirect_target(), "/register");
    }

    #[test]
    fn test_failed_login_returns_to_login() {
        assert_eq!(AppError::AuthenticationFailed.redirect_target(), "/login");
    }

    #[test]
    fn test_oauth_denial_returns_to_login() {
        let err = AppError::OAuthDenied("access_denied".to_string());
        assert_eq!(err.redirect_target(), "/login");
    }

    #[test]
    fn test_store_failure_returns_home() {
        let err = AppError::StoreUnavailable(sqlx::Error::PoolClosed);
        assert_eq!(err.redirect_target(), "/");
    }
}
