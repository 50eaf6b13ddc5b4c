/**
 * Error Conversions and HTTP Mapping
 *
 * `From` impls lift store- and auth-layer errors into `AppError`, and the
 * `IntoResponse` impl turns any `AppError` into its user-visible behavior:
 * a log line and a redirect. Nothing past the handler boundary ever sees
 * these errors.
 */

use axum::response::{IntoResponse, Redirect, Response};

use crate::auth::AuthError;
use crate::error::types::AppError;
use crate::users::StoreError;

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateUser => Self::DuplicateUser,
            StoreError::Unavailable(e) => Self::StoreUnavailable(e),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Self::AuthenticationFailed,
            AuthError::OAuthDenied(message) => Self::OAuthDenied(message),
            AuthError::Store(store) => Self::from(store),
            AuthError::Session(_) => Self::AuthenticationFailed,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::DuplicateUser | AppError::AuthenticationFailed | AppError::NotFound => {
                tracing::warn!("{}", self);
            }
            AppError::OAuthDenied(_) | AppError::StoreUnavailable(_) => {
                tracing::error!("{}", self);
            }
        }

        Redirect::to(self.redirect_target()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header::LOCATION, StatusCode};

    #[test]
    fn test_duplicate_store_error_becomes_duplicate_user() {
        let err = AppError::from(StoreError::DuplicateUser);
        assert!(matches!(err, AppError::DuplicateUser));
    }

    #[test]
    fn test_store_failure_is_preserved_as_unavailable() {
        let err = AppError::from(StoreError::Unavailable(sqlx::Error::PoolClosed));
        assert!(matches!(err, AppError::StoreUnavailable(_)));
    }

    #[test]
    fn test_invalid_credentials_become_authentication_failed() {
        let err = AppError::from(AuthError::InvalidCredentials);
        assert!(matches!(err, AppError::AuthenticationFailed));
    }

    #[test]
    fn test_response_redirects_without_error_detail() {
        let response = AppError::DuplicateUser.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(LOCATION).unwrap(), "/register");
    }
}
