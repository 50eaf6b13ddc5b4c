/**
 * Cookie Sessions
 *
 * This module issues and validates the session token carried in the
 * `session` cookie, and provides the request extractors that turn an
 * incoming cookie into a request-scoped current user.
 *
 * # Shape
 *
 * The token is a signed JWT whose claims hold only the minimal identity
 * `{id, username, name}` plus the standard `exp`/`iat` pair - never the full
 * user record. Verification trusts the signature alone and does not consult
 * the store, so handlers that need fresh data (e.g. the current secret)
 * re-fetch the record by id.
 *
 * # Extractors
 *
 * - `AuthSession` - requires a valid session; rejects with a redirect to
 *   `/login`. This is the gate in front of the submission routes.
 * - `MaybeAuthSession` - never rejects; anonymous requests yield `None`.
 */

use std::convert::Infallible;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::response::Redirect;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::server::state::AppState;
use crate::users::User;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session";

/// Session lifetime: 30 days.
const SESSION_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// JWT claims structure - the serialized session payload.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// User ID
    sub: String,
    /// Username (absent for OAuth-only accounts)
    #[serde(default)]
    username: Option<String>,
    /// Display name (provider-supplied; absent for local accounts)
    #[serde(default)]
    name: Option<String>,
    /// Expiration time (Unix timestamp)
    exp: u64,
    /// Issued at time (Unix timestamp)
    iat: u64,
}

/// The request-scoped identity resolved from a session cookie.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub id: Uuid,
    pub username: Option<String>,
    pub name: Option<String>,
}

/// Issues and verifies session tokens with the configured signing secret.
#[derive(Clone)]
pub struct SessionSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SessionSigner {
    /// Build a signer from the configured `SECRET_KEY`.
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_ref()),
            decoding: DecodingKey::from_secret(secret.as_ref()),
        }
    }

    /// Issue a session token for a freshly authenticated user.
    ///
    /// `name` is the provider-supplied display name, if any; it lives only
    /// in the session payload and is never persisted.
    pub fn issue(
        &self,
        user: &User,
        name: Option<&str>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        let claims = Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            name: name.map(str::to_string),
            exp: now + SESSION_TTL_SECS,
            iat: now,
        };

        encode(&Header::default(), &claims, &self.encoding)
    }

    /// Verify a session token and recover the identity it carries.
    ///
    /// This is the identity function over the stored payload: no store
    /// lookup happens here.
    pub fn verify(&self, token: &str) -> Result<SessionUser, jsonwebtoken::errors::Error> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;

        let id = Uuid::parse_str(&data.claims.sub).map_err(|_| {
            jsonwebtoken::errors::Error::from(jsonwebtoken::errors::ErrorKind::InvalidSubject)
        })?;

        Ok(SessionUser {
            id,
            username: data.claims.username,
            name: data.claims.name,
        })
    }
}

/// Build the session cookie carrying an issued token.
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// A cookie matching the session cookie's scope, for removal.
pub fn session_removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .build()
}

/// An authenticated session, required.
///
/// Extraction fails with a redirect to `/login` when the cookie is absent
/// or its token does not verify.
#[derive(Debug, Clone)]
pub struct AuthSession(pub SessionUser);

impl<S> FromRequestParts<S> for AuthSession
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match resolve_session(parts, state) {
            Some(user) => Ok(AuthSession(user)),
            None => Err(Redirect::to("/login")),
        }
    }
}

/// An optional session: `None` for anonymous visitors.
#[derive(Debug, Clone)]
pub struct MaybeAuthSession(pub Option<SessionUser>);

impl<S> FromRequestParts<S> for MaybeAuthSession
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthSession(resolve_session(parts, state)))
    }
}

fn resolve_session<S>(parts: &Parts, state: &S) -> Option<SessionUser>
where
    AppState: FromRef<S>,
{
    let app_state = AppState::from_ref(state);
    let jar = CookieJar::from_headers(&parts.headers);
    let cookie = jar.get(SESSION_COOKIE)?;

    match app_state.sessions.verify(cookie.value()) {
        Ok(user) => Some(user),
        Err(err) => {
            tracing::debug!("rejecting session cookie: {}", err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_user(username: Option<&str>) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            username: username.map(str::to_string),
            password_hash: None,
            google_id: None,
            secret: None,
            active: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_issue_then_verify_round_trip() {
        let signer = SessionSigner::new("test-secret");
        let user = test_user(Some("alice"));

        let token = signer.issue(&user, None).unwrap();
        let session = signer.verify(&token).unwrap();

        assert_eq!(session.id, user.id);
        assert_eq!(session.username.as_deref(), Some("alice"));
        assert_eq!(session.name, None);
    }

    #[test]
    fn test_oauth_only_identity_has_no_username() {
        let signer = SessionSigner::new("test-secret");
        let user = test_user(None);

        let token = signer.issue(&user, None).unwrap();
        let session = signer.verify(&token).unwrap();

        assert_eq!(session.username, None);
    }

    #[test]
    fn test_provider_display_name_survives_the_round_trip() {
        let signer = SessionSigner::new("test-secret");
        let user = test_user(None);

        let token = signer.issue(&user, Some("Alice Example")).unwrap();
        let session = signer.verify(&token).unwrap();

        assert_eq!(session.name.as_deref(), Some("Alice Example"));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let signer = SessionSigner::new("test-secret");
        let other = SessionSigner::new("another-secret");

        let token = signer.issue(&test_user(Some("alice")), None).unwrap();
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let signer = SessionSigner::new("test-secret");
        assert!(signer.verify("invalid.token.here").is_err());
    }

    #[test]
    fn test_payload_is_minimal() {
        // The serialized session must carry only {id, username, name} plus
        // the timestamp pair; the full record is re-fetched when needed.
        let signer = SessionSigner::new("test-secret");
        let mut user = test_user(Some("alice"));
        user.secret = Some("a very private thing".to_string());

        let token = signer.issue(&user, None).unwrap();
        let data = decode::<serde_json::Value>(
            &token,
            &signer.decoding,
            &Validation::default(),
        )
        .unwrap();

        let mut keys: Vec<&str> = data
            .claims
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        assert_eq!(keys, ["exp", "iat", "name", "sub", "username"]);
    }

    #[test]
    fn test_session_cookie_shape() {
        let cookie = session_cookie("token-value".to_string());
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert!(cookie.http_only().unwrap_or(false));
        assert_eq!(cookie.path(), Some("/"));
    }
}
