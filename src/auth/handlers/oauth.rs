/**
 * Google OAuth Handlers
 *
 * GET `/auth/google` starts the flow: it redirects the browser to Google's
 * consent screen and pins the CSRF state in a cookie. GET
 * `/auth/google/secrets` is the registered callback: it validates the state,
 * exchanges the code through the `Credentials::Google` strategy (which runs
 * the find-or-create), and establishes a session.
 *
 * Any provider-side failure - declined consent, missing or mismatched
 * state, a broken exchange - redirects to the login view with no account
 * created or mutated.
 */

use axum::extract::{Query, State};
use axum::response::Redirect;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;

use crate::auth::session::session_cookie;
use crate::auth::{authenticate, Credentials};
use crate::error::AppError;
use crate::server::state::AppState;

/// Cookie pinning the CSRF state between initiation and callback.
const OAUTH_STATE_COOKIE: &str = "oauth_state";

/// Query parameters Google sends to the callback.
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// GET `/auth/google` - redirect to the consent screen.
pub async fn google_start(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Redirect) {
    let (url, csrf) = state.google.authorize_url();

    let state_cookie = Cookie::build((OAUTH_STATE_COOKIE, csrf.secret().clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    (jar.add(state_cookie), Redirect::to(url.as_str()))
}

/// GET `/auth/google/secrets` - complete the flow.
pub async fn google_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> Result<(CookieJar, Redirect), AppError> {
    if let Some(error) = params.error {
        return Err(AppError::OAuthDenied(error));
    }

    let expected_state = jar
        .get(OAUTH_STATE_COOKIE)
        .map(|cookie| cookie.value().to_string());
    let jar = jar.remove(Cookie::build((OAUTH_STATE_COOKIE, "")).path("/").build());

    let code = match (params.code, params.state, expected_state) {
        (Some(code), Some(got), Some(expected)) if got == expected => code,
        _ => {
            return Err(AppError::OAuthDenied(
                "missing or mismatched authorization state".to_string(),
            ))
        }
    };

    let auth = authenticate(&state, Credentials::Google { code }).await?;

    let token = state
        .sessions
        .issue(&auth.user, auth.name.as_deref())
        .map_err(|err| {
            tracing::error!("failed to issue session: {:?}", err);
            AppError::AuthenticationFailed
        })?;

    tracing::info!(user_id = %auth.user.id, "user authenticated via Google");
    Ok((jar.add(session_cookie(token)), Redirect::to("/secrets")))
}
