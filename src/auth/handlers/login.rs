/**
 * Login Handlers
 *
 * GET `/login` renders the login form; POST `/login` authenticates local
 * credentials through the `Credentials::Local` strategy.
 *
 * Unknown usernames and wrong passwords are indistinguishable to the
 * caller: both redirect back to the login form. (The historical behavior of
 * bouncing failed logins to the registration form was a source bug; the
 * failure now returns to the login view.)
 */

use axum::extract::State;
use axum::response::{Html, Redirect};
use axum::Form;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::auth::session::session_cookie;
use crate::auth::{authenticate, Credentials};
use crate::error::AppError;
use crate::server::state::AppState;
use crate::views;

/// Login form fields.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// GET `/login` - render the login form.
pub async fn login_form() -> Html<String> {
    Html(views::login_page())
}

/// POST `/login` - authenticate and establish a session.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<(CookieJar, Redirect), AppError> {
    tracing::info!(username = %form.username, "login request");

    let auth = authenticate(
        &state,
        Credentials::Local {
            username: form.username,
            password: form.password,
        },
    )
    .await?;

    let token = state
        .sessions
        .issue(&auth.user, auth.name.as_deref())
        .map_err(|err| {
            tracing::error!("failed to issue session: {:?}", err);
            AppError::AuthenticationFailed
        })?;

    tracing::info!(user_id = %auth.user.id, "user logged in");
    Ok((jar.add(session_cookie(token)), Redirect::to("/secrets")))
}
