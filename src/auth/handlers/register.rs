/**
 * Registration Handlers
 *
 * GET `/register` renders the registration form; POST `/register` creates a
 * local account.
 *
 * # Registration Process
 *
 * 1. Hash the submitted password (the raw password is never persisted)
 * 2. Insert the user; a username collision is `DuplicateUser`
 * 3. Establish a session and redirect to the secrets view
 *
 * On any failure the caller lands back on the registration form with no
 * error detail beyond the retry.
 */

use axum::extract::State;
use axum::response::{Html, Redirect};
use axum::Form;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::auth::password;
use crate::auth::session::session_cookie;
use crate::error::AppError;
use crate::server::state::AppState;
use crate::users;
use crate::views;

/// Registration form fields.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
}

/// GET `/register` - render the registration form.
pub async fn register_form() -> Html<String> {
    Html(views::register_page())
}

/// POST `/register` - create a local account and log it in.
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Result<(CookieJar, Redirect), AppError> {
    tracing::info!(username = %form.username, "registration request");

    let password_hash = match password::hash(&form.password) {
        Ok(hash) => hash,
        Err(err) => {
            tracing::error!("failed to hash password: {:?}", err);
            return Ok((jar, Redirect::to("/register")));
        }
    };

    let user = users::create_local(&state.pool, &form.username, &password_hash).await?;

    let token = match state.sessions.issue(&user, None) {
        Ok(token) => token,
        Err(err) => {
            // The account exists but the session could not be established;
            // send the user to log in normally.
            tracing::error!("failed to issue session: {:?}", err);
            return Ok((jar, Redirect::to("/login")));
        }
    };

    tracing::info!(username = %form.username, "user registered");
    Ok((jar.add(session_cookie(token)), Redirect::to("/secrets")))
}
