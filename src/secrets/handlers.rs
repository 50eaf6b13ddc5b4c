/**
 * Secrets Handlers
 *
 * GET `/secrets` lists every submitted secret. The list itself is visible
 * to anonymous visitors too - no access control gates the data, only which
 * action link the page shows ("Log Out" for a live session, "Log In"
 * otherwise).
 *
 * GET/POST `/submit` are gated by the `AuthSession` extractor: an
 * unauthenticated caller is redirected to `/login` before either handler
 * runs. Submission overwrites the user's secret (last write wins, no
 * history); if the session's id no longer resolves to a record the
 * submission silently no-ops.
 */

use axum::extract::State;
use axum::response::{Html, Redirect};
use axum::Form;
use serde::Deserialize;

use crate::auth::session::{AuthSession, MaybeAuthSession};
use crate::error::AppError;
use crate::server::state::AppState;
use crate::users;
use crate::views;

/// Submission form fields.
#[derive(Debug, Deserialize)]
pub struct SubmitForm {
    pub secret: String,
}

/// GET `/secrets` - list everyone's secrets.
pub async fn list_secrets(
    State(state): State<AppState>,
    MaybeAuthSession(session): MaybeAuthSession,
) -> Result<Html<String>, AppError> {
    let holders = users::find_secret_holders(&state.pool).await?;
    Ok(Html(views::secrets_page(&holders, session.is_some())))
}

/// GET `/submit` - render the submission form (authenticated only).
pub async fn submit_form(_session: AuthSession) -> Html<String> {
    Html(views::submit_page())
}

/// POST `/submit` - overwrite the current user's secret.
pub async fn submit_secret(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Form(form): Form<SubmitForm>,
) -> Result<Redirect, AppError> {
    match users::find_by_id(&state.pool, session.id).await? {
        Some(user) => {
            users::set_secret(&state.pool, user.id, &form.secret).await?;
            tracing::info!(user_id = %user.id, "secret submitted");
        }
        None => {
            // Stale session id (record deleted out-of-band): silent no-op.
            tracing::warn!(user_id = %session.id, "secret submitted for a missing user record");
        }
    }

    Ok(Redirect::to("/secrets"))
}
