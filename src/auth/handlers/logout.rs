//! Logout handler.
//!
//! Removing the cookie is the whole of session termination; there is
//! nothing server-side to tear down, so the redirect home is unconditional.

use axum::response::Redirect;
use axum_extra::extract::cookie::CookieJar;

use crate::auth::session::session_removal_cookie;

/// GET `/logout` - terminate the session and go home.
pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    tracing::debug!("session terminated");
    (jar.remove(session_removal_cookie()), Redirect::to("/"))
}
