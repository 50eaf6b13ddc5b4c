//! Plain page handlers.

use axum::http::StatusCode;
use axum::response::Html;

use crate::views;

/// GET `/` - render the home view.
pub async fn home() -> Html<String> {
    Html(views::home_page())
}

/// Fallback for unknown routes.
pub async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "404 Not Found")
}
