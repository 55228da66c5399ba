//! Product entry form

use axum::response::Html;

const FORM_HTML: &str = include_str!("../../assets/form.html");

/// GET /
pub async fn form() -> Html<&'static str> {
    Html(FORM_HTML)
}
