pub mod create;
pub mod detail;
pub mod directory;

use askama::Template;
use axum::Router;
use axum::response::Html;
use axum::routing::{get, post};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(directory::browse))
        .route("/create", get(create::form).post(create::submit))
        .route("/item/{id}", get(detail::show))
        .route("/item/{id}/message", post(detail::send_message))
}

/// Render a template into an HTML response body.
pub(crate) fn page<T: Template>(template: T) -> Html<String> {
    Html(template.render().unwrap_or_default())
}
