pub mod picks;
pub mod routes;
pub mod state;
pub mod store;
pub mod validate;
pub mod views;

use axum::Router;
use axum::extract::DefaultBodyLimit;

use state::AppState;

/// Upload forms carry at most one photo, capped at 5 MB in the UI. The extra
/// megabyte covers the text fields and multipart framing.
const MAX_FORM_BYTES: usize = 6 * 1024 * 1024;

/// Assemble the application router. Middleware layers (request tracing,
/// static files, CORS) are the server binary's concern.
pub fn app(state: AppState) -> Router {
    routes::router()
        .layer(DefaultBodyLimit::max(MAX_FORM_BYTES))
        .with_state(state)
}
