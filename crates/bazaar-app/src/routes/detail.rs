//! The single-listing page and its inquiry form.

use askama::Template;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Form;
use serde::Deserialize;
use tracing::{error, info};

use bazaar_gateway::GatewayError;
use bazaar_types::{DEFAULT_GREETING, Listing};

use crate::routes::page;
use crate::state::AppState;
use crate::store;
use crate::validate;
use crate::views;

/// Fixed message for an unknown listing id, distinct from transport errors.
pub const ITEM_NOT_FOUND: &str = "Item not found.";

/// Confirmation after a successful inquiry.
pub const MESSAGE_SENT: &str =
    "Message sent successfully! The seller will receive an email notification";

#[derive(Template)]
#[template(path = "detail.html")]
struct DetailTemplate {
    item: Option<ItemView>,
    fetch_error: String,
    sender_email: String,
    message_body: String,
    status: Option<StatusLine>,
}

struct ItemView {
    id: String,
    title: String,
    price: String,
    listed: String,
    location: String,
    category: String,
    description: String,
    email: String,
    image: String,
}

/// Outcome line under the inquiry form. One submission produces exactly one
/// of confirmation or failure; a new attempt starts from a clean slate.
struct StatusLine {
    ok: bool,
    text: String,
}

#[derive(Debug, Deserialize)]
pub struct InquiryForm {
    #[serde(default)]
    pub sender_email: String,
    #[serde(default)]
    pub message: String,
}

/// Inquiry form in its initial state: empty sender, pre-filled greeting.
fn blank_form() -> (String, String) {
    (String::new(), DEFAULT_GREETING.to_string())
}

pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let (sender_email, message_body) = blank_form();
    render(&state, &id, sender_email, message_body, None).await
}

pub async fn send_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<InquiryForm>,
) -> Response {
    let (sender_email, message_body, status) =
        match validate::validate_message(&id, &form.sender_email, &form.message) {
            // Fails locally: the backend never sees an incomplete inquiry.
            Err(text) => (
                form.sender_email,
                form.message,
                StatusLine { ok: false, text: text.to_string() },
            ),
            Ok(message) => match store::send_message(state.gateway.as_ref(), &message).await {
                Ok(()) => {
                    info!(listing_id = %id, "inquiry sent");
                    let (sender_email, message_body) = blank_form();
                    (
                        sender_email,
                        message_body,
                        StatusLine { ok: true, text: MESSAGE_SENT.to_string() },
                    )
                }
                Err(err) => {
                    error!(listing_id = %id, "inquiry failed: {err}");
                    (
                        form.sender_email,
                        form.message,
                        StatusLine { ok: false, text: err.to_string() },
                    )
                }
            },
        };
    render(&state, &id, sender_email, message_body, Some(status)).await
}

async fn render(
    state: &AppState,
    id: &str,
    sender_email: String,
    message_body: String,
    status: Option<StatusLine>,
) -> Response {
    match store::get_listing(state.gateway.as_ref(), id).await {
        Ok(listing) => page(DetailTemplate {
            item: Some(item_view(state, listing)),
            fetch_error: String::new(),
            sender_email,
            message_body,
            status,
        })
        .into_response(),
        Err(GatewayError::NotFound) => {
            error_page(StatusCode::NOT_FOUND, ITEM_NOT_FOUND.to_string())
        }
        Err(err) => {
            error!(listing_id = %id, "listing fetch failed: {err}");
            error_page(StatusCode::BAD_GATEWAY, err.to_string())
        }
    }
}

fn error_page(code: StatusCode, fetch_error: String) -> Response {
    let (sender_email, message_body) = blank_form();
    (
        code,
        page(DetailTemplate {
            item: None,
            fetch_error,
            sender_email,
            message_body,
            status: None,
        }),
    )
        .into_response()
}

fn item_view(state: &AppState, listing: Listing) -> ItemView {
    ItemView {
        image: views::display_image(&listing.image_url, state.image_origin.as_deref()).to_string(),
        price: views::format_price(listing.price),
        listed: views::time_ago(listing.created_at, chrono::Utc::now()),
        id: listing.id,
        title: listing.title,
        location: listing.location,
        category: listing.category,
        description: listing.description,
        email: listing.email,
    }
}
