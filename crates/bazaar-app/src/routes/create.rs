//! The listing creation form: validate, optionally upload the photo, insert.

use askama::Template;
use axum::extract::{Multipart, State};
use axum::response::IntoResponse;
use chrono::Utc;
use tracing::{error, info, warn};

use bazaar_types::{CATEGORIES, PLACEHOLDER_IMAGE};

use crate::routes::page;
use crate::state::AppState;
use crate::store;
use crate::validate::{self, ListingForm};
use crate::views;

/// Confirmation after a successful submission.
pub const LISTING_CREATED: &str = "Listing created successfully!";

#[derive(Template)]
#[template(path = "create.html")]
struct CreateTemplate {
    form: ListingForm,
    categories: Vec<CategoryOption>,
    success: Option<String>,
    error: Option<String>,
    placeholder: &'static str,
}

struct CategoryOption {
    label: &'static str,
    selected: bool,
}

/// One uploaded photo, as read out of the multipart body.
struct Photo {
    filename: String,
    content_type: String,
    bytes: Vec<u8>,
}

pub async fn form() -> impl IntoResponse {
    page(render(ListingForm::default(), None, None))
}

/// Submission sequence, each step gated on the one before: validate locally,
/// upload the photo if one was chosen, insert the record, reset the form.
/// An upload that succeeds before a failed insert is not rolled back; the
/// orphaned object is an accepted gap of the backend contract.
pub async fn submit(State(state): State<AppState>, multipart: Multipart) -> impl IntoResponse {
    let (form, photo) = match read_form(multipart).await {
        Ok(parts) => parts,
        Err(err) => {
            warn!("unreadable creation form: {err}");
            return page(render(ListingForm::default(), None, Some(err)));
        }
    };

    let mut listing = match validate::validate_listing(&form) {
        Ok(listing) => listing,
        // No backend call is made for an incomplete form.
        Err(text) => return page(render(form, None, Some(text.to_string()))),
    };

    if let Some(photo) = photo {
        let name = format!(
            "{}.{}",
            Utc::now().timestamp_millis(),
            views::file_extension(&photo.filename)
        );
        match store::upload_image(state.gateway.as_ref(), &name, &photo.content_type, photo.bytes)
            .await
        {
            Ok(url) => listing.image_url = url,
            Err(err) => {
                error!("image upload failed: {err}");
                return page(render(form, None, Some(err.to_string())));
            }
        }
    }

    match store::create_listing(state.gateway.as_ref(), &listing).await {
        Ok(stored) => {
            info!(id = %stored.id, category = %stored.category, "listing created");
            page(render(ListingForm::default(), Some(LISTING_CREATED.to_string()), None))
        }
        Err(err) => {
            error!("listing insert failed: {err}");
            page(render(form, None, Some(err.to_string())))
        }
    }
}

fn render(form: ListingForm, success: Option<String>, error: Option<String>) -> CreateTemplate {
    let categories = CATEGORIES
        .iter()
        .map(|&label| CategoryOption { label, selected: label == form.category })
        .collect();
    CreateTemplate { form, categories, success, error, placeholder: PLACEHOLDER_IMAGE }
}

/// Pull the field values and the optional photo out of the multipart body.
/// Unknown fields are ignored; a photo field without a chosen file reads as
/// no photo.
async fn read_form(mut multipart: Multipart) -> Result<(ListingForm, Option<Photo>), String> {
    let mut form = ListingForm::default();
    let mut photo = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| e.to_string())? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => form.title = field.text().await.map_err(|e| e.to_string())?,
            "category" => form.category = field.text().await.map_err(|e| e.to_string())?,
            "price" => form.price = field.text().await.map_err(|e| e.to_string())?,
            "location" => form.location = field.text().await.map_err(|e| e.to_string())?,
            "contact_email" => {
                form.contact_email = field.text().await.map_err(|e| e.to_string())?
            }
            "description" => form.description = field.text().await.map_err(|e| e.to_string())?,
            "image" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(|e| e.to_string())?;
                if !filename.is_empty() && !bytes.is_empty() {
                    photo = Some(Photo { filename, content_type, bytes: bytes.to_vec() });
                }
            }
            _ => {}
        }
    }

    Ok((form, photo))
}
