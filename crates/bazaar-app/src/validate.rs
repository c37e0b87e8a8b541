//! Local form validation. Everything here runs before any backend call; a
//! rejected form never leaves the process.

use bazaar_types::{DEFAULT_DESCRIPTION, NewListing, NewMessage, PLACEHOLDER_IMAGE, category};

/// Shown when the creation form is missing a required field (or its price
/// does not parse as a decimal number).
pub const MISSING_FIELDS: &str = "Please fill in all required fields.";

/// Shown when the inquiry form is missing the sender email or message text.
pub const MISSING_MESSAGE_FIELDS: &str = "Please fill in your email and message.";

/// Raw field values exactly as the creation form posted them.
#[derive(Debug, Clone, Default)]
pub struct ListingForm {
    pub title: String,
    pub category: String,
    pub price: String,
    pub location: String,
    pub contact_email: String,
    pub description: String,
}

/// The decimal-number pattern the price field enforces per keystroke:
/// digits with at most one decimal point (`^\d*\.?\d*$`).
pub fn price_pattern_ok(value: &str) -> bool {
    let mut seen_dot = false;
    for c in value.chars() {
        match c {
            '.' if seen_dot => return false,
            '.' => seen_dot = true,
            c if c.is_ascii_digit() => {}
            _ => return false,
        }
    }
    true
}

/// Submitted price as a number. Passing the keystroke pattern is necessary
/// but not sufficient: a lone `.` carries no digits.
pub fn parse_price(value: &str) -> Option<f64> {
    if value.is_empty() || !price_pattern_ok(value) {
        return None;
    }
    value.parse::<f64>().ok()
}

/// Check the creation form and shape it into an insertable record. The image
/// reference starts as the placeholder; the submit flow replaces it after a
/// successful upload. Description defaults when left empty.
pub fn validate_listing(form: &ListingForm) -> Result<NewListing, &'static str> {
    if form.title.is_empty()
        || form.category.is_empty()
        || form.price.is_empty()
        || form.contact_email.is_empty()
        || form.location.is_empty()
    {
        return Err(MISSING_FIELDS);
    }
    if !category::is_listed(&form.category) {
        return Err(MISSING_FIELDS);
    }
    let Some(price) = parse_price(&form.price) else {
        return Err(MISSING_FIELDS);
    };
    Ok(NewListing {
        title: form.title.clone(),
        description: if form.description.is_empty() {
            DEFAULT_DESCRIPTION.to_string()
        } else {
            form.description.clone()
        },
        price,
        email: form.contact_email.clone(),
        category: form.category.clone(),
        image_url: PLACEHOLDER_IMAGE.to_string(),
        location: form.location.clone(),
    })
}

/// Check the inquiry form. Both fields must be non-empty.
pub fn validate_message(
    listing_id: &str,
    sender_email: &str,
    message: &str,
) -> Result<NewMessage, &'static str> {
    if sender_email.is_empty() || message.is_empty() {
        return Err(MISSING_MESSAGE_FIELDS);
    }
    Ok(NewMessage {
        listing_id: listing_id.to_string(),
        sender_email: sender_email.to_string(),
        message: message.to_string(),
    })
}
