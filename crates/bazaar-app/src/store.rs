//! Typed operations over the gateway's raw records.

use serde_json::Value;

use bazaar_gateway::{Filter, Gateway, GatewayError, IMAGE_BUCKET, LISTINGS, MESSAGES};
use bazaar_types::{Listing, NewListing, NewMessage, TODAYS_PICKS};

/// Directory filter policy. A real category label becomes an equality filter;
/// the picks pseudo-category fetches everything (sampling happens after the
/// fetch); non-empty search text adds a case-insensitive title filter on top
/// of whichever of those applies.
pub fn listing_filter(category: Option<&str>, search: &str) -> Filter {
    let mut filter = Filter::new();
    if let Some(category) = category {
        if category != TODAYS_PICKS {
            filter = filter.eq("category", category);
        }
    }
    if !search.is_empty() {
        filter = filter.contains("title", search);
    }
    filter
}

pub async fn search_listings(
    gateway: &dyn Gateway,
    category: Option<&str>,
    search: &str,
) -> Result<Vec<Listing>, GatewayError> {
    let rows = gateway
        .fetch_all(LISTINGS, &listing_filter(category, search))
        .await?;
    rows.into_iter().map(decode_listing).collect()
}

pub async fn get_listing(gateway: &dyn Gateway, id: &str) -> Result<Listing, GatewayError> {
    decode_listing(gateway.fetch_one(LISTINGS, id).await?)
}

pub async fn create_listing(
    gateway: &dyn Gateway,
    listing: &NewListing,
) -> Result<Listing, GatewayError> {
    let record = serde_json::to_value(listing)
        .map_err(|e| GatewayError::Backend(format!("unencodable listing: {e}")))?;
    decode_listing(gateway.insert(LISTINGS, record).await?)
}

pub async fn send_message(
    gateway: &dyn Gateway,
    message: &NewMessage,
) -> Result<(), GatewayError> {
    let record = serde_json::to_value(message)
        .map_err(|e| GatewayError::Backend(format!("unencodable message: {e}")))?;
    gateway.insert(MESSAGES, record).await?;
    Ok(())
}

pub async fn upload_image(
    gateway: &dyn Gateway,
    name: &str,
    content_type: &str,
    bytes: Vec<u8>,
) -> Result<String, GatewayError> {
    gateway.upload_object(IMAGE_BUCKET, name, content_type, bytes).await
}

fn decode_listing(row: Value) -> Result<Listing, GatewayError> {
    serde_json::from_value(row)
        .map_err(|e| GatewayError::Backend(format!("malformed listing record: {e}")))
}
