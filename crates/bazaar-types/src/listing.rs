use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Stored in place of an omitted description.
pub const DEFAULT_DESCRIPTION: &str = "No description";

/// Image reference stored when no photo was uploaded. Served from the
/// application's own static directory.
pub const PLACEHOLDER_IMAGE: &str = "/static/placeholder-stock.svg";

/// A for-sale item as returned by the backend. Listings are immutable once
/// created: there is no edit or delete anywhere in the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub email: String,
    pub category: String,
    pub image_url: String,
    pub location: String,
    /// Assigned by the backend; absent rows render as "just now".
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Fields the creation form sends to the backend. `id` and `created_at` are
/// backend-assigned and never part of an insert.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewListing {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub email: String,
    pub category: String,
    pub image_url: String,
    pub location: String,
}

/// The backend key type is opaque to this application. Some deployments use
/// UUID text keys, some numeric sequences; accept both as a string.
fn opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "listing id must be a string or number, got {other}"
        ))),
    }
}
