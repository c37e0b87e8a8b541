//! Small presentation helpers shared by the page handlers.

use chrono::{DateTime, Utc};

use bazaar_types::PLACEHOLDER_IMAGE;

/// Dollar rendering in the cards and detail pages: whole prices drop the
/// fraction (`$150`), everything else prints as typed (`$149.5`).
pub fn format_price(price: f64) -> String {
    if price.fract() == 0.0 && price.abs() < 1e15 {
        format!("${}", price as i64)
    } else {
        format!("${price}")
    }
}

/// Relative age of a listing ("just now", "5 minutes ago", ...). Rows the
/// backend returned without a timestamp read as freshly listed.
pub fn time_ago(created_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(created) = created_at else {
        return "just now".to_string();
    };
    let seconds = (now - created).num_seconds().max(0);
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;
    if seconds < 60 {
        "just now".to_string()
    } else if minutes < 60 {
        counted(minutes, "minute")
    } else if hours < 24 {
        counted(hours, "hour")
    } else if days < 30 {
        counted(days, "day")
    } else if days < 365 {
        counted(days / 30, "month")
    } else {
        counted(days / 365, "year")
    }
}

fn counted(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

/// Extension for the uploaded object's name, taken from the submitted
/// filename. Extensionless uploads get a neutral one.
pub fn file_extension(filename: &str) -> &str {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
        .unwrap_or("bin")
}

/// Image source the pages actually render. Only the application's own static
/// assets and the configured backend origin are trusted; any other reference
/// falls back to the placeholder rather than hot-linking an arbitrary host.
pub fn display_image<'a>(image_url: &'a str, trusted_origin: Option<&str>) -> &'a str {
    if image_url.starts_with("/static/") {
        return image_url;
    }
    if let Some(origin) = trusted_origin {
        if !origin.is_empty() && image_url.starts_with(origin) {
            return image_url;
        }
    }
    PLACEHOLDER_IMAGE
}
