/// Integration tests: drive the full router against the in-memory gateway
/// and assert on the rendered pages and the records the backend received.
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

use bazaar_app::routes::create::LISTING_CREATED;
use bazaar_app::routes::detail::{ITEM_NOT_FOUND, MESSAGE_SENT};
use bazaar_app::state::AppStateInner;
use bazaar_app::validate::{MISSING_FIELDS, MISSING_MESSAGE_FIELDS};
use bazaar_gateway::{LISTINGS, MESSAGES, MemoryGateway};
use bazaar_types::PLACEHOLDER_IMAGE;

const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

fn app(gateway: &Arc<MemoryGateway>) -> Router {
    bazaar_app::app(AppStateInner::new(gateway.clone(), None))
}

fn listing_row(title: &str, category: &str, price: f64) -> serde_json::Value {
    json!({
        "title": title,
        "description": "No description",
        "price": price,
        "email": "seller@example.com",
        "category": category,
        "image_url": PLACEHOLDER_IMAGE,
        "location": "Austin",
    })
}

async fn get(router: Router, uri: &str) -> (StatusCode, String) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

async fn post_form(router: Router, uri: &str, form: &str) -> (StatusCode, String) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

/// Hand-built multipart body for the creation form.
fn multipart_body(
    fields: &[(&str, &str)],
    image: Option<(&str, &str, &[u8])>,
) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    if let Some((filename, content_type, bytes)) = image {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"image\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

async fn post_multipart(router: Router, body: Vec<u8>) -> (StatusCode, String) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/create")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

fn complete_fields<'a>() -> Vec<(&'a str, &'a str)> {
    vec![
        ("title", "Bike"),
        ("category", "Vehicles"),
        ("price", "150"),
        ("location", "Austin"),
        ("contact_email", "a@b.com"),
        ("description", ""),
    ]
}

#[tokio::test]
async fn creating_then_viewing_a_listing() {
    let gateway = Arc::new(MemoryGateway::new());

    let (status, body) =
        post_multipart(app(&gateway), multipart_body(&complete_fields(), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(LISTING_CREATED));
    // The form resets after success.
    assert!(!body.contains("value=\"Bike\""));

    let records = gateway.records(LISTINGS);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["image_url"], PLACEHOLDER_IMAGE);
    assert_eq!(records[0]["description"], "No description");
    let id = records[0]["id"].as_str().unwrap().to_string();

    let (status, body) = get(app(&gateway), &format!("/item/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("$150"));
    assert!(body.contains("Category: Vehicles"));
    assert!(body.contains(PLACEHOLDER_IMAGE));
}

#[tokio::test]
async fn uploaded_photo_becomes_the_image_reference() {
    let gateway = Arc::new(MemoryGateway::new());

    let image = ("bike.jpg", "image/jpeg", &b"\xff\xd8fakejpeg"[..]);
    let (status, body) =
        post_multipart(app(&gateway), multipart_body(&complete_fields(), Some(image))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(LISTING_CREATED));
    assert_eq!(gateway.upload_calls(), 1);

    let records = gateway.records(LISTINGS);
    let stored_url = records[0]["image_url"].as_str().unwrap();
    assert!(
        stored_url.starts_with("memory://image-uploads/") && stored_url.ends_with(".jpg"),
        "stored reference {stored_url} should be the upload URL"
    );
    // The object itself landed in the bucket under the same name.
    let name = stored_url.strip_prefix("memory://image-uploads/").unwrap();
    assert_eq!(
        gateway.stored_object("image-uploads", name).as_deref(),
        Some(&b"\xff\xd8fakejpeg"[..])
    );
}

#[tokio::test]
async fn missing_required_fields_never_reach_the_backend() {
    let required = ["title", "category", "price", "location", "contact_email"];
    for missing in required {
        let gateway = Arc::new(MemoryGateway::new());
        let fields: Vec<(&str, &str)> = complete_fields()
            .into_iter()
            .map(|(name, value)| if name == missing { (name, "") } else { (name, value) })
            .collect();
        let (status, body) = post_multipart(app(&gateway), multipart_body(&fields, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(MISSING_FIELDS), "missing {missing}");
        assert_eq!(gateway.insert_calls(), 0, "missing {missing}");
        assert_eq!(gateway.upload_calls(), 0, "missing {missing}");
        // The entered values are kept for correction.
        if missing != "title" {
            assert!(body.contains("value=\"Bike\""), "missing {missing}");
        }
    }
}

#[tokio::test]
async fn upload_failure_aborts_the_submission() {
    let gateway = Arc::new(MemoryGateway::new());
    gateway.fail_uploads(true);

    let image = ("bike.jpg", "image/jpeg", &b"bytes"[..]);
    let (_, body) =
        post_multipart(app(&gateway), multipart_body(&complete_fields(), Some(image))).await;
    assert!(body.contains("upload rejected by backend"));
    assert_eq!(gateway.insert_calls(), 0, "no insert after a failed upload");
    assert!(gateway.records(LISTINGS).is_empty());
}

#[tokio::test]
async fn insert_failure_leaves_the_uploaded_object_behind() {
    let gateway = Arc::new(MemoryGateway::new());
    gateway.fail_inserts(true);

    let image = ("bike.png", "image/png", &b"bytes"[..]);
    let (_, body) =
        post_multipart(app(&gateway), multipart_body(&complete_fields(), Some(image))).await;
    assert!(body.contains("insert rejected by backend"));
    // Known gap: the object is not rolled back.
    assert_eq!(gateway.upload_calls(), 1);
    assert!(gateway.records(LISTINGS).is_empty());
}

#[tokio::test]
async fn category_filter_returns_exactly_the_matching_subset() {
    let gateway = Arc::new(MemoryGateway::new());
    gateway.seed(LISTINGS, listing_row("Road bike", "Vehicles", 150.0));
    gateway.seed(LISTINGS, listing_row("Canoe", "Vehicles", 300.0));
    gateway.seed(LISTINGS, listing_row("Desk lamp", "Home Goods", 20.0));

    let (status, body) = get(app(&gateway), "/?view=category&category=Vehicles").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Road bike"));
    assert!(body.contains("Canoe"));
    assert!(!body.contains("Desk lamp"));

    // Search narrows within the category, case-insensitively.
    let (_, body) = get(app(&gateway), "/?view=category&category=Vehicles&q=BIKE").await;
    assert!(body.contains("Road bike"));
    assert!(!body.contains("Canoe"));
}

#[tokio::test]
async fn empty_category_renders_the_fixed_message() {
    let gateway = Arc::new(MemoryGateway::new());
    let (_, body) = get(app(&gateway), "/?view=category&category=Electronics").await;
    assert!(body.contains("No listings found."));
}

#[tokio::test]
async fn todays_picks_samples_at_most_ten() {
    let gateway = Arc::new(MemoryGateway::new());
    for i in 0..25 {
        gateway.seed(LISTINGS, listing_row(&format!("Item {i}"), "Hobbies", i as f64));
    }

    let (_, body) = get(app(&gateway), "/?view=category&category=Today%27s+picks").await;
    assert_eq!(body.matches("class=\"card\"").count(), 10);

    // Fewer listings than the limit: every one is shown.
    let gateway = Arc::new(MemoryGateway::new());
    gateway.seed(LISTINGS, listing_row("Only item", "Hobbies", 1.0));
    let (_, body) = get(app(&gateway), "/?view=category&category=Today%27s+picks").await;
    assert_eq!(body.matches("class=\"card\"").count(), 1);
    assert!(body.contains("Only item"), "no invented records");
}

#[tokio::test]
async fn inquiry_with_empty_sender_fails_locally() {
    let gateway = Arc::new(MemoryGateway::new());
    let stored = gateway.seed(LISTINGS, listing_row("Bike", "Vehicles", 150.0));
    let id = stored["id"].as_str().unwrap();

    let (status, body) = post_form(
        app(&gateway),
        &format!("/item/{id}/message"),
        "sender_email=&message=Still+available%3F",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(MISSING_MESSAGE_FIELDS));
    // The typed message survives the failed attempt.
    assert!(body.contains("Still available?"));
    assert!(gateway.records(MESSAGES).is_empty());
}

#[tokio::test]
async fn inquiry_success_writes_one_message_and_resets_the_form() {
    let gateway = Arc::new(MemoryGateway::new());
    let stored = gateway.seed(LISTINGS, listing_row("Bike", "Vehicles", 150.0));
    let id = stored["id"].as_str().unwrap();

    let (_, body) = post_form(
        app(&gateway),
        &format!("/item/{id}/message"),
        "sender_email=buyer%40example.com&message=Still+available%3F",
    )
    .await;
    assert!(body.contains(MESSAGE_SENT));
    // Mutually exclusive status: success shows no error line.
    assert!(!body.contains(MISSING_MESSAGE_FIELDS));
    // Form back to defaults.
    assert!(body.contains("I&#x27;m interested in your item!"));

    let messages = gateway.records(MESSAGES);
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["listing_id"].as_str(), Some(id));
    assert_eq!(messages[0]["sender_email"], "buyer@example.com");
}

#[tokio::test]
async fn unknown_listing_renders_not_found() {
    let gateway = Arc::new(MemoryGateway::new());
    let (status, body) = get(app(&gateway), "/item/no-such-id").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains(ITEM_NOT_FOUND));
}

#[tokio::test]
async fn reading_a_listing_twice_is_idempotent() {
    let gateway = Arc::new(MemoryGateway::new());
    let stored = gateway.seed(LISTINGS, listing_row("Bike", "Vehicles", 150.0));
    let id = stored["id"].as_str().unwrap();

    let (_, first) = get(app(&gateway), &format!("/item/{id}")).await;
    let (_, second) = get(app(&gateway), &format!("/item/{id}")).await;
    assert_eq!(first, second);
}
