//! The browse screen: sidebar navigation, category filtering, title search
//! and the random "Today's picks" sample.

use askama::Template;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use serde::Deserialize;
use tracing::error;

use bazaar_types::{CATEGORIES, Listing, TODAYS_PICKS};

use crate::picks;
use crate::routes::page;
use crate::state::AppState;
use crate::store;
use crate::views;

/// Sidebar-driven states of the browse screen. Everything except `Category`
/// renders without touching the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MainView {
    Choose,
    YourListings,
    SellerHelp,
    Category,
}

#[derive(Debug, Deserialize)]
pub struct BrowseQuery {
    view: Option<String>,
    category: Option<String>,
    q: Option<String>,
}

impl BrowseQuery {
    fn main_view(&self) -> MainView {
        match self.view.as_deref() {
            Some("your-listings") => MainView::YourListings,
            Some("seller-help") => MainView::SellerHelp,
            Some("category") => MainView::Category,
            _ => MainView::Choose,
        }
    }
}

#[derive(Template)]
#[template(path = "directory.html")]
struct DirectoryTemplate {
    is_choose: bool,
    is_your_listings: bool,
    is_seller_help: bool,
    is_category: bool,
    heading: String,
    selected_category: String,
    search: String,
    cards: Vec<ListingCard>,
    error: Option<String>,
    categories: Vec<CategoryLink>,
}

struct CategoryLink {
    label: String,
    active: bool,
}

pub(crate) struct ListingCard {
    pub id: String,
    pub title: String,
    pub price: String,
    pub image: String,
    pub location: String,
    pub listed: String,
}

pub async fn browse(
    State(state): State<AppState>,
    Query(query): Query<BrowseQuery>,
) -> impl IntoResponse {
    let view = query.main_view();
    let selected_category = query.category.unwrap_or_default();
    let search = query.q.unwrap_or_default();

    let (cards, error) = if view == MainView::Category && !selected_category.is_empty() {
        match store::search_listings(state.gateway.as_ref(), Some(&selected_category), &search)
            .await
        {
            Ok(listings) => {
                let shown = if selected_category == TODAYS_PICKS {
                    picks::sample_picks(&listings, &mut rand::rng())
                } else {
                    listings
                };
                (cards_for(&state, shown), None)
            }
            Err(err) => {
                error!("listing fetch failed: {err}");
                (Vec::new(), Some(err.to_string()))
            }
        }
    } else {
        (Vec::new(), None)
    };

    let categories = std::iter::once(TODAYS_PICKS)
        .chain(CATEGORIES)
        .map(|label| CategoryLink {
            label: label.to_string(),
            active: view == MainView::Category && label == selected_category,
        })
        .collect();

    page(DirectoryTemplate {
        is_choose: view == MainView::Choose,
        is_your_listings: view == MainView::YourListings,
        is_seller_help: view == MainView::SellerHelp,
        is_category: view == MainView::Category,
        heading: selected_category.clone(),
        selected_category,
        search,
        cards,
        error,
        categories,
    })
}

pub(crate) fn cards_for(state: &AppState, listings: Vec<Listing>) -> Vec<ListingCard> {
    let now = chrono::Utc::now();
    listings
        .into_iter()
        .map(|listing| ListingCard {
            image: views::display_image(&listing.image_url, state.image_origin.as_deref())
                .to_string(),
            price: views::format_price(listing.price),
            listed: views::time_ago(listing.created_at, now),
            id: listing.id,
            title: listing.title,
            location: listing.location,
        })
        .collect()
}
