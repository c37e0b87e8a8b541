pub mod category;
pub mod listing;
pub mod message;

pub use category::{CATEGORIES, TODAYS_PICKS};
pub use listing::{DEFAULT_DESCRIPTION, Listing, NewListing, PLACEHOLDER_IMAGE};
pub use message::{DEFAULT_GREETING, NewMessage};
