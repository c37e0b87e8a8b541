use serde::Serialize;

/// Pre-filled inquiry text shown before the buyer edits it.
pub const DEFAULT_GREETING: &str = "I'm interested in your item!";

/// A buyer inquiry tied to exactly one listing. Messages are fire-and-forget:
/// this application writes them and never reads them back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewMessage {
    pub listing_id: String,
    pub sender_email: String,
    pub message: String,
}
