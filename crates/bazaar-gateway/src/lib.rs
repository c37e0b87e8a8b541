pub mod config;
pub mod error;
pub mod filter;
pub mod memory;
pub mod supabase;

use async_trait::async_trait;
use serde_json::Value;

pub use config::BackendConfig;
pub use error::GatewayError;
pub use filter::Filter;
pub use memory::MemoryGateway;
pub use supabase::SupabaseGateway;

/// Record collections and the object bucket the application touches.
pub const LISTINGS: &str = "listings";
pub const MESSAGES: &str = "messages";
pub const IMAGE_BUCKET: &str = "image-uploads";

/// Boundary over the managed backend. Everything the application persists or
/// reads goes through these four operations, so tests swap the HTTP
/// implementation for [`MemoryGateway`] without touching any handler.
///
/// No transactionality exists across calls: an `upload_object` followed by a
/// failed `insert` leaves the object behind.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Fetch every record matching `filter` (empty filter fetches all).
    /// No match is an empty vec, not an error.
    async fn fetch_all(&self, collection: &str, filter: &Filter)
    -> Result<Vec<Value>, GatewayError>;

    /// Fetch a single record by id. Unknown ids are [`GatewayError::NotFound`].
    async fn fetch_one(&self, collection: &str, id: &str) -> Result<Value, GatewayError>;

    /// Insert one record and return its stored representation, including the
    /// backend-assigned `id` and `created_at`.
    async fn insert(&self, collection: &str, record: Value) -> Result<Value, GatewayError>;

    /// Store a binary object and return its publicly reachable URL.
    async fn upload_object(
        &self,
        bucket: &str,
        name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, GatewayError>;
}
