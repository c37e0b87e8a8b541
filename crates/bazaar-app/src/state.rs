use std::sync::Arc;

use bazaar_gateway::Gateway;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    /// The managed backend, behind the narrow gateway boundary so tests can
    /// substitute an in-memory implementation.
    pub gateway: Arc<dyn Gateway>,
    /// Origin remote listing images may be rendered from; `None` trusts
    /// nothing beyond the local placeholder.
    pub image_origin: Option<String>,
}

impl AppStateInner {
    pub fn new(gateway: Arc<dyn Gateway>, image_origin: Option<String>) -> AppState {
        Arc::new(Self { gateway, image_origin })
    }
}
