use anyhow::{Context, Result};

/// Connection settings for the managed backend: the service endpoint and the
/// public API key. Both are required — a missing value is a startup error,
/// never a silently misconfigured client.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub url: String,
    pub key: String,
}

impl BackendConfig {
    pub fn new(url: impl Into<String>, key: impl Into<String>) -> Self {
        let mut url: String = url.into();
        while url.ends_with('/') {
            url.pop();
        }
        Self { url, key: key.into() }
    }

    pub fn from_env() -> Result<Self> {
        let url = std::env::var("BAZAAR_BACKEND_URL")
            .context("BAZAAR_BACKEND_URL is not set (backend endpoint URL)")?;
        let key = std::env::var("BAZAAR_BACKEND_KEY")
            .context("BAZAAR_BACKEND_KEY is not set (backend public API key)")?;
        Ok(Self::new(url, key))
    }

    /// Origin the image-rendering surface is allowed to display from. Images
    /// either come from the backend's object store or are the local
    /// placeholder; anything else is untrusted.
    pub fn image_origin(&self) -> &str {
        &self.url
    }
}
