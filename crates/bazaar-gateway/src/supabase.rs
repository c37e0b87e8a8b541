use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::{BackendConfig, Filter, Gateway, GatewayError};

/// HTTP implementation of [`Gateway`] against a Supabase-style backend:
/// records through the PostgREST interface under `/rest/v1`, binary objects
/// through the storage interface under `/storage/v1`.
///
/// Every operation is a single round trip. There is no retry and no request
/// timeout; a hung call hangs only the request that issued it.
pub struct SupabaseGateway {
    http: Client,
    config: BackendConfig,
}

impl SupabaseGateway {
    pub fn new(config: BackendConfig) -> Self {
        Self { http: Client::new(), config }
    }

    fn record_url(&self, collection: &str) -> String {
        format!("{}/rest/v1/{}", self.config.url, collection)
    }

    fn object_url(&self, bucket: &str, name: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.config.url, bucket, name)
    }

    fn public_object_url(&self, bucket: &str, name: &str) -> String {
        format!("{}/storage/v1/object/public/{}/{}", self.config.url, bucket, name)
    }

    /// Translate a [`Filter`] into PostgREST query parameters: equality as
    /// `field=eq.value`, substring as `field=ilike.*needle*`.
    fn query_params(filter: &Filter) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), "*".to_string())];
        if let Some((field, value)) = filter.eq_predicate() {
            params.push((field.to_string(), format!("eq.{value}")));
        }
        if let Some((field, needle)) = filter.contains_predicate() {
            params.push((field.to_string(), format!("ilike.*{needle}*")));
        }
        params
    }

    /// Pass successful responses through; turn anything else into
    /// [`GatewayError::Backend`] carrying the body text verbatim.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        if body.trim().is_empty() {
            Err(GatewayError::Backend(format!("backend returned {status}")))
        } else {
            Err(GatewayError::Backend(body))
        }
    }
}

#[async_trait]
impl Gateway for SupabaseGateway {
    async fn fetch_all(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Vec<Value>, GatewayError> {
        debug!(collection, filtered = !filter.is_empty(), "fetch_all");
        let response = self
            .http
            .get(self.record_url(collection))
            .header("apikey", &self.config.key)
            .bearer_auth(&self.config.key)
            .query(&Self::query_params(filter))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn fetch_one(&self, collection: &str, id: &str) -> Result<Value, GatewayError> {
        let filter = Filter::new().eq("id", id);
        let mut rows = self.fetch_all(collection, &filter).await?;
        if rows.is_empty() {
            return Err(GatewayError::NotFound);
        }
        Ok(rows.remove(0))
    }

    async fn insert(&self, collection: &str, record: Value) -> Result<Value, GatewayError> {
        debug!(collection, "insert");
        let response = self
            .http
            .post(self.record_url(collection))
            .header("apikey", &self.config.key)
            .bearer_auth(&self.config.key)
            .header("Prefer", "return=representation")
            .json(&record)
            .send()
            .await?;
        // PostgREST answers an insert with the array of stored rows.
        let mut rows: Vec<Value> = Self::check(response).await?.json().await?;
        if rows.is_empty() {
            return Err(GatewayError::Backend(
                "backend returned no representation for the inserted record".to_string(),
            ));
        }
        Ok(rows.remove(0))
    }

    async fn upload_object(
        &self,
        bucket: &str,
        name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, GatewayError> {
        debug!(bucket, name, size = bytes.len(), "upload_object");
        let response = self
            .http
            .post(self.object_url(bucket, name))
            .header("apikey", &self.config.key)
            .bearer_auth(&self.config.key)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(self.public_object_url(bucket, name))
    }
}
