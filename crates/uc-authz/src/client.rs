//! HTTP client for the AuthZ API.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;
use uuid::Uuid;

use crate::error::{AuthzError, Result};
use crate::models::{Edge, EdgeType, Object, ObjectType, Page};
use crate::pagination::Cursor;
use crate::token::TokenSource;

/// Page size requested from the list endpoints.
const PAGE_LIMIT: u32 = 100;

/// AuthZ client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Regional API base URL
    pub endpoint_url: String,
    /// `Host` header override so the regional gateway routes to the tenant
    pub tenant_host: Option<String>,
    /// Connect timeout
    pub connect_timeout: Duration,
    /// Request timeout
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint_url: "http://localhost:8080".to_string(),
            tenant_host: None,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Read-only surface of the AuthZ API.
///
/// `Client` is the production implementation; callers that need to be tested
/// without a network take this trait instead of the concrete client.
#[async_trait]
pub trait AuthzApi: Send + Sync {
    async fn get_object(&self, id: Uuid) -> Result<Object>;
    async fn get_object_type(&self, id: Uuid) -> Result<ObjectType>;
    async fn get_edge_type(&self, id: Uuid) -> Result<EdgeType>;
    async fn list_objects(&self, cursor: &Cursor) -> Result<Page<Object>>;
    async fn list_edges(&self, cursor: &Cursor) -> Result<Page<Edge>>;
}

/// AuthZ API client authenticated via a [`TokenSource`].
pub struct Client {
    config: ClientConfig,
    http: reqwest::Client,
    token_source: Arc<dyn TokenSource>,
}

impl Client {
    pub fn new(config: ClientConfig, token_source: Arc<dyn TokenSource>) -> Result<Self> {
        if config.endpoint_url.is_empty() {
            return Err(AuthzError::InvalidUrl("endpoint URL is empty".to_string()));
        }

        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self { config, http, token_source })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.config.endpoint_url.trim_end_matches('/'), path);
        debug!(%url, "authz request");

        let token = self.token_source.access_token().await?;
        let mut request = self.http.get(&url).bearer_auth(token).query(query);

        if let Some(ref host) = self.config.tenant_host {
            request = request.header(reqwest::header::HOST, host);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthzError::api(status.as_u16(), body));
        }

        Ok(response.json::<T>().await?)
    }

    fn page_query(cursor: &Cursor) -> Vec<(&'static str, String)> {
        let mut query = vec![("limit", PAGE_LIMIT.to_string())];
        if !cursor.is_begin() {
            query.push(("starting_after", cursor.to_string()));
        }
        query
    }
}

#[async_trait]
impl AuthzApi for Client {
    async fn get_object(&self, id: Uuid) -> Result<Object> {
        self.get_json(&format!("/authz/objects/{}", id), &[]).await
    }

    async fn get_object_type(&self, id: Uuid) -> Result<ObjectType> {
        self.get_json(&format!("/authz/objecttypes/{}", id), &[]).await
    }

    async fn get_edge_type(&self, id: Uuid) -> Result<EdgeType> {
        self.get_json(&format!("/authz/edgetypes/{}", id), &[]).await
    }

    async fn list_objects(&self, cursor: &Cursor) -> Result<Page<Object>> {
        self.get_json("/authz/objects", &Self::page_query(cursor)).await
    }

    async fn list_edges(&self, cursor: &Cursor) -> Result<Page<Edge>> {
        self.get_json("/authz/edges", &Self::page_query(cursor)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_omits_begin_cursor() {
        let query = Client::page_query(&Cursor::begin());
        assert_eq!(query, vec![("limit", "100".to_string())]);
    }

    #[test]
    fn test_page_query_carries_cursor() {
        let query = Client::page_query(&Cursor::from("tok"));
        assert_eq!(query.len(), 2);
        assert_eq!(query[1], ("starting_after", "tok".to_string()));
    }
}
