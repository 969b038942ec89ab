//! OAuth2 client-credentials token acquisition.
//!
//! Tokens are fetched from the tenant's `/oidc/token` endpoint and cached
//! until shortly before expiry; API requests never trigger more than one
//! token fetch at a time per source.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{AuthzError, Result};

/// Safety margin subtracted from the server-reported token lifetime.
const EXPIRY_MARGIN_SECS: i64 = 30;

/// Provides bearer tokens for AuthZ API requests.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn access_token(&self) -> Result<String>;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[allow(dead_code)]
    token_type: String,
    #[serde(default)]
    expires_in: i64,
}

struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

/// Token source backed by the OAuth2 client-credentials grant.
pub struct ClientCredentialsTokenSource {
    http: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    cached: RwLock<Option<CachedToken>>,
}

impl ClientCredentialsTokenSource {
    pub fn new(
        tenant_url: &str,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            token_url: format!("{}/oidc/token", tenant_url.trim_end_matches('/')),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            cached: RwLock::new(None),
        })
    }

    async fn fetch(&self) -> Result<CachedToken> {
        debug!(url = %self.token_url, "requesting access token");

        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AuthzError::token(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthzError::token(format!("HTTP {}: {}", status.as_u16(), body)));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthzError::token(format!("invalid token response: {}", e)))?;

        let lifetime = (token.expires_in - EXPIRY_MARGIN_SECS).max(0);
        Ok(CachedToken {
            token: token.access_token,
            expires_at: Utc::now() + chrono::Duration::seconds(lifetime),
        })
    }
}

#[async_trait]
impl TokenSource for ClientCredentialsTokenSource {
    async fn access_token(&self) -> Result<String> {
        if let Some(cached) = self.cached.read().await.as_ref() {
            if cached.expires_at > Utc::now() {
                return Ok(cached.token.clone());
            }
        }

        let fresh = self.fetch().await?;
        let token = fresh.token.clone();
        *self.cached.write().await = Some(fresh);
        Ok(token)
    }
}
