//! Service principal authentication against the Microsoft identity
//! platform using the OAuth2 client-credentials grant.

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use super::GraphError;
use crate::core::AppConfig;

pub const GRAPH_DEFAULT_SCOPE: &str = "https://graph.microsoft.com/.default";

#[derive(Clone)]
pub struct AccessToken {
    pub token: String,
    pub expires_on: DateTime<Utc>,
}

// Never print the bearer token
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"<redacted>")
            .field("expires_on", &self.expires_on)
            .finish()
    }
}

/// Source of access tokens for Graph. Implementations are invoked once
/// per workflow and must not cache on behalf of callers.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn get_token(&self, scopes: &[&str]) -> Result<AccessToken, GraphError>;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    error_description: Option<String>,
}

pub struct ClientSecretCredential {
    http: reqwest::Client,
    authority_url: String,
    tenant_id: String,
    client_id: String,
    client_secret: String,
}

impl ClientSecretCredential {
    pub fn new(
        http: reqwest::Client,
        authority_url: &str,
        tenant_id: &str,
        client_id: &str,
        client_secret: &str,
    ) -> Self {
        Self {
            http,
            authority_url: authority_url.trim_end_matches('/').to_string(),
            tenant_id: tenant_id.to_string(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
        }
    }

    pub fn from_config(http: reqwest::Client, config: &AppConfig) -> Self {
        Self::new(
            http,
            &config.authority_url,
            &config.tenant_id,
            &config.client_id,
            &config.client_secret,
        )
    }

    fn token_url(&self) -> String {
        format!(
            "{}/{}/oauth2/v2.0/token",
            self.authority_url,
            urlencoding::encode(&self.tenant_id)
        )
    }
}

#[async_trait]
impl TokenProvider for ClientSecretCredential {
    async fn get_token(&self, scopes: &[&str]) -> Result<AccessToken, GraphError> {
        tracing::debug!("Requesting Graph access token for tenant {}", self.tenant_id);

        let scope = scopes.join(" ");
        let response = self
            .http
            .post(self.token_url())
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("grant_type", "client_credentials"),
                ("scope", scope.as_str()),
            ])
            .send()
            .await
            .map_err(|e| GraphError::Auth(format!("Token request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = match serde_json::from_str::<TokenErrorResponse>(&body) {
                Ok(err) => err.error_description.unwrap_or(err.error),
                Err(_) => body,
            };
            return Err(GraphError::Auth(format!(
                "Token endpoint returned {}: {}",
                status, detail
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| GraphError::Auth(format!("Failed to parse token response: {}", e)))?;

        tracing::debug!("Access token acquired, expires in {}s", token.expires_in);

        let expires_on = Duration::try_seconds(token.expires_in)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
            .ok_or_else(|| {
                GraphError::Auth(format!(
                    "Token response has an invalid expires_in: {}",
                    token.expires_in
                ))
            })?;

        Ok(AccessToken {
            token: token.access_token,
            expires_on,
        })
    }
}
