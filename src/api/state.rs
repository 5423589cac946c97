use std::sync::Arc;

use crate::core::AppConfig;
use crate::microsoft::{GRAPH_DEFAULT_SCOPE, GraphClient, GraphError, TokenProvider};

/// Process wide, read-only state shared by every request
pub struct AppState {
    pub config: AppConfig,
    pub credential: Arc<dyn TokenProvider>,
    // Reused for connection pooling only, holds no per-request data
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: AppConfig, credential: Arc<dyn TokenProvider>, http: reqwest::Client) -> Self {
        Self {
            config,
            credential,
            http,
        }
    }

    /// Authenticate with a freshly issued token and return a Graph
    /// client for the rest of the workflow.
    pub async fn graph_client(&self) -> Result<GraphClient, GraphError> {
        let token = self.credential.get_token(&[GRAPH_DEFAULT_SCOPE]).await?;
        Ok(GraphClient::new(
            self.http.clone(),
            &self.config.graph_api_url,
            token,
        ))
    }
}
