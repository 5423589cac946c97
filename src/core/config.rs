use std::env;

use anyhow::{Result, anyhow};

pub const DEFAULT_GRAPH_API_URL: &str = "https://graph.microsoft.com/v1.0";
pub const DEFAULT_AUTHORITY_URL: &str = "https://login.microsoftonline.com";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
    /// Organizer whose calendar is checked and who owns created events
    pub manager_email: String,
    /// Time zone name sent to Graph for display, e.g. "India Standard Time"
    pub time_zone: String,
    pub graph_api_url: String,
    pub authority_url: String,
}

fn required(name: &str) -> Result<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        Ok(_) => Err(anyhow!("Env var {} is set but empty", name)),
        Err(_) => Err(anyhow!("Missing env var {}", name)),
    }
}

impl AppConfig {
    /// Read the configuration from the environment, failing on the
    /// first missing required value.
    pub fn from_env() -> Result<Self> {
        let tenant_id = required("TENANT_ID")?;
        let client_id = required("CLIENT_ID")?;
        let client_secret = required("CLIENT_SECRET")?;
        let manager_email = required("MANAGER_EMAIL")?;
        let time_zone = required("TIME_ZONE")?;
        let graph_api_url = env::var("GRAPH_API_URL")
            .unwrap_or_else(|_| DEFAULT_GRAPH_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let authority_url = env::var("AUTHORITY_URL")
            .unwrap_or_else(|_| DEFAULT_AUTHORITY_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            tenant_id,
            client_id,
            client_secret,
            manager_email,
            time_zone,
            graph_api_url,
            authority_url,
        })
    }
}
