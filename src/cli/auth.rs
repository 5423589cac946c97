use anyhow::{Context, Result};

use crate::core::AppConfig;
use crate::microsoft::{ClientSecretCredential, GRAPH_DEFAULT_SCOPE, TokenProvider};

pub async fn run() -> Result<()> {
    let config = AppConfig::from_env()?;
    let credential = ClientSecretCredential::from_config(reqwest::Client::new(), &config);

    let token = credential
        .get_token(&[GRAPH_DEFAULT_SCOPE])
        .await
        .context("Service principal could not authenticate")?;

    println!(
        "Access token acquired for client {} in tenant {}. Expires at {}.",
        config.client_id,
        config.tenant_id,
        token.expires_on.to_rfc3339()
    );

    Ok(())
}
