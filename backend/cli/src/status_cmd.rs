//! `cookbook status`: query the running server's health endpoint.

use anyhow::Result;

use cookbook_config::CookbookConfig;

pub async fn run(config: &CookbookConfig) -> Result<()> {
    let url = format!("http://127.0.0.1:{}/api/health", config.port());
    match reqwest::get(&url).await {
        Ok(resp) => {
            let body: serde_json::Value = resp.json().await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Err(_) => {
            println!("Cookbook is not running on port {}", config.port());
        }
    }
    Ok(())
}
