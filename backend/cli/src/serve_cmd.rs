//! `cookbook serve`: run the web server.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use cookbook_config::CookbookConfig;
use cookbook_core::DEFAULT_SEED_PROMPT;
use cookbook_gateway::{GatewayState, HttpChatBackend, PageSettings, start_server};

pub async fn run(config: CookbookConfig, port: Option<u16>) -> Result<()> {
    let port = port.unwrap_or_else(|| config.port());
    let ip: IpAddr = config
        .bind_address()
        .parse()
        .with_context(|| format!("Invalid bind address: {}", config.bind_address()))?;
    let addr = SocketAddr::new(ip, port);

    let endpoint = config
        .endpoint_url()
        .map(str::to_string)
        .unwrap_or_else(|| local_chat_url(addr));

    info!(%addr, endpoint = %endpoint, "Starting cookbook server");

    let page = PageSettings {
        title: config.title().to_string(),
        subtitle: config.subtitle().to_string(),
    };
    let seed_prompt = config.seed_prompt().unwrap_or(DEFAULT_SEED_PROMPT);
    let state = GatewayState::new(Arc::new(HttpChatBackend::new(endpoint)), page, seed_prompt);

    start_server(addr, state).await
}

/// URL of this server's own `/api/chat`, reachable from the server itself.
pub fn local_chat_url(addr: SocketAddr) -> String {
    let host = if addr.ip().is_unspecified() {
        IpAddr::V4(Ipv4Addr::LOCALHOST)
    } else {
        addr.ip()
    };
    format!("http://{}/api/chat", SocketAddr::new(host, addr.port()))
}
