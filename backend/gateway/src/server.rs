//! Main HTTP server and shared state.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    Router,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tracing::{info, instrument};

use cookbook_core::{ChatBackend, CookbookSession};

use crate::{chat_api, health_api, ui};

/// Static text shown on the page.
#[derive(Debug, Clone)]
pub struct PageSettings {
    pub title: String,
    pub subtitle: String,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            title: "TechCollEDGE cookbook".to_string(),
            subtitle: "Add ingredients, then click for a recipe.".to_string(),
        }
    }
}

/// Application state shared across routes.
///
/// There is exactly one session: the app has no notion of users.
#[derive(Clone)]
pub struct GatewayState {
    pub session: Arc<Mutex<CookbookSession>>,
    pub backend: Arc<dyn ChatBackend>,
    pub page: Arc<PageSettings>,
    pub started_at: DateTime<Utc>,
}

impl GatewayState {
    pub fn new(backend: Arc<dyn ChatBackend>, page: PageSettings, seed_prompt: &str) -> Self {
        Self {
            session: Arc::new(Mutex::new(CookbookSession::new(seed_prompt))),
            backend,
            page: Arc::new(page),
            started_at: Utc::now(),
        }
    }
}

/// Build the router with all routes.
pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/api/chat", post(chat_api::chat))
        .route("/api/health", get(health_api::get_health))
        .route("/api/session", get(health_api::get_session))
        .merge(ui::ui_router())
        .with_state(state)
}

/// Bind `addr` and serve until the process is stopped.
#[instrument(skip(state))]
pub async fn start_server(addr: SocketAddr, state: GatewayState) -> Result<()> {
    let listener = TcpListener::bind(&addr).await?;
    serve(listener, state).await
}

/// Serve on an already bound listener.
pub async fn serve(listener: TcpListener, state: GatewayState) -> Result<()> {
    info!(addr = %listener.local_addr()?, backend = state.backend.name(), "Cookbook HTTP server listening");
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Cookbook HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
