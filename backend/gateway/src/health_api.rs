//! Health and session inspection endpoints.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;

use cookbook_core::SessionSnapshot;

use crate::server::GatewayState;

#[derive(Serialize)]
pub struct HealthReport {
    pub status: String,
    pub service: String,
    pub version: String,
    pub backend: String,
    pub uptime_seconds: i64,
    pub timestamp: DateTime<Utc>,
}

/// Handler for `GET /api/health`
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthReport> {
    let now = Utc::now();
    Json(HealthReport {
        status: "ok".into(),
        service: "cookbook".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        backend: state.backend.name().into(),
        uptime_seconds: (now - state.started_at).num_seconds(),
        timestamp: now,
    })
}

/// Handler for `GET /api/session`
pub async fn get_session(State(state): State<GatewayState>) -> Json<SessionSnapshot> {
    Json(state.session.lock().await.snapshot())
}

#[cfg(test)]
mod tests {
    use crate::server::test_support::spawn_test_server;

    #[tokio::test]
    async fn test_health_reports_ok() {
        let server = spawn_test_server().await;
        let body: serde_json::Value = reqwest::get(server.url("/api/health"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "cookbook");
        assert_eq!(body["backend"], "http");
    }

    #[tokio::test]
    async fn test_session_snapshot_starts_idle() {
        let server = spawn_test_server().await;
        let body: serde_json::Value = reqwest::get(server.url("/api/session"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["state"], "idle");
        assert_eq!(body["ingredients"], serde_json::json!([]));
        assert_eq!(body["transcript"], serde_json::json!([]));
    }
}
