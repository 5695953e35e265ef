//! Health check handlers for liveness and readiness probes.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::server::McpServerState;

/// Health status response for liveness and readiness probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Status indicator: "ok" or "not_ready: <reason>".
    pub status: String,

    pub service: String,

    pub version: String,

    /// Widget served by this instance (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub widget: Option<String>,

    /// Whether tool calls require a bearer token (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_enabled: Option<bool>,
}

impl HealthStatus {
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            widget: None,
            auth_enabled: None,
        }
    }

    pub fn ready(service: &str, version: &str, widget: &str, auth_enabled: bool) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            widget: Some(widget.to_string()),
            auth_enabled: Some(auth_enabled),
        }
    }

    pub fn not_ready(service: &str, version: &str, reason: &str) -> Self {
        Self {
            status: format!("not_ready: {reason}"),
            service: service.to_string(),
            version: version.to_string(),
            widget: None,
            auth_enabled: None,
        }
    }
}

/// Liveness probe handler.
///
/// ```text
/// GET /health/live
/// {"status":"ok","service":"solar-system-mcp","version":"0.1.0"}
/// ```
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness probe handler.
///
/// The widget markup is loaded before the listener binds, so the only
/// not-ready state is an empty markup body.
///
/// ```text
/// GET /health/ready
/// {"status":"ok","service":"solar-system-mcp","version":"0.1.0","widget":"solar-system","auth_enabled":false}
/// ```
pub async fn health_ready(State(state): State<McpServerState>) -> impl IntoResponse {
    let service = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");
    let dispatcher = state.dispatcher();
    let widget = dispatcher.widget();

    if widget.html.trim().is_empty() {
        let status = HealthStatus::not_ready(service, version, "widget markup is empty");
        return (StatusCode::SERVICE_UNAVAILABLE, Json(status));
    }

    let status = HealthStatus::ready(service, version, &widget.identifier, dispatcher.gate().is_enabled());
    (StatusCode::OK, Json(status))
}
