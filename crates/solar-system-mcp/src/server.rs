//! MCP server state, JSON-RPC handling and HTTP transport
//!
//! The transport is stateless streamable HTTP: each `POST /mcp` carries one
//! JSON-RPC message and gets a JSON response, or `202 Accepted` for
//! notifications. No session is kept between requests.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::dispatch::Dispatcher;
use crate::health::{health_live, health_ready};
use crate::middleware::{bearer_token, make_request_span};
use crate::types::{JsonRpcRequest, JsonRpcResponse};
use crate::{Error, Result};

/// Name reported in `serverInfo`
pub const SERVER_NAME: &str = "solar-system";

/// Protocol revisions this server speaks, newest first
pub const SUPPORTED_PROTOCOL_VERSIONS: [&str; 3] = ["2025-06-18", "2025-03-26", "2024-11-05"];

/// Shared server state handed to every request handler
#[derive(Debug, Clone)]
pub struct McpServerState {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    dispatcher: Dispatcher,
    started_at: chrono::DateTime<chrono::Utc>,
}

impl McpServerState {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            inner: Arc::new(Inner {
                dispatcher,
                started_at: chrono::Utc::now(),
            }),
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.inner.dispatcher
    }

    pub fn started_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.inner.started_at
    }

    /// Handle one raw JSON-RPC message
    ///
    /// Returns `None` for notifications, which get no response body.
    pub async fn handle_message(&self, body: &[u8], bearer: Option<&str>) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_slice(body) {
            Ok(value) => value,
            Err(e) => return Some(JsonRpcResponse::failure(Value::Null, Error::parse_error(e.to_string()))),
        };

        if value.is_array() {
            return Some(JsonRpcResponse::failure(
                Value::Null,
                Error::invalid_request("batch requests are not supported"),
            ));
        }

        let fallback_id = value.get("id").cloned().unwrap_or(Value::Null);
        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => return Some(JsonRpcResponse::failure(fallback_id, Error::invalid_request(e.to_string()))),
        };

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::failure(
                fallback_id,
                Error::invalid_request(format!("unsupported jsonrpc version {:?}", request.jsonrpc)),
            ));
        }

        if request.is_notification() {
            debug!(method = %request.method, "notification received");
            return None;
        }

        let id = request.id.clone().unwrap_or(Value::Null);
        let method = request.method.clone();
        match self.handle_request(request, bearer).await {
            Ok(result) => Some(JsonRpcResponse::success(id, result)),
            Err(error) => {
                info!(method = %method, code = error.code, message = %error.message, "request failed");
                Some(JsonRpcResponse::failure(id, error))
            }
        }
    }

    async fn handle_request(&self, request: JsonRpcRequest, bearer: Option<&str>) -> Result<Value> {
        debug!(method = %request.method, "handling request");
        let dispatcher = self.dispatcher();
        let params = request.params.unwrap_or(Value::Null);

        match request.method.as_str() {
            "initialize" => Ok(initialize_result(&params)),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": to_json(&dispatcher.list_tools())? })),
            "tools/call" => {
                let name = required_str(&params, "name")?;
                let arguments = params.get("arguments").cloned();
                let result = dispatcher.call_tool(name, arguments, bearer).await;
                to_json(&result)
            }
            "resources/list" => Ok(json!({ "resources": to_json(&dispatcher.list_resources())? })),
            "resources/templates/list" => Ok(json!({
                "resourceTemplates": to_json(&dispatcher.list_resource_templates())?
            })),
            "resources/read" => {
                let uri = required_str(&params, "uri")?;
                to_json(&dispatcher.read_resource(uri))
            }
            other => Err(Error::method_not_found(other)),
        }
    }
}

/// Build the `initialize` result, echoing the client's protocol version when
/// supported and offering the newest one otherwise.
fn initialize_result(params: &Value) -> Value {
    let requested = params.get("protocolVersion").and_then(Value::as_str);
    let version = requested
        .filter(|v| SUPPORTED_PROTOCOL_VERSIONS.contains(v))
        .unwrap_or(SUPPORTED_PROTOCOL_VERSIONS[0]);
    info!(requested = requested.unwrap_or("-"), negotiated = version, "client initialized");

    json!({
        "protocolVersion": version,
        "serverInfo": { "name": SERVER_NAME, "version": env!("CARGO_PKG_VERSION") },
        "capabilities": { "tools": {}, "resources": {} }
    })
}

fn required_str<'a>(params: &'a Value, name: &str) -> Result<&'a str> {
    match params.get(name) {
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(Error::invalid_params(name, "must be a string")),
        None => Err(Error::invalid_params(name, "is required")),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| Error::internal(e.to_string()))
}

/// HTTP router: the MCP endpoint plus health probes
pub fn router(state: McpServerState) -> Router {
    Router::new()
        .route("/mcp", post(mcp_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .with_state(state)
}

async fn mcp_handler(State(state): State<McpServerState>, headers: HeaderMap, body: Bytes) -> Response {
    match state.handle_message(&body, bearer_token(&headers)).await {
        Some(response) => (StatusCode::OK, Json(response)).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}
