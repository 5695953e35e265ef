//! Type definitions for MCP requests, results and descriptors
//!
//! This module defines the serializable wire types exchanged over JSON-RPC,
//! with JSON Schema generation for the tool input.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use solar_system_lib::DEFAULT_PLANET;

// ============================================================================
// JSON-RPC FRAMING
// ============================================================================

/// Inbound JSON-RPC 2.0 message (request or notification)
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,

    /// Absent for notifications
    #[serde(default)]
    pub id: Option<Value>,

    pub method: String,

    #[serde(default)]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// Outbound JSON-RPC 2.0 response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<crate::Error>,
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Value, error: crate::Error) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

// ============================================================================
// TOOL INPUTS
// ============================================================================

/// Schema describing the solar system focus request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FocusPlanetInput {
    /// Planet to focus in the widget (case insensitive).
    #[serde(default = "default_planet_name", alias = "planet_name")]
    pub planet_name: String,

    /// Whether to keep the camera orbiting if the target planet is missing.
    #[serde(default = "default_auto_orbit", alias = "auto_orbit")]
    pub auto_orbit: bool,
}

fn default_planet_name() -> String {
    DEFAULT_PLANET.to_string()
}

fn default_auto_orbit() -> bool {
    true
}

impl Default for FocusPlanetInput {
    fn default() -> Self {
        Self {
            planet_name: default_planet_name(),
            auto_orbit: default_auto_orbit(),
        }
    }
}

// ============================================================================
// TOOL OUTPUTS
// ============================================================================

/// Structured content returned by a successful focus-solar-planet call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusPlanetOutput {
    pub planet_name: String,
    pub planet_description: String,
    #[serde(rename = "autoOrbit")]
    pub auto_orbit: bool,
}

/// Text resource payload, used both for resource reads and embedded widgets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextResourceContents {
    pub uri: String,
    pub mime_type: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "_meta", skip_serializing_if = "Option::is_none")]
    pub meta: Option<Map<String, Value>>,
}

/// A single content item inside a tool result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Content {
    Text { text: String },
    Resource { resource: TextResourceContents },
}

impl Content {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }
}

/// Envelope returned from tools/call
///
/// Failures are in-band: `is_error` is set and `content` carries the
/// human-readable reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallToolResult {
    pub content: Vec<Content>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<Value>,

    pub is_error: bool,

    #[serde(rename = "_meta", skip_serializing_if = "Option::is_none")]
    pub meta: Option<Map<String, Value>>,
}

impl CallToolResult {
    /// Error envelope carrying a single text message
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![Content::text(message)],
            structured_content: None,
            is_error: true,
            meta: None,
        }
    }

    /// First text content item, if any
    pub fn message(&self) -> Option<&str> {
        self.content.iter().find_map(|item| match item {
            Content::Text { text } => Some(text.as_str()),
            Content::Resource { .. } => None,
        })
    }
}

/// Envelope returned from resources/read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadResourceResult {
    pub contents: Vec<TextResourceContents>,

    #[serde(rename = "_meta", skip_serializing_if = "Option::is_none")]
    pub meta: Option<Map<String, Value>>,
}

// ============================================================================
// DESCRIPTORS
// ============================================================================

/// Entry in the tools/list response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: String,
    pub title: String,
    pub description: String,
    pub input_schema: Value,
    #[serde(rename = "_meta")]
    pub meta: Map<String, Value>,
}

/// Entry in the resources/list response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDescriptor {
    pub name: String,
    pub title: String,
    pub uri: String,
    pub description: String,
    pub mime_type: String,
    #[serde(rename = "_meta")]
    pub meta: Map<String, Value>,
}

/// Entry in the resources/templates/list response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceTemplateDescriptor {
    pub name: String,
    pub title: String,
    pub uri_template: String,
    pub description: String,
    pub mime_type: String,
    #[serde(rename = "_meta")]
    pub meta: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_focus_input_defaults() {
        let input: FocusPlanetInput = serde_json::from_value(json!({})).unwrap();
        assert_eq!(input, FocusPlanetInput::default());
        assert_eq!(input.planet_name, "Earth");
        assert!(input.auto_orbit);
    }

    #[test]
    fn test_focus_input_rejects_unknown_fields() {
        let err = serde_json::from_value::<FocusPlanetInput>(json!({"planet": "Mars"})).unwrap_err();
        assert!(err.to_string().contains("unknown field"));
    }

    #[test]
    fn test_focus_input_accepts_field_names() {
        let input: FocusPlanetInput =
            serde_json::from_value(json!({"planet_name": "Mars", "auto_orbit": false})).unwrap();
        assert_eq!(input.planet_name, "Mars");
        assert!(!input.auto_orbit);
    }

    #[test]
    fn test_focus_input_rejects_wrong_type() {
        let result = serde_json::from_value::<FocusPlanetInput>(json!({"autoOrbit": "yes"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_call_tool_result_wire_names() {
        let result = CallToolResult::error("nope");
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["isError"], true);
        assert_eq!(value["content"][0]["type"], "text");
        assert_eq!(value["content"][0]["text"], "nope");
        assert!(value.get("structuredContent").is_none());
        assert!(value.get("_meta").is_none());
    }

    #[test]
    fn test_input_schema_is_closed() {
        let schema = serde_json::to_value(schemars::schema_for!(FocusPlanetInput)).unwrap();
        assert_eq!(schema["additionalProperties"], false);
        assert!(schema["properties"]["planetName"].is_object());
        assert!(schema["properties"]["autoOrbit"].is_object());
    }
}
