//! JSON-RPC error objects for the MCP server
//!
//! Protocol-level faults (malformed JSON, unknown methods, bad params) are
//! reported through this type. Tool and resource failures never use it: they
//! travel in-band inside the result envelopes defined in [`crate::types`].

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

/// Result type for MCP operations
pub type Result<T> = std::result::Result<T, Error>;

/// Invalid JSON was received.
pub const PARSE_ERROR: i32 = -32700;
/// The JSON sent is not a valid request object.
pub const INVALID_REQUEST: i32 = -32600;
/// The method does not exist or is not available.
pub const METHOD_NOT_FOUND: i32 = -32601;
/// Invalid method parameters.
pub const INVALID_PARAMS: i32 = -32602;
/// Internal JSON-RPC error.
pub const INTERNAL_ERROR: i32 = -32603;

/// JSON-RPC 2.0 error object
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq)]
#[error("{message}")]
pub struct Error {
    /// JSON-RPC error code
    pub code: i32,

    /// Human-readable error message
    pub message: String,

    /// Additional error context (e.g., method name, missing parameter)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Error {
    /// Create a new error with a code and message
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Add context information as JSON
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn parse_error(reason: impl Into<String>) -> Self {
        Self::new(PARSE_ERROR, "Parse error").with_data(json!({ "reason": reason.into() }))
    }

    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::new(INVALID_REQUEST, "Invalid Request").with_data(json!({ "reason": reason.into() }))
    }

    /// Method not found error
    pub fn method_not_found(method: impl Into<String>) -> Self {
        let method = method.into();
        Self::new(METHOD_NOT_FOUND, format!("Unknown method: {method}"))
            .with_data(json!({ "method": method }))
    }

    /// Invalid parameter error
    pub fn invalid_params(param: impl Into<String>, reason: impl Into<String>) -> Self {
        let p = param.into();
        Self::new(INVALID_PARAMS, format!("Invalid parameter: {p}")).with_data(json!({
            "parameter": p,
            "reason": reason.into()
        }))
    }

    /// Internal server error
    pub fn internal(reason: impl Into<String>) -> Self {
        Self::new(
            INTERNAL_ERROR,
            format!("Internal server error: {}", reason.into()),
        )
    }
}
