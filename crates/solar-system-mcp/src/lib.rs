//! MCP (Model Context Protocol) server for the solar system widget
//!
//! Exposes one tool (`focus-solar-planet`) and one resource (the widget
//! markup) over stateless streamable HTTP using JSON-RPC 2.0.
//!
//! # Architecture
//!
//! - `server`: JSON-RPC framing, method routing and the axum router
//! - `dispatch`: tool-call and resource-read pipeline
//! - `tools` / `resources`: the tool and resource handlers
//! - `auth`: bearer-token gate backed by a remote JWKS
//! - `config`, `logging`, `health`, `middleware`: service plumbing
//! - `error`: JSON-RPC error objects

pub mod auth;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod health;
pub mod logging;
pub mod middleware;
pub mod resources;
pub mod server;
pub mod tools;
pub mod types;

pub use dispatch::Dispatcher;
pub use error::{Error, Result};
pub use server::{router, McpServerState};
