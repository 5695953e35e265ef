//! Routing of tool calls and resource reads to their handlers.
//!
//! A tool call passes through three stages in order: authorization, input
//! validation and planet resolution. Each stage can end the call with an
//! `isError` envelope; later stages never run once an earlier one fails.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use solar_system_lib::{PlanetCatalog, WidgetDescriptor};

use crate::auth::{AuthGate, Authorization};
use crate::resources::WidgetResource;
use crate::tools::{FocusPlanetTool, FOCUS_PLANET_TOOL};
use crate::types::*;

/// Message returned for any rejected bearer token. The concrete reason is
/// only written to the log.
pub const AUTHORIZATION_FAILED: &str =
    "Authorization failed: a valid bearer token with the required scope is needed.";

/// Stateless request dispatcher shared by all connections.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    catalog: Arc<PlanetCatalog>,
    widget: Arc<WidgetDescriptor>,
    gate: AuthGate,
}

impl Dispatcher {
    pub fn new(catalog: Arc<PlanetCatalog>, widget: Arc<WidgetDescriptor>, gate: AuthGate) -> Self {
        Self {
            catalog,
            widget,
            gate,
        }
    }

    pub fn catalog(&self) -> &PlanetCatalog {
        &self.catalog
    }

    pub fn widget(&self) -> &WidgetDescriptor {
        &self.widget
    }

    pub fn gate(&self) -> &AuthGate {
        &self.gate
    }

    pub fn list_tools(&self) -> Vec<ToolDescriptor> {
        vec![FocusPlanetTool::descriptor(&self.widget)]
    }

    pub fn list_resources(&self) -> Vec<ResourceDescriptor> {
        vec![WidgetResource::descriptor(&self.widget)]
    }

    pub fn list_resource_templates(&self) -> Vec<ResourceTemplateDescriptor> {
        vec![WidgetResource::template(&self.widget)]
    }

    /// Resource reads are not gated.
    pub fn read_resource(&self, uri: &str) -> ReadResourceResult {
        WidgetResource::read(&self.widget, uri)
    }

    /// Invoke tool `name` with raw `arguments` on behalf of `bearer`.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Option<Value>,
        bearer: Option<&str>,
    ) -> CallToolResult {
        let context = match self.gate.authorize(bearer).await {
            Authorization::Authorized(context) => context,
            Authorization::Rejected(_) => return CallToolResult::error(AUTHORIZATION_FAILED),
        };
        debug!(
            tool = name,
            subject = context.subject.as_deref().unwrap_or("-"),
            "tool call authorized"
        );

        if name != FOCUS_PLANET_TOOL {
            info!(tool = name, "call to unknown tool");
            return CallToolResult::error(format!("Unknown tool: {name}"));
        }

        let input = match FocusPlanetTool::parse_arguments(arguments) {
            Ok(input) => input,
            Err(message) => {
                info!(tool = name, %message, "tool arguments rejected");
                return CallToolResult::error(message);
            }
        };

        FocusPlanetTool::execute(&self.catalog, &self.widget, input)
    }
}
