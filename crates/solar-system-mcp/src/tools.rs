//! MCP tool implementation for the solar system widget
//!
//! The server exposes a single tool, `focus-solar-planet`, which resolves a
//! free-text planet name and answers with the widget markup embedded in the
//! result metadata so the host can render it.

use serde_json::{json, Map, Value};
use tracing::{debug, info};

use solar_system_lib::{resolve_planet, PlanetCatalog, WidgetDescriptor};

use crate::types::*;

/// Name under which the tool is registered
pub const FOCUS_PLANET_TOOL: &str = "focus-solar-planet";

const FOCUS_PLANET_DESCRIPTION: &str =
    "Render the solar system widget centered on the requested planet.";

/// Widget metadata attached to tool results and resource reads.
pub fn widget_meta(widget: &WidgetDescriptor) -> Map<String, Value> {
    let mut meta = Map::new();
    meta.insert("openai/outputTemplate".into(), json!(widget.template_uri));
    meta.insert("openai/toolInvocation/invoking".into(), json!(widget.invoking));
    meta.insert("openai/toolInvocation/invoked".into(), json!(widget.invoked));
    meta.insert("openai/widgetAccessible".into(), json!(true));
    meta.insert("openai/resultCanProduceWidget".into(), json!(true));
    meta
}

/// Widget metadata plus the read-only tool annotations.
pub fn tool_meta(widget: &WidgetDescriptor) -> Map<String, Value> {
    let mut meta = widget_meta(widget);
    meta.insert(
        "annotations".into(),
        json!({
            "destructiveHint": false,
            "openWorldHint": false,
            "readOnlyHint": true,
        }),
    );
    meta
}

/// The widget as an embedded `resource` content item.
pub fn embedded_widget(widget: &WidgetDescriptor) -> Content {
    Content::Resource {
        resource: TextResourceContents {
            uri: widget.template_uri.clone(),
            mime_type: widget.mime_type.clone(),
            text: widget.html.clone(),
            title: Some(widget.title.clone()),
            meta: None,
        },
    }
}

/// Handler for `focus-solar-planet`
pub struct FocusPlanetTool;

impl FocusPlanetTool {
    /// Entry for the tools/list response
    pub fn descriptor(widget: &WidgetDescriptor) -> ToolDescriptor {
        let input_schema = serde_json::to_value(schemars::schema_for!(FocusPlanetInput))
            .unwrap_or_else(|_| json!({ "type": "object" }));

        ToolDescriptor {
            name: FOCUS_PLANET_TOOL.to_string(),
            title: widget.title.clone(),
            description: FOCUS_PLANET_DESCRIPTION.to_string(),
            input_schema,
            meta: tool_meta(widget),
        }
    }

    /// Validate raw call arguments against the closed input schema
    ///
    /// Absent or `null` arguments are treated as an empty object so every
    /// field takes its default.
    pub fn parse_arguments(arguments: Option<Value>) -> std::result::Result<FocusPlanetInput, String> {
        let arguments = match arguments {
            None | Some(Value::Null) => Value::Object(Map::new()),
            Some(value) => value,
        };
        serde_json::from_value(arguments).map_err(|e| format!("Input validation error: {e}"))
    }

    /// Resolve the requested planet and build the result envelope
    pub fn execute(
        catalog: &PlanetCatalog,
        widget: &WidgetDescriptor,
        input: FocusPlanetInput,
    ) -> CallToolResult {
        debug!(planet_name = %input.planet_name, auto_orbit = input.auto_orbit, "focusing planet");

        let planet = match resolve_planet(catalog, &input.planet_name) {
            Ok(planet) => planet,
            Err(e) => {
                info!(planet_name = %input.planet_name, "planet could not be resolved");
                return CallToolResult::error(e.to_string());
            }
        };

        let output = FocusPlanetOutput {
            planet_name: planet.to_string(),
            planet_description: catalog.description(planet).unwrap_or_default().to_string(),
            auto_orbit: input.auto_orbit,
        };

        let mut meta = widget_meta(widget);
        meta.insert(
            "openai.com/widget".into(),
            serde_json::to_value(embedded_widget(widget)).unwrap_or(Value::Null),
        );

        info!(planet, "centered solar system view");

        CallToolResult {
            content: vec![Content::text(format!(
                "Centered the solar system view on {planet}."
            ))],
            structured_content: serde_json::to_value(&output).ok(),
            is_error: false,
            meta: Some(meta),
        }
    }
}
