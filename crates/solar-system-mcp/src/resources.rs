//! MCP resource implementation for the widget markup
//!
//! The only readable resource is the widget template itself. Its URI is
//! treated as an opaque string: a read matches only on exact equality.

use serde_json::{json, Map};
use tracing::{debug, warn};

use solar_system_lib::WidgetDescriptor;

use crate::tools::tool_meta;
use crate::types::*;

/// Widget markup resource
pub struct WidgetResource;

impl WidgetResource {
    /// Entry for the resources/list response
    pub fn descriptor(widget: &WidgetDescriptor) -> ResourceDescriptor {
        ResourceDescriptor {
            name: widget.title.clone(),
            title: widget.title.clone(),
            uri: widget.template_uri.clone(),
            description: widget.resource_description(),
            mime_type: widget.mime_type.clone(),
            meta: tool_meta(widget),
        }
    }

    /// Entry for the resources/templates/list response
    pub fn template(widget: &WidgetDescriptor) -> ResourceTemplateDescriptor {
        ResourceTemplateDescriptor {
            name: widget.title.clone(),
            title: widget.title.clone(),
            uri_template: widget.template_uri.clone(),
            description: widget.resource_description(),
            mime_type: widget.mime_type.clone(),
            meta: tool_meta(widget),
        }
    }

    /// Handle a resources/read request
    ///
    /// An unknown URI is not a protocol fault: the result carries no
    /// contents and an `error` annotation instead.
    pub fn read(widget: &WidgetDescriptor, uri: &str) -> ReadResourceResult {
        if uri != widget.template_uri {
            warn!(uri, "read of unknown resource");
            let mut meta = Map::new();
            meta.insert("error".into(), json!(format!("Unknown resource: {uri}")));
            return ReadResourceResult {
                contents: Vec::new(),
                meta: Some(meta),
            };
        }

        debug!(uri, bytes = widget.html.len(), "serving widget markup");
        ReadResourceResult {
            contents: vec![TextResourceContents {
                uri: widget.template_uri.clone(),
                mime_type: widget.mime_type.clone(),
                text: widget.html.clone(),
                title: None,
                meta: Some(tool_meta(widget)),
            }],
            meta: None,
        }
    }
}
