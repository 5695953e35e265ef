//! Solar system library entry points.
//!
//! This crate holds the domain side of the solar system MCP server: the
//! immutable planet catalog, the free-text planet resolver and the widget
//! markup loader. The protocol crate (`solar-system-mcp`) should only depend
//! on the items exported here instead of reimplementing them.
//!

#![deny(warnings)]

pub mod catalog;
pub mod error;
pub mod resolver;
pub mod widget;

pub use catalog::{PlanetCatalog, DEFAULT_PLANET, PLANETS};
pub use error::{Error, Result};
pub use resolver::{clean_key, resolve_planet};
pub use widget::{
    WidgetDescriptor, WidgetProvider, WIDGET_IDENTIFIER, WIDGET_MIME_TYPE, WIDGET_TEMPLATE_URI,
};
