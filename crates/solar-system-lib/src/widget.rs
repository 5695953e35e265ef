//! Widget descriptor and markup loading.
//!
//! The widget markup is produced by an external build step and dropped into
//! an assets directory. That pipeline may append a content hash to the file
//! name, so loading accepts either `<identifier>.html` or the last
//! `<identifier>-*.html` by sort order.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result};

/// Identifier of the solar system widget; also the asset file stem.
pub const WIDGET_IDENTIFIER: &str = "solar-system";

/// Template URI clients use to fetch the widget markup. Treated as opaque.
pub const WIDGET_TEMPLATE_URI: &str = "ui://widget/solar-system_v2.html";

/// MIME type attached to widget markup.
pub const WIDGET_MIME_TYPE: &str = "text/html+skybridge";

/// Immutable bundle of widget identifiers, status phrases and markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetDescriptor {
    pub identifier: String,
    pub title: String,
    pub template_uri: String,
    /// Status phrase shown while the tool runs.
    pub invoking: String,
    /// Status phrase shown once the tool has completed.
    pub invoked: String,
    pub response_text: String,
    pub mime_type: String,
    pub html: String,
}

impl WidgetDescriptor {
    /// Build the solar system widget around already-loaded markup.
    pub fn solar_system(html: impl Into<String>) -> Self {
        Self {
            identifier: WIDGET_IDENTIFIER.to_string(),
            title: "Explore the Solar System".to_string(),
            template_uri: WIDGET_TEMPLATE_URI.to_string(),
            invoking: "Charting the solar system".to_string(),
            invoked: "Solar system ready".to_string(),
            response_text: "Solar system ready".to_string(),
            mime_type: WIDGET_MIME_TYPE.to_string(),
            html: html.into(),
        }
    }

    /// Human-readable description used in resource listings.
    pub fn resource_description(&self) -> String {
        format!("{} widget markup", self.title)
    }
}

/// Loads widget markup from an assets directory.
#[derive(Debug, Clone)]
pub struct WidgetProvider {
    assets_dir: PathBuf,
}

impl WidgetProvider {
    pub fn new(assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            assets_dir: assets_dir.into(),
        }
    }

    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    /// Load the solar system widget descriptor.
    ///
    /// Called once at startup; a missing asset is fatal for the server.
    pub fn load(&self) -> Result<WidgetDescriptor> {
        let html = self.load_markup(WIDGET_IDENTIFIER)?;
        Ok(WidgetDescriptor::solar_system(html))
    }

    /// Read the markup for `identifier`, falling back to hashed asset names.
    pub fn load_markup(&self, identifier: &str) -> Result<String> {
        let exact = self.assets_dir.join(format!("{identifier}.html"));
        info!(path = %exact.display(), "loading widget markup");
        if exact.is_file() {
            return Ok(fs::read_to_string(&exact)?);
        }

        debug!(identifier, "exact widget asset missing, looking for hashed variants");
        match self.latest_hashed_asset(identifier)? {
            Some(path) => {
                info!(path = %path.display(), "using hashed widget asset");
                Ok(fs::read_to_string(path)?)
            }
            None => Err(Error::WidgetAssetMissing {
                identifier: identifier.to_string(),
                dir: self.assets_dir.clone(),
            }),
        }
    }

    fn latest_hashed_asset(&self, identifier: &str) -> Result<Option<PathBuf>> {
        if !self.assets_dir.is_dir() {
            return Ok(None);
        }

        let prefix = format!("{identifier}-");
        let mut candidates = Vec::new();
        for entry in fs::read_dir(&self.assets_dir)? {
            let path = entry?.path();
            let matches = path
                .file_name()
                .and_then(|name| name.to_str())
                .map(|name| name.starts_with(&prefix) && name.ends_with(".html"))
                .unwrap_or(false);
            if matches && path.is_file() {
                candidates.push(path);
            }
        }

        candidates.sort();
        Ok(candidates.pop())
    }
}
