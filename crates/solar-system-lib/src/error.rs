use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the solar system library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a planet name could not be resolved against the catalog.
    #[error("Unknown planet. Provide one of: {}", .valid.join(", "))]
    UnknownPlanet { name: String, valid: Vec<String> },

    /// Raised when a catalog violates one of its construction invariants.
    #[error("invalid planet catalog: {message}")]
    InvalidCatalog { message: String },

    /// Raised when neither the exact nor a hashed widget asset exists.
    #[error(
        "widget HTML for \"{identifier}\" not found in {}; build the assets before starting the server",
        .dir.display()
    )]
    WidgetAssetMissing { identifier: String, dir: PathBuf },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
