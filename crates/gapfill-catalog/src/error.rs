//! Catalog error types.

use thiserror::Error;

/// Errors that can occur while loading catalog data.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The location does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Reading a local file failed.
    #[error("failed to read {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    /// The server answered with an error status.
    #[error("failed to load {location} (HTTP {status})")]
    Http { status: u16, location: String },

    /// The request did not complete.
    #[error("network error loading {location}: {message}")]
    Network { location: String, message: String },

    /// The document is not valid JSON or does not have the expected shape.
    #[error("failed to parse {location}: {source}")]
    Parse {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    /// The catalog index has no section with this id.
    #[error("unknown section: {0}")]
    UnknownSection(String),
}

impl CatalogError {
    /// Returns `true` if the data is missing rather than broken.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CatalogError::NotFound(_) | CatalogError::UnknownSection(_)
        ) || matches!(self, CatalogError::Http { status: 404, .. })
    }
}
