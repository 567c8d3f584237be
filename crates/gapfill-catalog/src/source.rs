//! Where catalog documents come from.
//!
//! A catalog root is either a local directory or an HTTP base URL. Locations
//! inside the catalog (`data/sections.json`, section `file` entries) are
//! resolved against that root.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tracing::instrument;

use crate::error::CatalogError;

/// Default timeout for HTTP fetches.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// A place that can serve catalog documents as text.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Human-readable description of the root (for logs and messages).
    fn describe(&self) -> String;

    /// Fetch the raw text at `location`.
    async fn fetch(&self, location: &str) -> Result<String, CatalogError>;
}

/// Normalize a location so cache keys are stable.
///
/// Absolute URLs and `/`-rooted paths are kept; `./` and `../` paths are
/// kept; any other relative path gets a leading `./`.
pub fn normalize_location(location: &str) -> String {
    if location.is_empty() || is_absolute_url(location) {
        return location.to_string();
    }
    if location.starts_with('/') || location.starts_with("./") || location.starts_with("../") {
        return location.to_string();
    }
    format!("./{location}")
}

/// Returns `true` for `http://` and `https://` locations (case-insensitive).
pub fn is_absolute_url(location: &str) -> bool {
    let lower = location.get(..8).unwrap_or(location).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Strip `./` and leading `/` so the location can be joined onto a root.
fn relative_part(location: &str) -> &str {
    let mut rest = location;
    loop {
        if let Some(r) = rest.strip_prefix("./") {
            rest = r;
        } else if let Some(r) = rest.strip_prefix('/') {
            rest = r;
        } else {
            return rest;
        }
    }
}

/// Catalog stored in a local directory.
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The file a location refers to.
    pub fn resolve(&self, location: &str) -> PathBuf {
        self.root.join(relative_part(location))
    }
}

#[async_trait]
impl DataSource for FsSource {
    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    #[instrument(skip(self), fields(root = %self.root.display()))]
    async fn fetch(&self, location: &str) -> Result<String, CatalogError> {
        if is_absolute_url(location) {
            return Err(CatalogError::NotFound(format!(
                "{location} (a local catalog cannot load URLs)"
            )));
        }

        let path = self.resolve(location);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => CatalogError::NotFound(path.display().to_string()),
                _ => CatalogError::Io {
                    location: path.display().to_string(),
                    source: e,
                },
            })
    }
}

/// Catalog served over HTTP.
pub struct HttpSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Network {
                location: base_url.to_string(),
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// The URL a location refers to.
    pub fn resolve(&self, location: &str) -> String {
        if is_absolute_url(location) {
            location.to_string()
        } else {
            format!("{}/{}", self.base_url, relative_part(location))
        }
    }
}

#[async_trait]
impl DataSource for HttpSource {
    fn describe(&self) -> String {
        self.base_url.clone()
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch(&self, location: &str) -> Result<String, CatalogError> {
        let url = self.resolve(location);

        let response = self
            .client
            .get(&url)
            .header("Cache-Control", "no-store")
            .send()
            .await
            .map_err(|e| CatalogError::Network {
                location: url.clone(),
                message: if e.is_timeout() {
                    "request timed out".to_string()
                } else {
                    e.to_string()
                },
            })?;

        let status = response.status().as_u16();
        if status >= 400 {
            return Err(CatalogError::Http {
                status,
                location: url,
            });
        }

        response.text().await.map_err(|e| CatalogError::Network {
            location: url,
            message: e.to_string(),
        })
    }
}

/// Pick the source for a catalog root: HTTP for URLs, the filesystem otherwise.
pub fn source_for(root: &str, timeout: Duration) -> Result<Box<dyn DataSource>, CatalogError> {
    if is_absolute_url(root) {
        Ok(Box::new(HttpSource::new(root, timeout)?))
    } else {
        Ok(Box::new(FsSource::new(root)))
    }
}
