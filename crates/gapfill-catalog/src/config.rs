//! Configuration loading.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::service::DEFAULT_SECTIONS_PATH;
use crate::source::DEFAULT_HTTP_TIMEOUT_SECS;

/// File name searched for in the current directory.
pub const LOCAL_CONFIG_FILE: &str = "gapfill.toml";

/// Top-level gapfill configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapfillConfig {
    /// Directory or `http(s)://` base URL the catalog is served from.
    #[serde(default = "default_catalog_root")]
    pub catalog_root: String,
    /// Location of the catalog index, relative to the root.
    #[serde(default = "default_sections_path")]
    pub sections_path: String,
    /// Course title used when the catalog index has none.
    #[serde(default)]
    pub course_title: Option<String>,
    /// Preferred UI language (`uk`, `fr`, `en`).
    #[serde(default)]
    pub language: Option<String>,
    /// Timeout for HTTP catalog fetches.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,
}

fn default_catalog_root() -> String {
    ".".to_string()
}
fn default_sections_path() -> String {
    DEFAULT_SECTIONS_PATH.to_string()
}
fn default_http_timeout() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECS
}

impl Default for GapfillConfig {
    fn default() -> Self {
        Self {
            catalog_root: default_catalog_root(),
            sections_path: default_sections_path(),
            course_title: None,
            language: None,
            http_timeout_secs: default_http_timeout(),
        }
    }
}

impl GapfillConfig {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs.max(1))
    }

    /// Override the catalog root (e.g. from a command-line flag).
    pub fn with_catalog_root(mut self, root: Option<String>) -> Self {
        if let Some(root) = root {
            self.catalog_root = root;
        }
        self
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_config_env_vars(config: GapfillConfig) -> GapfillConfig {
    GapfillConfig {
        catalog_root: resolve_env_vars(&config.catalog_root),
        sections_path: resolve_env_vars(&config.sections_path),
        course_title: config.course_title.as_deref().map(resolve_env_vars),
        language: config.language.as_deref().map(resolve_env_vars),
        http_timeout_secs: config.http_timeout_secs,
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `gapfill.toml` in the current directory
/// 2. `~/.config/gapfill/config.toml`
///
/// Environment variable override: `GAPFILL_CATALOG`.
pub fn load_config() -> Result<GapfillConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<GapfillConfig> {
    let config = match find_config_file(path)? {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => GapfillConfig::default(),
    };

    let mut config = resolve_config_env_vars(config);

    if let Ok(root) = std::env::var("GAPFILL_CATALOG") {
        if !root.trim().is_empty() {
            config.catalog_root = root;
        }
    }

    Ok(config)
}

/// Parse config TOML without touching the environment.
pub fn parse_config(content: &str) -> Result<GapfillConfig> {
    Ok(toml::from_str::<GapfillConfig>(content)?)
}

/// The config file that would be read: the explicit path (which must exist),
/// or the first existing default location.
pub fn find_config_file(path: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(p) = path {
        if p.exists() {
            return Ok(Some(p.to_path_buf()));
        }
        anyhow::bail!("config file not found: {}", p.display());
    }

    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Ok(Some(local));
    }

    Ok(dirs_path()
        .map(|home| home.join("config.toml"))
        .filter(|global| global.exists()))
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gapfill"))
}

/// Persist the UI language into a config file, keeping its formatting and
/// comments. The file is created if it does not exist.
pub fn persist_language(path: &Path, language: &str) -> Result<()> {
    let content = if path.exists() {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?
    } else {
        String::new()
    };

    let mut doc = content
        .parse::<toml_edit::DocumentMut>()
        .with_context(|| format!("failed to parse config: {}", path.display()))?;
    doc["language"] = toml_edit::value(language);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, doc.to_string())
        .with_context(|| format!("failed to write config: {}", path.display()))?;
    Ok(())
}
