//! gapfill-catalog — Loading and validating section catalogs.
//!
//! Fetches the catalog index and section files from a directory or an HTTP
//! base URL, caches parsed JSON per location, and loads the TOML config.

pub mod config;
pub mod error;
pub mod service;
pub mod source;
pub mod validate;

pub use config::{load_config, load_config_from, GapfillConfig};
pub use error::CatalogError;
pub use service::DataService;
pub use source::{source_for, DataSource, FsSource, HttpSource};
