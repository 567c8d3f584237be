//! Settings shared by every command.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};

use gapfill_catalog::config::find_config_file;
use gapfill_catalog::{load_config_from, DataService, GapfillConfig};
use gapfill_core::model::SectionsIndex;
use gapfill_report::{I18n, Language};

pub struct Context {
    pub config: GapfillConfig,
    /// The config file in effect, if any.
    pub config_path: Option<PathBuf>,
    pub i18n: I18n,
}

impl Context {
    /// Load the config and pick the UI language.
    ///
    /// Language order: `--lang`, `GAPFILL_LANG`, the config file, `LANG`,
    /// then Ukrainian.
    pub fn load(config: Option<&Path>, catalog: Option<String>, lang: Option<&str>) -> Result<Self> {
        let config_path = find_config_file(config)?;
        let config = load_config_from(config_path.as_deref())?.with_catalog_root(catalog);

        let env_lang = std::env::var("GAPFILL_LANG").ok();
        let sys_lang = std::env::var("LANG").ok();
        let language = Language::detect([
            lang,
            env_lang.as_deref(),
            config.language.as_deref(),
            sys_lang.as_deref(),
        ]);
        tracing::debug!(%language, root = %config.catalog_root, "context loaded");

        Ok(Self {
            config,
            config_path,
            i18n: I18n::new(language),
        })
    }

    pub fn service(&self) -> Result<DataService> {
        Ok(DataService::from_config(&self.config)?)
    }

    /// Load the catalog index, reporting failure in the UI language.
    pub async fn sections_list(&self, service: &DataService) -> Result<SectionsIndex> {
        service
            .get_sections_list()
            .await
            .map_err(|e| anyhow!(self.i18n.t_with("LoadSectionsError", &[("message", &e)])))
    }

    pub fn course_title<'a>(&'a self, index: &'a SectionsIndex) -> &'a str {
        index.course_title_or(self.config.course_title.as_deref())
    }
}
