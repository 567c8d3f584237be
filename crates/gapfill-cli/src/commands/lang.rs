//! The `gapfill lang` command.

use std::path::PathBuf;

use anyhow::{anyhow, Result};

use gapfill_catalog::config::{persist_language, LOCAL_CONFIG_FILE};
use gapfill_report::{I18n, Language};

use crate::context::Context;

pub fn execute(ctx: &Context, code: Option<String>) -> Result<()> {
    let Some(code) = code else {
        let current = ctx.i18n.language();
        println!("{}: {current}", ctx.i18n.t("Language"));
        let available: Vec<&str> = Language::ALL.iter().map(|l| l.code()).collect();
        println!("({})", available.join(", "));
        return Ok(());
    };

    let language: Language = code.parse().map_err(|e: String| anyhow!(e))?;
    let path = ctx
        .config_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE));
    persist_language(&path, language.code())?;

    let i18n = I18n::new(language);
    println!("{}: {language} ({})", i18n.t("Language"), path.display());
    Ok(())
}
