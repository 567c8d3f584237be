//! The `gapfill sections` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use gapfill_core::route::Route;

use crate::context::Context;

pub async fn execute(ctx: &Context) -> Result<()> {
    let service = ctx.service()?;
    let index = ctx.sections_list(&service).await?;
    let i18n = &ctx.i18n;

    println!("{}", ctx.course_title(&index));
    println!("{}\n", i18n.t("Subtitle"));

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("ID"),
        Cell::new(i18n.t("Sections")),
        Cell::new("Link"),
        Cell::new("File"),
    ]);
    for entry in &index.sections {
        table.add_row(vec![
            Cell::new(&entry.id),
            Cell::new(&entry.title),
            Cell::new(Route::Section(entry.id.clone()).to_hash()),
            Cell::new(&entry.file),
        ]);
    }
    println!("{table}");
    println!("\n{}", i18n.t("OpenSectionDesc"));

    Ok(())
}
