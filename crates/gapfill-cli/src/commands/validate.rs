//! The `gapfill validate` command.

use anyhow::Result;

use gapfill_catalog::validate::{validate_index, validate_section};

use crate::context::Context;

pub async fn execute(ctx: &Context) -> Result<()> {
    let service = ctx.service()?;
    let index = ctx.sections_list(&service).await?;

    println!(
        "Catalog: {} ({} sections)",
        ctx.course_title(&index),
        index.sections.len()
    );

    let mut total_warnings = 0;
    for w in validate_index(&index) {
        let prefix = w
            .section_id
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
        total_warnings += 1;
    }

    let mut failed = 0;
    for (entry, loaded) in service.load_all_sections(&index).await {
        let section = match loaded {
            Ok(section) => section,
            Err(e) => {
                println!("  [{}] ERROR: {e}", entry.id);
                failed += 1;
                continue;
            }
        };

        println!(
            "Section: {} ({} questions)",
            section.title,
            section.questions.len()
        );
        for w in validate_section(&section) {
            let prefix = match (&w.section_id, &w.question_id) {
                (Some(s), Some(q)) => format!("  [{s} #{q}]"),
                (Some(s), None) => format!("  [{s}]"),
                _ => "  ".to_string(),
            };
            println!("{prefix} WARNING: {}", w.message);
            total_warnings += 1;
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} section(s) failed to load");
    }

    if total_warnings == 0 {
        println!("Catalog valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
