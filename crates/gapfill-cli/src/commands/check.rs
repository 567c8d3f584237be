//! The `gapfill check` command.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use serde_json::Value;

use gapfill_core::matcher::coerce_answer;
use gapfill_core::model::QuestionId;
use gapfill_core::report::CheckReport;
use gapfill_core::session::SectionSession;
use gapfill_report::{html, text};

use crate::context::Context;

pub async fn execute(
    ctx: &Context,
    section_id: String,
    answers_path: PathBuf,
    format: String,
    output: Option<PathBuf>,
    fail_under: Option<usize>,
) -> Result<()> {
    let i18n = &ctx.i18n;

    let content = std::fs::read_to_string(&answers_path)
        .with_context(|| format!("failed to read answers: {}", answers_path.display()))?;
    let answers: Value = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse answers: {}", answers_path.display()))?;
    let Value::Object(answers) = answers else {
        anyhow::bail!("answers file must be a JSON object mapping question IDs to answers");
    };

    let service = ctx.service()?;
    let index = ctx.sections_list(&service).await?;
    let section = service.load_section(&index, &section_id).await?;

    let mut session = SectionSession::open(section);
    for (qid, value) in &answers {
        let id = QuestionId::new(qid.as_str());
        if session.set_input(&id, coerce_answer(value)).is_err() {
            tracing::warn!(question = %id, section = %section_id, "ignoring answer for unknown question");
        }
    }

    let summary = session.check_all();
    let correct = summary.correct_count;
    let report = CheckReport::new(
        ctx.course_title(&index),
        session.section(),
        summary,
        session.snapshot(),
    );

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", text::render_markdown(i18n, &report));
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            print!("{}", text::render_summary(i18n, &report.summary));
            println!("{}", text::render_progress(i18n, &report.snapshot));
            println!(
                "{}",
                text::render_correct_count(i18n, correct, report.summary.total_count)
            );
        }
    }

    if let Some(path) = output {
        let is_html = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("html") || e.eq_ignore_ascii_case("htm"));
        if is_html {
            html::write_html_report(&report, i18n, &path)?;
        } else {
            report.save_json(&path)?;
        }
        tracing::info!(path = %path.display(), "report written");
    }

    if fail_under.is_some_and(|min| correct < min) {
        std::process::exit(1);
    }

    Ok(())
}
