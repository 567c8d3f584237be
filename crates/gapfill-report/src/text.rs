//! Plain-text and markdown rendering.

use gapfill_core::checker::{CheckSummary, QuestionOutcome};
use gapfill_core::model::Question;
use gapfill_core::progress::SectionProgressSnapshot;
use gapfill_core::report::CheckReport;
use gapfill_core::state::{CheckResult, QuestionState};

use crate::i18n::I18n;

const BAR_WIDTH: usize = 20;

/// `Done 1 of 3` followed by a percent bar.
pub fn render_progress(i18n: &I18n, snapshot: &SectionProgressSnapshot) -> String {
    let filled = usize::from(snapshot.filled_percent) * BAR_WIDTH / 100;
    format!(
        "{}  [{}{}] {}%",
        i18n.t_with(
            "ProgressDoneOfTotal",
            &[("filled", &snapshot.filled_count), ("total", &snapshot.total_count)],
        ),
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH - filled),
        snapshot.filled_percent
    )
}

/// `Correct answers: 1 of 3`.
pub fn render_correct_count(i18n: &I18n, correct: usize, total: usize) -> String {
    i18n.t_with("CorrectOfTotal", &[("correct", &correct), ("total", &total)])
}

/// The badge shown next to a checked answer.
pub fn badge(result: CheckResult) -> &'static str {
    match result {
        CheckResult::Unevaluated => " ",
        CheckResult::Correct => "✔",
        CheckResult::Incorrect => "✘",
    }
}

/// One question with the learner's current input.
pub fn render_question(i18n: &I18n, question: &Question, state: Option<&QuestionState>) -> String {
    let (input, result) = state
        .map(|s| (s.current_input.as_str(), s.last_result))
        .unwrap_or(("", CheckResult::Unevaluated));
    format!(
        "{}\n  {}\n  [{}] {}",
        i18n.t_with("QuestionTitle", &[("id", &question.id)]),
        question.text,
        badge(result),
        input
    )
}

/// Status line after a single-question check.
pub fn render_check_result(i18n: &I18n, was_correct: bool) -> String {
    if was_correct {
        format!("✓ {}", i18n.t("Correct"))
    } else {
        format!("✗ {}", i18n.t("Wrong"))
    }
}

/// `#1: ✓ Correct ("chat", Expected: "chat")`.
pub fn render_outcome(i18n: &I18n, outcome: &QuestionOutcome) -> String {
    format!(
        "#{}: {} (\"{}\", {}: \"{}\")",
        outcome.question_id,
        render_check_result(i18n, outcome.was_correct),
        outcome.user_answer,
        i18n.t("Expected"),
        outcome.expected_answer
    )
}

/// A bulk check: the tally followed by one line per question.
pub fn render_summary(i18n: &I18n, summary: &CheckSummary) -> String {
    let mut out = format!(
        "{}: {} / {}\n",
        i18n.t("Correct"),
        summary.correct_count,
        summary.total_count
    );
    for outcome in &summary.per_question {
        out.push_str("  ");
        out.push_str(&render_outcome(i18n, outcome));
        out.push('\n');
    }
    out
}

/// Escape table-cell content for markdown.
fn md_cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}

/// Format a check report as markdown.
pub fn render_markdown(i18n: &I18n, report: &CheckReport) -> String {
    let mut md = String::new();

    md.push_str(&format!(
        "## {} — {}\n\n",
        md_cell(&report.course_title),
        md_cell(&report.section.title)
    ));
    md.push_str(&format!(
        "**{}:** {} / {} ({}%)\n\n",
        i18n.t("Score"),
        report.summary.correct_count,
        report.summary.total_count,
        report.summary.score_percent()
    ));
    md.push_str(&format!(
        "{}\n\n",
        i18n.t_with(
            "ProgressDoneOfTotal",
            &[
                ("filled", &report.snapshot.filled_count),
                ("total", &report.snapshot.total_count),
            ],
        )
    ));

    if !report.summary.per_question.is_empty() {
        md.push_str(&format!(
            "| # | {} | {} | {} |\n",
            i18n.t("Status"),
            i18n.t("YourAnswer"),
            i18n.t("Expected")
        ));
        md.push_str("|---|---|---|---|\n");
        for o in &report.summary.per_question {
            md.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                md_cell(o.question_id.as_str()),
                if o.was_correct { "✓" } else { "✗" },
                md_cell(&o.user_answer),
                md_cell(&o.expected_answer)
            ));
        }
    }

    md
}
