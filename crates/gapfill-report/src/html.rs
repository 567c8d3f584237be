//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use anyhow::Result;
use std::path::Path;

use gapfill_core::report::CheckReport;

use crate::i18n::I18n;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML report from a check report.
pub fn generate_html(report: &CheckReport, i18n: &I18n) -> String {
    let mut html = String::new();
    let snapshot = &report.snapshot;
    let summary = &report.summary;

    html.push_str(&format!(
        "<!DOCTYPE html>\n<html lang=\"{}\">\n<head>\n",
        i18n.language().code()
    ));
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>{} — {}</title>\n",
        html_escape(&report.course_title),
        html_escape(&report.section.title)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(&report.course_title)));
    html.push_str(&format!(
        "<p class=\"meta\">{} | {} | {}</p>\n",
        html_escape(&report.section.title),
        html_escape(&i18n.t_with(
            "CorrectOfTotal",
            &[("correct", &summary.correct_count), ("total", &summary.total_count)],
        )),
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Progress
    html.push_str("<section class=\"progress\">\n");
    html.push_str(&format!(
        "<p>{}</p>\n",
        html_escape(&i18n.t_with(
            "ProgressDoneOfTotal",
            &[("filled", &snapshot.filled_count), ("total", &snapshot.total_count)],
        ))
    ));
    html.push_str(&format!(
        "<div class=\"bar\" role=\"progressbar\" aria-valuemin=\"0\" aria-valuemax=\"100\" aria-valuenow=\"{pct}\"><div style=\"width: {pct}%\">{pct}%</div></div>\n",
        pct = snapshot.filled_percent
    ));
    html.push_str("</section>\n");

    // Per-question results
    html.push_str("<section class=\"results\">\n");
    html.push_str(&format!("<h2>{}</h2>\n", html_escape(&i18n.t("Report"))));
    html.push_str(&format!(
        "<p role=\"status\">{}: {} / {}</p>\n",
        html_escape(&i18n.t("Correct")),
        summary.correct_count,
        summary.total_count
    ));
    html.push_str("<table>\n");
    html.push_str(&format!(
        "<thead><tr><th>#</th><th>{}</th><th>{}</th><th>{}</th></tr></thead>\n",
        html_escape(&i18n.t("Status")),
        html_escape(&i18n.t("YourAnswer")),
        html_escape(&i18n.t("Expected"))
    ));
    html.push_str("<tbody>\n");

    for o in &summary.per_question {
        let (class, status) = if o.was_correct {
            ("pass", format!("✓ {}", i18n.t("Correct")))
        } else {
            ("fail", format!("✗ {}", i18n.t("Wrong")))
        };
        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            class,
            html_escape(o.question_id.as_str()),
            html_escape(&status),
            html_escape(&o.user_answer),
            html_escape(&o.expected_answer)
        ));
    }

    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    html.push_str(&format!(
        "<footer>{}</footer>\n",
        html_escape(&i18n.t("FooterBrand"))
    ));
    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &CheckReport, i18n: &I18n, path: &Path) -> Result<()> {
    let html = generate_html(report, i18n);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; --accent: #2563eb; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; --accent: #60a5fa; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.bar { background: var(--border); border-radius: 6px; overflow: hidden; max-width: 480px; }
.bar > div { background: var(--accent); color: #fff; text-align: center; white-space: nowrap; min-height: 1.4rem; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
footer { margin-top: 2rem; color: #6b7280; font-size: 0.85rem; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;
    use gapfill_core::model::{Question, QuestionId, Section};
    use gapfill_core::session::SectionSession;

    fn make_test_report() -> CheckReport {
        let section = Section::new(
            "s1",
            "Les <articles>",
            vec![
                Question::new(1, "___ chat", "le"),
                Question::new(2, "___ maison", "la"),
            ],
        );
        let mut session = SectionSession::open(section);
        session.set_input(&QuestionId::from(1), "le").unwrap();
        session.set_input(&QuestionId::from(2), "l'").unwrap();
        let summary = session.check_all();
        CheckReport::new("Cours & co", session.section(), summary, session.snapshot())
    }

    #[test]
    fn html_report_contains_required_elements() {
        let report = make_test_report();
        let html = generate_html(&report, &I18n::new(Language::En));

        assert!(html.contains("<html lang=\"en\""));
        assert!(html.contains("</html>"));
        assert!(html.contains("Cours &amp; co"));
        assert!(html.contains("Les &lt;articles&gt;"));
        assert!(html.contains("l&#x27;"));
        assert!(html.contains("aria-valuenow=\"100\""));
        assert!(html.contains("Correct answers: 1 of 2"));
    }

    #[test]
    fn html_report_is_translated() {
        let report = make_test_report();
        let html = generate_html(&report, &I18n::new(Language::Fr));
        assert!(html.contains("<html lang=\"fr\""));
        assert!(html.contains("Attendu"));
        assert!(html.contains("Faux"));
    }

    #[test]
    fn html_report_write_to_file() {
        let report = make_test_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.html");

        write_html_report(&report, &I18n::default(), &path).unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html lang=\"uk\""));
    }
}
