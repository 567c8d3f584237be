//! Check reports with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::checker::CheckSummary;
use crate::model::Section;
use crate::progress::SectionProgressSnapshot;

/// The result of checking one section, as written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    pub course_title: String,
    /// Summary of the section (without its questions).
    pub section: SectionSummary,
    pub summary: CheckSummary,
    /// Progress right after the check.
    pub snapshot: SectionProgressSnapshot,
}

/// Summary of a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSummary {
    pub id: String,
    pub title: String,
    pub question_count: usize,
}

impl From<&Section> for SectionSummary {
    fn from(section: &Section) -> Self {
        Self {
            id: section.id.clone(),
            title: section.title.clone(),
            question_count: section.questions.len(),
        }
    }
}

impl CheckReport {
    pub fn new(
        course_title: impl Into<String>,
        section: &Section,
        summary: CheckSummary,
        snapshot: SectionProgressSnapshot,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            course_title: course_title.into(),
            section: SectionSummary::from(section),
            summary,
            snapshot,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: CheckReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Question;
    use crate::session::SectionSession;

    fn make_report() -> CheckReport {
        let section = Section::new("s1", "Articles", vec![Question::new(1, "___ chat", "le")]);
        let mut session = SectionSession::open(section.clone());
        session.set_input(&section.questions[0].id, "le").unwrap();
        let summary = session.check_all();
        CheckReport::new("Cours", &section, summary, session.snapshot())
    }

    #[test]
    fn report_captures_section_and_progress() {
        let report = make_report();
        assert_eq!(report.section.question_count, 1);
        assert_eq!(report.summary.correct_count, 1);
        assert_eq!(report.snapshot.correct_count, 1);
    }

    #[test]
    fn json_roundtrip() {
        let report = make_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("report.json");

        report.save_json(&path).unwrap();
        let loaded = CheckReport::load_json(&path).unwrap();

        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.section.id, "s1");
        assert_eq!(loaded.summary, report.summary);
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(CheckReport::load_json(&dir.path().join("nope.json")).is_err());
    }
}
