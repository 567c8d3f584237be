//! Catalog validation.
//!
//! Grading is fail-soft, so content mistakes (a broken `answer_b64`, a
//! question with no answer) silently make questions unanswerable. This pass
//! surfaces them for authors.

use std::collections::HashSet;

use gapfill_core::codec::is_decodable;
use gapfill_core::model::{Section, SectionsIndex};

/// A warning from catalog validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The section the warning is about (if applicable).
    pub section_id: Option<String>,
    /// The question id (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn section(section_id: &str, message: impl Into<String>) -> Self {
        Self {
            section_id: Some(section_id.to_string()),
            question_id: None,
            message: message.into(),
        }
    }

    fn question(section_id: &str, question_id: &str, message: impl Into<String>) -> Self {
        Self {
            section_id: Some(section_id.to_string()),
            question_id: Some(question_id.to_string()),
            message: message.into(),
        }
    }
}

/// Validate the catalog index for common issues.
pub fn validate_index(index: &SectionsIndex) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen_ids = HashSet::new();
    for entry in &index.sections {
        if !seen_ids.insert(&entry.id) {
            warnings.push(ValidationWarning::section(
                &entry.id,
                format!("duplicate section ID: {}", entry.id),
            ));
        }
        if entry.id.contains('/') || entry.id.trim().is_empty() {
            warnings.push(ValidationWarning::section(
                &entry.id,
                "section ID cannot be used in a #/section/<id> link",
            ));
        }
        if entry.file.trim().is_empty() {
            warnings.push(ValidationWarning::section(&entry.id, "section has no file"));
        }
    }

    if index.sections.is_empty() {
        warnings.push(ValidationWarning {
            section_id: None,
            question_id: None,
            message: "catalog has no sections".into(),
        });
    }

    warnings
}

/// Validate one section's questions.
pub fn validate_section(section: &Section) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let sid = section.id.as_str();

    if section.questions.is_empty() {
        warnings.push(ValidationWarning::section(sid, "section has no questions"));
    }

    // Check for duplicate question IDs
    let mut seen_ids = HashSet::new();
    for q in &section.questions {
        if !seen_ids.insert(&q.id) {
            warnings.push(ValidationWarning::question(
                sid,
                q.id.as_str(),
                format!("duplicate question ID: {}", q.id),
            ));
        }
    }

    for q in &section.questions {
        let qid = q.id.as_str();

        if q.text.trim().is_empty() {
            warnings.push(ValidationWarning::question(sid, qid, "prompt is empty"));
        }

        let has_plain = q.answer.as_deref().is_some_and(|a| !a.is_empty());
        let encoded = q.answer_encoded.as_deref().filter(|a| !a.is_empty());

        match (has_plain, encoded) {
            (false, None) => warnings.push(ValidationWarning::question(
                sid,
                qid,
                "no answer or answer_b64; only an empty answer will be accepted",
            )),
            (false, Some(enc)) if !is_decodable(enc) => {
                warnings.push(ValidationWarning::question(
                    sid,
                    qid,
                    "answer_b64 is not valid base64; the question cannot be answered",
                ))
            }
            _ => {}
        }
    }

    warnings
}

/// Validate the index together with every loaded section.
pub fn validate_catalog(index: &SectionsIndex, sections: &[Section]) -> Vec<ValidationWarning> {
    let mut warnings = validate_index(index);
    for section in sections {
        warnings.extend(validate_section(section));
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use gapfill_core::model::{Question, SectionEntry};

    fn entry(id: &str) -> SectionEntry {
        SectionEntry {
            id: id.into(),
            title: id.into(),
            file: format!("data/{id}.json"),
        }
    }

    #[test]
    fn clean_catalog_has_no_warnings() {
        let index = SectionsIndex {
            course_title: None,
            sections: vec![entry("a")],
        };
        let section = Section::new(
            "a",
            "A",
            vec![
                Question::new(1, "Le ___", "chat"),
                Question::encoded(2, "La ___", "bW91Y2hl"),
            ],
        );
        assert!(validate_catalog(&index, &[section]).is_empty());
    }

    #[test]
    fn duplicate_and_unlinkable_sections() {
        let index = SectionsIndex {
            course_title: None,
            sections: vec![entry("a"), entry("a"), entry("b/c")],
        };
        let warnings = validate_index(&index);
        assert!(warnings.iter().any(|w| w.message.contains("duplicate")));
        assert!(warnings.iter().any(|w| w.message.contains("#/section/")));
    }

    #[test]
    fn empty_index() {
        let warnings = validate_index(&SectionsIndex::default());
        assert!(warnings.iter().any(|w| w.message.contains("no sections")));
    }

    #[test]
    fn question_problems() {
        let mut missing = Question::new(3, "Les ___", "");
        missing.answer = None;
        let section = Section::new(
            "s",
            "S",
            vec![
                Question::new(1, "  ", "x"),
                Question::encoded(2, "t", "not-valid-base64!!"),
                missing,
                Question::new(1, "dup", "y"),
            ],
        );
        let warnings = validate_section(&section);
        let messages: Vec<&str> = warnings.iter().map(|w| w.message.as_str()).collect();
        assert!(messages.iter().any(|m| m.contains("duplicate question ID: 1")));
        assert!(messages.iter().any(|m| m.contains("prompt is empty")));
        assert!(messages.iter().any(|m| m.contains("not valid base64")));
        assert!(messages.iter().any(|m| m.contains("no answer")));
        assert!(warnings
            .iter()
            .all(|w| w.section_id.as_deref() == Some("s")));
    }

    #[test]
    fn broken_encoding_is_fine_when_plaintext_exists() {
        let mut q = Question::new(1, "t", "chat");
        q.answer_encoded = Some("%%%".into());
        let section = Section::new("s", "S", vec![q]);
        assert!(validate_section(&section).is_empty());
    }
}
