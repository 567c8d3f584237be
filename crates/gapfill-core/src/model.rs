//! Core data model types for gapfill.
//!
//! A catalog is an index of sections; each section is an ordered list of
//! fill-in-the-blank questions. Sections are immutable once loaded.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Course title used when neither the catalog nor the config provides one.
pub const DEFAULT_COURSE_TITLE: &str = "Grammaire progressive du Français";

/// Identifier of a question, unique within its section.
///
/// Content files use both strings and numbers for ids, so both are accepted
/// and stored in their textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QuestionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for QuestionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<u64> for QuestionId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl<'de> Deserialize<'de> for QuestionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => QuestionId(s),
            RawId::Number(n) => QuestionId(n.to_string()),
        })
    }
}

/// One fill-in-the-blank prompt with its expected answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    /// Prompt shown to the learner. Never translated.
    #[serde(default, deserialize_with = "lenient_text")]
    pub text: String,
    /// Hint shown on demand. Never translated.
    #[serde(default, deserialize_with = "lenient_text")]
    pub hint: String,
    /// Plaintext expected answer. Takes precedence over `answer_encoded`.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub answer: Option<String>,
    /// Base64-encoded expected answer.
    #[serde(
        default,
        rename = "answer_b64",
        alias = "answerEncoded",
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub answer_encoded: Option<String>,
}

impl Question {
    /// A question with a plaintext answer.
    pub fn new(id: impl Into<QuestionId>, text: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            hint: String::new(),
            answer: Some(answer.into()),
            answer_encoded: None,
        }
    }

    /// A question whose answer is only available in encoded form.
    pub fn encoded(
        id: impl Into<QuestionId>,
        text: impl Into<String>,
        answer_encoded: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            hint: String::new(),
            answer: None,
            answer_encoded: Some(answer_encoded.into()),
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = hint.into();
        self
    }
}

/// A titled, ordered collection of questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Section {
    pub fn new(id: impl Into<String>, title: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            questions,
        }
    }

    /// Look up a question by id.
    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| &q.id == id)
    }
}

/// An entry in the catalog index pointing at a section file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionEntry {
    pub id: String,
    pub title: String,
    /// Location of the section file, relative to the catalog root.
    pub file: String,
}

/// The catalog index (`sections.json`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionsIndex {
    #[serde(
        default,
        rename = "courseTitle",
        alias = "course_title",
        skip_serializing_if = "Option::is_none"
    )]
    pub course_title: Option<String>,
    #[serde(default)]
    pub sections: Vec<SectionEntry>,
}

impl SectionsIndex {
    pub fn find(&self, id: &str) -> Option<&SectionEntry> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// The course title, falling back to `fallback` and then to the built-in default.
    pub fn course_title_or<'a>(&'a self, fallback: Option<&'a str>) -> &'a str {
        self.course_title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .or(fallback)
            .unwrap_or(DEFAULT_COURSE_TITLE)
    }
}

/// Accept any JSON value, keeping it only when it is a string.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient_string(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_ids_accept_numbers_and_strings() {
        let q: Question = serde_json::from_str(r#"{"id": 3, "text": "x", "answer": "y"}"#).unwrap();
        assert_eq!(q.id.as_str(), "3");
        let q: Question = serde_json::from_str(r#"{"id": "a1", "text": "x"}"#).unwrap();
        assert_eq!(q.id, QuestionId::from("a1"));
    }

    #[test]
    fn encoded_answer_uses_content_key() {
        let q: Question =
            serde_json::from_str(r#"{"id": 1, "text": "Le ___", "answer_b64": "Y2hhdA=="}"#)
                .unwrap();
        assert_eq!(q.answer, None);
        assert_eq!(q.answer_encoded.as_deref(), Some("Y2hhdA=="));

        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["answer_b64"], "Y2hhdA==");
        assert!(json.get("answer").is_none());
    }

    #[test]
    fn encoded_answer_alias_is_accepted() {
        let q: Question =
            serde_json::from_str(r#"{"id": 1, "text": "t", "answerEncoded": "Y2hhdA=="}"#).unwrap();
        assert_eq!(q.answer_encoded.as_deref(), Some("Y2hhdA=="));
    }

    #[test]
    fn non_string_answers_are_coerced_to_absent() {
        let q: Question = serde_json::from_str(
            r#"{"id": 1, "text": 42, "hint": null, "answer": 7, "answer_b64": ["x"]}"#,
        )
        .unwrap();
        assert_eq!(q.text, "");
        assert_eq!(q.hint, "");
        assert_eq!(q.answer, None);
        assert_eq!(q.answer_encoded, None);
    }

    #[test]
    fn section_lookup() {
        let section = Section::new(
            "s1",
            "Articles",
            vec![Question::new(1, "a", "le"), Question::new(2, "b", "la")],
        );
        assert_eq!(
            section.question(&QuestionId::from(2)).map(|q| q.text.as_str()),
            Some("b")
        );
        assert!(section.question(&QuestionId::from("9")).is_none());
    }

    #[test]
    fn course_title_fallbacks() {
        let mut index = SectionsIndex::default();
        assert_eq!(index.course_title_or(None), DEFAULT_COURSE_TITLE);
        assert_eq!(index.course_title_or(Some("Mon cours")), "Mon cours");
        index.course_title = Some("Grammaire".into());
        assert_eq!(index.course_title_or(Some("Mon cours")), "Grammaire");
    }

    #[test]
    fn sections_index_parses_camel_case() {
        let index: SectionsIndex = serde_json::from_str(
            r#"{"courseTitle": "C", "sections": [{"id": "a", "title": "A", "file": "data/a.json"}]}"#,
        )
        .unwrap();
        assert_eq!(index.course_title.as_deref(), Some("C"));
        assert_eq!(index.find("a").map(|e| e.file.as_str()), Some("data/a.json"));
    }
}
