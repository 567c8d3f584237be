//! Per-question answer state and the single-question check.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::codec::resolve_expected_answer;
use crate::matcher::matches;
use crate::model::{Question, QuestionId};

/// Outcome of the most recent check of a question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckResult {
    /// Not checked since the section was opened or reset.
    #[default]
    Unevaluated,
    Correct,
    Incorrect,
}

impl CheckResult {
    pub fn from_correct(correct: bool) -> Self {
        if correct {
            CheckResult::Correct
        } else {
            CheckResult::Incorrect
        }
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckResult::Unevaluated => write!(f, "unevaluated"),
            CheckResult::Correct => write!(f, "correct"),
            CheckResult::Incorrect => write!(f, "incorrect"),
        }
    }
}

/// What the learner has typed for one question and how it last graded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionState {
    pub question_id: QuestionId,
    pub current_input: String,
    pub last_result: CheckResult,
}

impl QuestionState {
    /// A fresh, empty, unchecked state.
    pub fn new(question_id: QuestionId) -> Self {
        Self {
            question_id,
            current_input: String::new(),
            last_result: CheckResult::Unevaluated,
        }
    }

    /// Replace the typed input. The last check result is kept until the
    /// next check.
    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.current_input = input.into();
        self
    }

    /// Whether the input counts as filled for progress purposes.
    pub fn is_filled(&self) -> bool {
        !self.current_input.trim().is_empty()
    }
}

/// States of one open section, keyed by question id.
pub type StateMap = HashMap<QuestionId, QuestionState>;

/// Result of checking a single question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub state: QuestionState,
    pub was_correct: bool,
}

/// Check one question's current input against its expected answer.
///
/// The returned state is `Correct` or `Incorrect`, never `Unevaluated`.
/// Callers must recompute the progress snapshot from the updated states.
pub fn evaluate_one(state: &QuestionState, question: &Question) -> Evaluation {
    let expected = resolve_expected_answer(question);
    let was_correct = matches(&expected, &state.current_input, true);

    Evaluation {
        state: QuestionState {
            question_id: state.question_id.clone(),
            current_input: state.current_input.clone(),
            last_result: CheckResult::from_correct(was_correct),
        },
        was_correct,
    }
}

/// Fresh states for every question: empty input, unevaluated.
pub fn reset_section(questions: &[Question]) -> StateMap {
    questions
        .iter()
        .map(|q| (q.id.clone(), QuestionState::new(q.id.clone())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_answer_marks_state_correct() {
        let q = Question::new(1, "Le ___ dort.", "chat");
        let state = QuestionState::new(q.id.clone()).with_input("Chat");
        let eval = evaluate_one(&state, &q);
        assert!(eval.was_correct);
        assert_eq!(eval.state.last_result, CheckResult::Correct);
        assert_eq!(eval.state.current_input, "Chat");
    }

    #[test]
    fn wrong_answer_marks_state_incorrect() {
        let q = Question::encoded(1, "t", "Y2hhdA==");
        let state = QuestionState::new(q.id.clone()).with_input("chien");
        let eval = evaluate_one(&state, &q);
        assert!(!eval.was_correct);
        assert_eq!(eval.state.last_result, CheckResult::Incorrect);
    }

    #[test]
    fn empty_input_only_matches_empty_expected() {
        let q = Question::new(1, "t", "chat");
        let eval = evaluate_one(&QuestionState::new(q.id.clone()), &q);
        assert_eq!(eval.state.last_result, CheckResult::Incorrect);

        let mut no_answer = Question::new(2, "t", "");
        no_answer.answer = None;
        let eval = evaluate_one(&QuestionState::new(no_answer.id.clone()), &no_answer);
        assert!(eval.was_correct);
    }

    #[test]
    fn rechecking_never_returns_to_unevaluated() {
        let q = Question::new(1, "t", "chat");
        let first = evaluate_one(&QuestionState::new(q.id.clone()).with_input("chat"), &q);
        let edited = first.state.with_input("");
        assert_eq!(edited.last_result, CheckResult::Correct);
        let second = evaluate_one(&edited, &q);
        assert_eq!(second.state.last_result, CheckResult::Incorrect);
    }

    #[test]
    fn reset_produces_fresh_states() {
        let questions = vec![Question::new(1, "a", "x"), Question::new("b", "b", "y")];
        let states = reset_section(&questions);
        assert_eq!(states.len(), 2);
        for q in &questions {
            let s = &states[&q.id];
            assert_eq!(s.current_input, "");
            assert_eq!(s.last_result, CheckResult::Unevaluated);
        }
    }

    #[test]
    fn filled_ignores_whitespace() {
        let s = QuestionState::new(QuestionId::from(1));
        assert!(!s.clone().with_input("   ").is_filled());
        assert!(s.with_input(" a ").is_filled());
    }
}
