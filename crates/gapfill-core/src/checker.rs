//! Bulk "check all" over a section.

use serde::{Deserialize, Serialize};

use crate::codec::resolve_expected_answer;
use crate::matcher::matches;
use crate::model::{Question, QuestionId};
use crate::progress::percent;
use crate::state::{CheckResult, QuestionState, StateMap};

/// Per-question detail of a bulk check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOutcome {
    pub question_id: QuestionId,
    pub was_correct: bool,
    /// The learner's input, trimmed.
    pub user_answer: String,
    pub expected_answer: String,
}

/// Result of one bulk check, in question order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckSummary {
    pub correct_count: usize,
    /// Always equal to `per_question.len()`.
    pub total_count: usize,
    pub per_question: Vec<QuestionOutcome>,
}

impl CheckSummary {
    /// Rounded percentage of correct answers.
    pub fn score_percent(&self) -> u8 {
        percent(self.correct_count, self.total_count)
    }

    /// Outcomes that were not correct.
    pub fn mistakes(&self) -> impl Iterator<Item = &QuestionOutcome> {
        self.per_question.iter().filter(|o| !o.was_correct)
    }
}

/// Check every question against its state and record the results.
///
/// Every question is processed. A question without a state is graded as
/// incorrect with empty input and a fresh incorrect state is inserted for it,
/// so a snapshot computed afterwards covers every question.
pub fn check_all(questions: &[Question], states: &mut StateMap) -> CheckSummary {
    let mut per_question = Vec::with_capacity(questions.len());

    for question in questions {
        let expected = resolve_expected_answer(question);

        let (user_answer, was_correct) = match states.get_mut(&question.id) {
            Some(state) => {
                let ok = matches(&expected, &state.current_input, true);
                state.last_result = CheckResult::from_correct(ok);
                (state.current_input.trim().to_string(), ok)
            }
            None => {
                tracing::warn!(
                    question_id = %question.id,
                    "no state for question during check; grading as incorrect"
                );
                let mut state = QuestionState::new(question.id.clone());
                state.last_result = CheckResult::Incorrect;
                states.insert(question.id.clone(), state);
                (String::new(), false)
            }
        };

        per_question.push(QuestionOutcome {
            question_id: question.id.clone(),
            was_correct,
            user_answer,
            expected_answer: expected,
        });
    }

    let correct_count = per_question.iter().filter(|o| o.was_correct).count();

    CheckSummary {
        correct_count,
        total_count: per_question.len(),
        per_question,
    }
}
