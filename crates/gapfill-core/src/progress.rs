//! Section progress aggregation.
//!
//! The snapshot is always re-derived from the full set of states so that a
//! single-question check and a bulk check can never leave it stale.

use serde::{Deserialize, Serialize};

use crate::state::{CheckResult, QuestionState};

/// Derived summary of how far the learner is through a section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionProgressSnapshot {
    /// Questions with non-blank input.
    pub filled_count: usize,
    pub total_count: usize,
    /// `filled_count / total_count` as a rounded percentage, 0 when empty.
    pub filled_percent: u8,
    /// Questions whose last check was correct.
    pub correct_count: usize,
}

/// Compute a snapshot from the current states.
pub fn compute_snapshot<'a, I>(states: I) -> SectionProgressSnapshot
where
    I: IntoIterator<Item = &'a QuestionState>,
{
    let mut snapshot = SectionProgressSnapshot::default();
    for state in states {
        snapshot.total_count += 1;
        if state.is_filled() {
            snapshot.filled_count += 1;
        }
        if state.last_result == CheckResult::Correct {
            snapshot.correct_count += 1;
        }
    }
    snapshot.filled_percent = percent(snapshot.filled_count, snapshot.total_count);
    snapshot
}

/// `part / total * 100` rounded half-up, 0 when `total` is 0.
pub fn percent(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let rounded = (part.min(total) * 200 + total) / (total * 2);
    rounded as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionId;

    fn state(id: u64, input: &str, result: CheckResult) -> QuestionState {
        QuestionState {
            question_id: QuestionId::from(id),
            current_input: input.into(),
            last_result: result,
        }
    }

    #[test]
    fn one_of_three_filled() {
        let states = vec![
            state(1, "chat", CheckResult::Unevaluated),
            state(2, "", CheckResult::Unevaluated),
            state(3, "", CheckResult::Unevaluated),
        ];
        let snap = compute_snapshot(&states);
        assert_eq!(
            snap,
            SectionProgressSnapshot {
                filled_count: 1,
                total_count: 3,
                filled_percent: 33,
                correct_count: 0,
            }
        );
    }

    #[test]
    fn empty_sequence_has_zero_percent() {
        let snap = compute_snapshot(&Vec::<QuestionState>::new());
        assert_eq!(snap.total_count, 0);
        assert_eq!(snap.filled_percent, 0);
    }

    #[test]
    fn correct_count_only_counts_checked_answers() {
        let states = vec![
            state(1, "chat", CheckResult::Correct),
            state(2, "chien", CheckResult::Unevaluated),
            state(3, "x", CheckResult::Incorrect),
        ];
        let snap = compute_snapshot(&states);
        assert_eq!(snap.filled_count, 3);
        assert_eq!(snap.filled_percent, 100);
        assert_eq!(snap.correct_count, 1);
    }

    #[test]
    fn whitespace_only_input_is_not_filled() {
        let states = vec![state(1, "  \t", CheckResult::Unevaluated)];
        assert_eq!(compute_snapshot(&states).filled_count, 0);
    }

    #[test]
    fn percent_rounds_half_up() {
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(1, 8), 13);
        assert_eq!(percent(1, 200), 1);
        assert_eq!(percent(0, 5), 0);
        assert_eq!(percent(5, 5), 100);
        assert_eq!(percent(0, 0), 0);
    }
}
