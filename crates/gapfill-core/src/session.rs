//! The open-section controller.
//!
//! A `SectionSession` exclusively owns one section and its answer states.
//! Opening another section means dropping this one; nothing is shared.

use crate::checker::{check_all, CheckSummary};
use crate::error::SessionError;
use crate::model::{Question, QuestionId, Section};
use crate::progress::{compute_snapshot, SectionProgressSnapshot};
use crate::state::{evaluate_one, reset_section, Evaluation, QuestionState, StateMap};

/// One open section and the learner's answers to it.
#[derive(Debug, Clone)]
pub struct SectionSession {
    section: Section,
    states: StateMap,
}

impl SectionSession {
    /// Open a section with empty, unchecked answers.
    pub fn open(section: Section) -> Self {
        let states = reset_section(&section.questions);
        Self { section, states }
    }

    pub fn section(&self) -> &Section {
        &self.section
    }

    pub fn questions(&self) -> &[Question] {
        &self.section.questions
    }

    /// The state of a question, if it belongs to this section.
    pub fn state(&self, id: &QuestionId) -> Option<&QuestionState> {
        self.states.get(id)
    }

    /// States in question order.
    pub fn ordered_states(&self) -> impl Iterator<Item = &QuestionState> {
        self.section
            .questions
            .iter()
            .filter_map(|q| self.states.get(&q.id))
    }

    /// Record an input edit.
    pub fn set_input(
        &mut self,
        id: &QuestionId,
        input: impl Into<String>,
    ) -> Result<SectionProgressSnapshot, SessionError> {
        let state = self
            .states
            .get_mut(id)
            .ok_or_else(|| SessionError::UnknownQuestion(id.clone()))?;
        state.current_input = input.into();
        Ok(self.snapshot())
    }

    /// Check a single question and store the result.
    pub fn check_one(&mut self, id: &QuestionId) -> Result<Evaluation, SessionError> {
        let question = self
            .section
            .question(id)
            .ok_or_else(|| SessionError::UnknownQuestion(id.clone()))?;
        let current = self
            .states
            .get(id)
            .cloned()
            .unwrap_or_else(|| QuestionState::new(id.clone()));

        let evaluation = evaluate_one(&current, question);
        self.states.insert(id.clone(), evaluation.state.clone());
        Ok(evaluation)
    }

    /// Check every question.
    pub fn check_all(&mut self) -> CheckSummary {
        check_all(&self.section.questions, &mut self.states)
    }

    /// Clear every answer and check result.
    pub fn reset(&mut self) {
        self.states = reset_section(&self.section.questions);
    }

    /// Progress derived from the current states.
    pub fn snapshot(&self) -> SectionProgressSnapshot {
        compute_snapshot(self.states.values())
    }

    pub fn hint(&self, id: &QuestionId) -> Result<&str, SessionError> {
        self.section
            .question(id)
            .map(|q| q.hint.as_str())
            .ok_or_else(|| SessionError::UnknownQuestion(id.clone()))
    }
}
