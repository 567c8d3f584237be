//! Session error types.
//!
//! Grading never fails; these errors only describe misuse of a
//! [`SectionSession`](crate::session::SectionSession) by its caller.

use thiserror::Error;

use crate::model::QuestionId;

/// Errors from operating on an open section.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The question id does not belong to the open section.
    #[error("unknown question: {0}")]
    UnknownQuestion(QuestionId),
}
