//! gapfill-core — Answer matching, grading state, and progress aggregation.
//!
//! This crate defines the section/question data model and the pure,
//! synchronous grading functions that the rest of gapfill builds on.
//! Nothing here performs I/O except `CheckReport` persistence.

pub mod checker;
pub mod codec;
pub mod error;
pub mod matcher;
pub mod model;
pub mod progress;
pub mod report;
pub mod route;
pub mod session;
pub mod state;

pub use checker::{check_all, CheckSummary, QuestionOutcome};
pub use codec::{decode, encode, resolve_expected_answer};
pub use matcher::matches;
pub use model::{Question, QuestionId, Section, SectionEntry, SectionsIndex};
pub use progress::{compute_snapshot, SectionProgressSnapshot};
pub use session::SectionSession;
pub use state::{evaluate_one, reset_section, CheckResult, Evaluation, QuestionState, StateMap};
