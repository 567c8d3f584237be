//! gapfill-report — UI strings and rendering.
//!
//! Turns progress snapshots and check summaries into terminal text,
//! markdown, and self-contained HTML. Only UI chrome is translated;
//! question and answer content is always shown as written.

pub mod html;
pub mod i18n;
pub mod text;

pub use i18n::{I18n, Language};
