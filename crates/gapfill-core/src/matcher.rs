//! Free-text answer matching.
//!
//! Learners legitimately vary case and accents, so the default comparison
//! trims, lowercases and strips combining diacritics before comparing.
//! The exact mode is a byte-for-byte comparison for dictation-style checks.

use unicode_normalization::UnicodeNormalization;

/// Combining diacritical marks removed by normalization.
const COMBINING_MARKS: std::ops::RangeInclusive<char> = '\u{0300}'..='\u{036F}';

/// Decide whether `actual` matches `expected`.
///
/// With `normalize`, both sides are trimmed, lowercased and stripped of
/// combining marks (after canonical decomposition). Without it, the strings
/// must be identical.
pub fn matches(expected: &str, actual: &str, normalize: bool) -> bool {
    if normalize {
        normalize_answer(expected) == normalize_answer(actual)
    } else {
        expected == actual
    }
}

/// The comparison form of an answer: trimmed, lowercased, diacritics removed.
pub fn normalize_answer(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .nfd()
        .filter(|c| !COMBINING_MARKS.contains(c))
        .collect()
}

/// Coerce an arbitrary JSON value to answer text. Non-strings become `""`.
pub fn coerce_answer(value: &serde_json::Value) -> &str {
    value.as_str().unwrap_or("")
}
