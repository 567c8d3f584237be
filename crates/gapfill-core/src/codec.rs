//! Encoded-answer handling.
//!
//! Content authors may store expected answers as base64 (`answer_b64`) so they
//! are not readable at a glance. Decoding is fail-soft: a malformed value
//! resolves to the empty string and never interrupts grading.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::model::Question;

/// Decode standard (padded) base64 into text.
///
/// ASCII whitespace inside the input is ignored. Decoded bytes are read as
/// UTF-8; byte sequences that are not valid UTF-8 are read as Latin-1 so
/// every byte still maps to one character. Malformed input yields `""`.
pub fn decode(encoded: &str) -> String {
    match decode_bytes(encoded) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => e.into_bytes().into_iter().map(char::from).collect(),
        },
        Err(e) => {
            tracing::debug!("undecodable encoded answer {encoded:?}: {e}");
            String::new()
        }
    }
}

/// Encode text as standard base64 (the inverse of [`decode`] for UTF-8 text).
pub fn encode(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

/// Returns `true` if `encoded` decodes cleanly.
pub fn is_decodable(encoded: &str) -> bool {
    decode_bytes(encoded).is_ok()
}

fn decode_bytes(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    STANDARD.decode(compact.as_bytes())
}

/// The expected answer for a question.
///
/// A non-empty plaintext `answer` wins; otherwise the encoded answer is
/// decoded; a question with neither expects the empty string.
pub fn resolve_expected_answer(question: &Question) -> String {
    match question.answer.as_deref() {
        Some(answer) if !answer.is_empty() => answer.to_string(),
        _ => decode(question.answer_encoded.as_deref().unwrap_or("")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_known_values() {
        assert_eq!(decode("Y2hhdA=="), "chat");
        assert_eq!(decode("Y2hpZW4="), "chien");
        assert_eq!(decode(""), "");
    }

    #[test]
    fn encode_then_decode_on_printable_ascii() {
        for s in ["chat", "a", "ab", "abc", "Le chat ~ dort!", " {}[]|\\\"'`"] {
            assert_eq!(decode(&encode(s)), s);
        }
    }

    #[test]
    fn utf8_answers_survive() {
        assert_eq!(decode(&encode("élève")), "élève");
    }

    #[test]
    fn malformed_input_is_empty() {
        assert_eq!(decode("not-valid-base64!!"), "");
        assert_eq!(decode("Y2hhdA="), "");
        assert_eq!(decode("Y2h*dA=="), "");
        assert!(!is_decodable("not-valid-base64!!"));
        assert!(is_decodable("Y2hhdA=="));
    }

    #[test]
    fn whitespace_is_ignored() {
        assert_eq!(decode(" Y2hh\ndA== "), "chat");
    }

    #[test]
    fn latin1_fallback_for_non_utf8_bytes() {
        // 0xE9 alone is not valid UTF-8.
        assert_eq!(decode("6Q=="), "é");
    }

    #[test]
    fn plaintext_answer_takes_precedence() {
        let mut q = Question::new(1, "t", "chat");
        q.answer_encoded = Some("Y2hpZW4=".into());
        assert_eq!(resolve_expected_answer(&q), "chat");
    }

    #[test]
    fn encoded_answer_is_the_fallback() {
        let q = Question::encoded(1, "t", "Y2hhdA==");
        assert_eq!(resolve_expected_answer(&q), "chat");

        let mut empty_plain = Question::encoded(2, "t", "Y2hhdA==");
        empty_plain.answer = Some(String::new());
        assert_eq!(resolve_expected_answer(&empty_plain), "chat");
    }

    #[test]
    fn missing_answers_resolve_to_empty() {
        let mut q = Question::new(1, "t", "");
        q.answer = None;
        assert_eq!(resolve_expected_answer(&q), "");

        let bad = Question::encoded(2, "t", "%%%");
        assert_eq!(resolve_expected_answer(&bad), "");
    }
}
