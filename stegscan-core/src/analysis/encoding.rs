//! Encoding detection and common decoders
//!
//! Candidate tokens surfaced by the classifier get a second pass here: a
//! guess at the encoding scheme, then decode attempts whose output is fed
//! back through the classifier to catch flags hiding one layer down.

use std::sync::LazyLock;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use regex::Regex;
use serde::{Deserialize, Serialize};

#[allow(clippy::expect_used)]
static URL_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("%[0-9A-Fa-f]{2}").expect("static pattern compiles"));

/// Best guess at how a token is encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingKind {
    Base64,
    Hex,
    Binary,
    UrlEncoded,
    PlainText,
    Unknown,
}

impl std::fmt::Display for EncodingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Base64 => write!(f, "base64"),
            Self::Hex => write!(f, "hex"),
            Self::Binary => write!(f, "binary"),
            Self::UrlEncoded => write!(f, "url-encoded"),
            Self::PlainText => write!(f, "plain text"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Guess the encoding of a token; first matching scheme wins
///
/// Narrower alphabets are checked first: a binary token also satisfies the
/// hex rule, and a hex token the Base64 rule, never the other way around.
pub fn detect(text: &str) -> EncodingKind {
    let text = text.trim();

    if text.len() > 10 && text.chars().all(|c| matches!(c, '0' | '1')) {
        return EncodingKind::Binary;
    }

    if text.len() > 10 && text.len() % 2 == 0 && text.chars().all(|c| c.is_ascii_hexdigit()) {
        return EncodingKind::Hex;
    }

    let base64_alphabet = |c: char| c.is_ascii_alphanumeric() || matches!(c, '+' | '/');
    let unpadded = text.trim_end_matches('=');
    let padding = text.len() - unpadded.len();
    if text.len() > 10
        && text.len() % 4 == 0
        && padding <= 2
        && !unpadded.is_empty()
        && unpadded.chars().all(base64_alphabet)
    {
        return EncodingKind::Base64;
    }

    if text.contains('%') && URL_ESCAPE.is_match(text) {
        return EncodingKind::UrlEncoded;
    }

    if !text.is_empty() && text.chars().all(|c| matches!(c, ' '..='~') || c.is_whitespace()) {
        return EncodingKind::PlainText;
    }

    EncodingKind::Unknown
}

/// One successful decode of a candidate token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeAttempt {
    pub scheme: EncodingKind,
    pub decoded: String,
}

/// Decode Base64 to text; `None` when invalid or not UTF-8
pub fn decode_base64(text: &str) -> Option<String> {
    let bytes = BASE64.decode(text.trim()).ok()?;
    String::from_utf8(bytes).ok()
}

/// Decode hex to text, tolerating `0x`/`\x` prefixes and spaces
pub fn decode_hex(text: &str) -> Option<String> {
    let cleaned = text
        .trim()
        .replace("0x", "")
        .replace("\\x", "")
        .replace(' ', "");
    let bytes = hex::decode(cleaned).ok()?;
    String::from_utf8(bytes).ok()
}

/// ROT13; total, self-inverse
pub fn rot13(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'a'..='z' => rotate(c, b'a'),
            'A'..='Z' => rotate(c, b'A'),
            _ => c,
        })
        .collect()
}

fn rotate(c: char, base: u8) -> char {
    char::from((c as u8 - base + 13) % 26 + base)
}

/// Try every common scheme, keeping attempts that yield readable text
pub fn try_common_decodings(text: &str) -> Vec<DecodeAttempt> {
    let mut attempts = Vec::new();

    if let Some(decoded) = decode_base64(text).filter(|d| is_readable(d)) {
        attempts.push(DecodeAttempt {
            scheme: EncodingKind::Base64,
            decoded,
        });
    }

    if let Some(decoded) = decode_hex(text).filter(|d| is_readable(d)) {
        attempts.push(DecodeAttempt {
            scheme: EncodingKind::Hex,
            decoded,
        });
    }

    // ROT13 never fails; only keep it when the input was alphabetic enough
    // to mean anything
    if text.chars().filter(|c| c.is_ascii_alphabetic()).count() * 2 > text.len() {
        attempts.push(DecodeAttempt {
            scheme: EncodingKind::Unknown,
            decoded: rot13(text),
        });
    }

    attempts
}

/// Printable text with at most whitespace control characters
fn is_readable(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| !c.is_control() || c.is_whitespace())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_base64() {
        assert_eq!(
            detect("VGhpcyBpcyBhIHNlY3JldCBtZXNzYWdlIQ=="),
            EncodingKind::Base64
        );
    }

    #[test]
    fn test_detect_hex() {
        assert_eq!(detect("4354467b6162637d"), EncodingKind::Hex);
    }

    #[test]
    fn test_detect_binary() {
        assert_eq!(detect("010000110101010001000110"), EncodingKind::Binary);
    }

    #[test]
    fn test_detect_url_encoded() {
        assert_eq!(detect("flag%3Dctf%7Babc%7D"), EncodingKind::UrlEncoded);
    }

    #[test]
    fn test_detect_plain_text() {
        assert_eq!(detect("just a sentence."), EncodingKind::PlainText);
    }

    #[test]
    fn test_short_tokens_are_not_base64() {
        // Proper padding but too short to call
        assert_ne!(detect("aGk="), EncodingKind::Base64);
    }

    #[test]
    fn test_decode_base64_round() {
        let decoded = decode_base64("Q1RGe2Jhc2U2NF9sYXllcn0=").unwrap();
        assert_eq!(decoded, "CTF{base64_layer}");
        assert!(decode_base64("!!! not base64 !!!").is_none());
    }

    #[test]
    fn test_decode_hex_with_prefixes() {
        assert_eq!(decode_hex("0x68656c6c6f").unwrap(), "hello");
        assert_eq!(decode_hex("68 65 6c 6c 6f").unwrap(), "hello");
        assert!(decode_hex("zz").is_none());
    }

    #[test]
    fn test_rot13_is_self_inverse() {
        let original = "CTF{rot_thirteen}";
        assert_eq!(rot13(&rot13(original)), original);
        assert_eq!(rot13("PGS{ebg_guvegrra}"), "CTF{rot_thirteen}");
    }

    #[test]
    fn test_try_common_decodings_finds_base64_flag() {
        let attempts = try_common_decodings("Q1RGe2Jhc2U2NF9sYXllcn0=");

        assert!(attempts
            .iter()
            .any(|a| a.scheme == EncodingKind::Base64 && a.decoded == "CTF{base64_layer}"));
    }

    #[test]
    fn test_try_common_decodings_skips_binary_garbage() {
        // Valid base64, but decodes to control bytes
        let attempts = try_common_decodings("AAEC");
        assert!(attempts.iter().all(|a| a.scheme != EncodingKind::Base64));
    }
}
