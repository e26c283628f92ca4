//! Line classification: raw tool output into prioritized findings
//!
//! Classification is a total, deterministic function of a line's text.
//! Which tool produced the line never changes its category; the tool name
//! is only carried along for attribution.

use serde::{Deserialize, Serialize};

use crate::config::ClassifierConfig;

/// Priority category of one classified line
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingCategory {
    /// Contains a flag marker; the goal of the whole analysis
    Flag,
    /// Matches the keyword list (secrecy, authorship, hidden commentary)
    Interesting,
    /// Long run drawn purely from the encoded alphabet; Base64/hex-looking
    Encoded,
    /// Everything else, kept for context
    Informational,
}

impl std::fmt::Display for FindingCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flag => write!(f, "flag"),
            Self::Interesting => write!(f, "interesting"),
            Self::Encoded => write!(f, "encoded"),
            Self::Informational => write!(f, "informational"),
        }
    }
}

/// One classified unit of evidence from a tool's output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub category: FindingCategory,
    pub source_line: String,
    pub source_tool: String,
}

impl Finding {
    pub fn new(
        category: FindingCategory,
        source_line: impl Into<String>,
        source_tool: impl Into<String>,
    ) -> Self {
        Self {
            category,
            source_line: source_line.into(),
            source_tool: source_tool.into(),
        }
    }
}

/// Priority-ordered, first-match-wins line classifier
#[derive(Debug, Clone)]
pub struct Classifier {
    config: ClassifierConfig,
}

impl Classifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Classify a single line; total, never fails
    pub fn classify_line(&self, line: &str) -> FindingCategory {
        // First match wins, in strict priority order
        if self
            .config
            .flag_markers
            .iter()
            .any(|marker| line.contains(marker.as_str()))
        {
            return FindingCategory::Flag;
        }

        let lowered = line.to_lowercase();
        if self
            .config
            .keywords
            .iter()
            .any(|keyword| lowered.contains(keyword.as_str()))
        {
            return FindingCategory::Interesting;
        }

        if line.len() > self.config.encoded_min_len && is_encoded_alphabet(line) {
            return FindingCategory::Encoded;
        }

        FindingCategory::Informational
    }

    /// Normalize raw tool output into findings, in line order
    pub fn normalize(&self, text: &str, tool: &str) -> Vec<Finding> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| Finding::new(self.classify_line(line), line, tool))
            .collect()
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}

/// Alphanumeric plus Base64 padding/encoding punctuation
fn is_encoded_alphabet(line: &str) -> bool {
    line.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '='))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_marker_always_wins() {
        let classifier = Classifier::default();

        // Flag beats the keyword match on "secret" and any line noise
        let line = "secret field: CTF{abc} trailing garbage !!";
        assert_eq!(classifier.classify_line(line), FindingCategory::Flag);
        assert_eq!(
            classifier.classify_line("FLAG{x}"),
            FindingCategory::Flag
        );
        assert_eq!(
            classifier.classify_line("prefix flag{lowercase} suffix"),
            FindingCategory::Flag
        );
    }

    #[test]
    fn test_flag_markers_are_case_sensitive() {
        let classifier = Classifier::default();
        // "Ctf{" is not a registered marker
        assert_ne!(
            classifier.classify_line("Ctf{not_a_marker}"),
            FindingCategory::Flag
        );
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let classifier = Classifier::default();
        assert_eq!(
            classifier.classify_line("PASSWORD: hunter2"),
            FindingCategory::Interesting
        );
        assert_eq!(
            classifier.classify_line("Copyright 2019 someone"),
            FindingCategory::Interesting
        );
    }

    #[test]
    fn test_encoded_requires_length_and_alphabet() {
        let classifier = Classifier::default();

        let long_b64 = "VGhpcyBpcyBhIHNlY3JldCBtZXNzYWdlIQabcdef0123==";
        assert!(long_b64.len() > 40);
        assert_eq!(
            classifier.classify_line(long_b64),
            FindingCategory::Encoded
        );

        // Under the threshold: never encoded, even with a matching alphabet
        let short_b64 = "aGVsbG8gd29ybGQ=";
        assert_eq!(
            classifier.classify_line(short_b64),
            FindingCategory::Informational
        );

        // Over the threshold but with a space: alphabet check fails
        let spaced = "VGhpcyBpcyBhIHNlY3JldCBtZXNzYWdlIQ 0123456789abc";
        assert!(spaced.len() > 40);
        assert_eq!(
            classifier.classify_line(spaced),
            FindingCategory::Informational
        );
    }

    #[test]
    fn test_normalize_preserves_order() {
        let classifier = Classifier::default();

        let findings = classifier.normalize("id: CTF{abc}\nrandom line\n", "exiftool");

        assert_eq!(
            findings,
            vec![
                Finding::new(FindingCategory::Flag, "id: CTF{abc}", "exiftool"),
                Finding::new(FindingCategory::Informational, "random line", "exiftool"),
            ]
        );
    }

    #[test]
    fn test_normalize_skips_blank_lines() {
        let classifier = Classifier::default();
        let findings = classifier.normalize("\n\n  \nonly line\n\n", "strings");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].source_line, "only line");
    }

    #[test]
    fn test_classification_is_tool_agnostic() {
        let classifier = Classifier::default();
        let line = "Comment: see the author notes";

        let from_strings = classifier.normalize(line, "strings");
        let from_exif = classifier.normalize(line, "exiftool");

        assert_eq!(from_strings[0].category, from_exif[0].category);
        assert_eq!(from_strings[0].category, FindingCategory::Interesting);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let classifier = Classifier::default();
        let text = "CTF{a}\npassword: x\nVGhpcyBpcyBhIHNlY3JldCBtZXNzYWdlIQabcdef0123==\nplain";

        let first = classifier.normalize(text, "strings");
        let second = classifier.normalize(text, "strings");

        assert_eq!(first, second);
    }

    #[test]
    fn test_injected_config_overrides_defaults() {
        let config = ClassifierConfig {
            flag_markers: vec!["HTB{".to_string()],
            keywords: vec!["passphrase".to_string()],
            encoded_min_len: 8,
        };
        let classifier = Classifier::new(config);

        assert_eq!(classifier.classify_line("HTB{x}"), FindingCategory::Flag);
        assert_eq!(
            classifier.classify_line("CTF{x}"),
            FindingCategory::Informational
        );
        assert_eq!(
            classifier.classify_line("deadbeef99"),
            FindingCategory::Encoded
        );
    }
}
