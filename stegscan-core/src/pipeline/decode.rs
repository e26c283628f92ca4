//! Decode stage: run encoded candidates through common decoders

use std::collections::HashSet;

use async_trait::async_trait;

use crate::analysis::{encoding, Classifier, Finding, FindingCategory};
use crate::Result;

use super::{Stage, StageContext, StageOutput};

/// Most candidates worth decoding in one analysis
const MAX_CANDIDATES: usize = 10;

/// Decoding pass: every encoded candidate surfaced so far is run through
/// Base64, hex, and ROT13; decoded text goes back through the classifier so
/// flags hiding one layer down still surface as flags
pub struct DecodeStage;

#[async_trait]
impl Stage for DecodeStage {
    fn name(&self) -> &str {
        "decode"
    }

    async fn run(&self, ctx: &StageContext<'_>) -> Result<StageOutput> {
        let mut output = StageOutput::default();

        let mut seen = HashSet::new();
        let candidates: Vec<&str> = ctx
            .prior
            .iter()
            .filter(|f| f.category == FindingCategory::Encoded)
            .map(|f| f.source_line.as_str())
            .filter(|line| seen.insert(line.to_string()))
            .take(MAX_CANDIDATES)
            .collect();

        for candidate in candidates {
            output
                .findings
                .extend(decode_candidate(candidate, ctx.classifier));
        }

        Ok(output)
    }
}

/// Decode one candidate and reclassify whatever comes out
fn decode_candidate(candidate: &str, classifier: &Classifier) -> Vec<Finding> {
    let mut findings = Vec::new();

    for attempt in encoding::try_common_decodings(candidate) {
        let decoded = classifier.normalize(&attempt.decoded, "decoder");

        // Decoded text that still classifies as encoded is gibberish, not
        // a result; only flags and keyword hits count
        let significant: Vec<Finding> = decoded
            .into_iter()
            .filter(|f| {
                matches!(
                    f.category,
                    FindingCategory::Flag | FindingCategory::Interesting
                )
            })
            .collect();

        if significant.is_empty() {
            // Worth a note only when a structured scheme actually decoded;
            // ROT13 output alone is usually noise
            if attempt.scheme != encoding::EncodingKind::Unknown {
                findings.push(Finding::new(
                    FindingCategory::Informational,
                    format!("{} decoded: {}", attempt.scheme, clip(&attempt.decoded)),
                    "decoder",
                ));
            }
        } else {
            findings.extend(significant);
        }
    }

    findings
}

fn clip(text: &str) -> String {
    let one_line = text.replace(['\n', '\r'], " ");
    if one_line.chars().count() > 100 {
        let clipped: String = one_line.chars().take(100).collect();
        format!("{}...", clipped)
    } else {
        one_line
    }
}
