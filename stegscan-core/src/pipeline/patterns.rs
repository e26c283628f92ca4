//! Pattern stage: string extraction and encoding detection

use std::collections::HashSet;

use async_trait::async_trait;

use crate::analysis::{encoding, Finding, FindingCategory};
use crate::tools::wrappers::strings;
use crate::Result;

use super::{Stage, StageContext, StageOutput};

/// Most candidates worth guessing an encoding for in one analysis
const MAX_GUESSES: usize = 10;

/// Pattern pass: pull printable strings out of the target, then name the
/// likely encoding of every encoded candidate seen so far
pub struct PatternStage;

#[async_trait]
impl Stage for PatternStage {
    fn name(&self) -> &str {
        "patterns"
    }

    async fn run(&self, ctx: &StageContext<'_>) -> Result<StageOutput> {
        let mut output = StageOutput::default();

        let min_len = ctx.config.tools.strings_min_len;
        output.absorb(
            strings::run(ctx.invoker, ctx.target, min_len).await,
            ctx.classifier,
        );

        let guesses = encoding_guesses(ctx.prior, &output.findings);
        output.findings.extend(guesses);

        Ok(output)
    }
}

/// One informational guess per distinct encoded candidate, in first-seen
/// order
fn encoding_guesses(prior: &[Finding], fresh: &[Finding]) -> Vec<Finding> {
    let mut seen = HashSet::new();
    prior
        .iter()
        .chain(fresh.iter())
        .filter(|f| f.category == FindingCategory::Encoded)
        .filter(|f| seen.insert(f.source_line.clone()))
        .take(MAX_GUESSES)
        .map(|f| {
            let kind = encoding::detect(&f.source_line);
            Finding::new(
                FindingCategory::Informational,
                format!("{} looks like {}", preview(&f.source_line), kind),
                "encoding",
            )
        })
        .collect()
}

/// Clip long candidates for display
fn preview(token: &str) -> String {
    if token.chars().count() > 48 {
        let clipped: String = token.chars().take(48).collect();
        format!("{}...", clipped)
    } else {
        token.to_string()
    }
}
