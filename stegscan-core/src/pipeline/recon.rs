//! Reconnaissance stage: file type, metadata, entropy

use async_trait::async_trait;

use crate::analysis::{EntropyReading, Finding, FindingCategory};
use crate::tools::wrappers::{file_type, metadata};
use crate::Result;

use super::{Stage, StageContext, StageOutput};

/// First pass over the target: identify it, dump its metadata, measure its
/// byte entropy
pub struct ReconStage;

#[async_trait]
impl Stage for ReconStage {
    fn name(&self) -> &str {
        "recon"
    }

    async fn run(&self, ctx: &StageContext<'_>) -> Result<StageOutput> {
        let mut output = StageOutput::default();

        output.absorb(file_type::run(ctx.invoker, ctx.target).await, ctx.classifier);
        output.absorb(metadata::run(ctx.invoker, ctx.target).await, ctx.classifier);

        match tokio::fs::read(ctx.target).await {
            Ok(data) => {
                if let Some(reading) = EntropyReading::measure(&data) {
                    output.findings.push(Finding::new(
                        FindingCategory::Informational,
                        reading.to_string(),
                        "entropy",
                    ));
                }
            }
            Err(e) => {
                output.findings.push(Finding::new(
                    FindingCategory::Informational,
                    format!("could not read target for entropy: {}", e),
                    "entropy",
                ));
            }
        }

        Ok(output)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use std::io::Write;
    use std::time::Duration;

    use super::*;
    use crate::analysis::Classifier;
    use crate::config::AnalysisConfig;
    use crate::tools::{Invoker, ToolRegistry};

    #[tokio::test]
    async fn test_recon_always_yields_entropy_reading() {
        // Tools off the allow-list degrade to status notes; the entropy
        // reading comes from reading the file directly
        let invoker = Invoker::new(ToolRegistry::empty(), Duration::from_secs(5));
        let classifier = Classifier::default();
        let config = AnalysisConfig::default();
        let mut file = tempfile::NamedTempFile::new().expect("should create temp file");
        writeln!(file, "some sample content").expect("should write");

        let ctx = StageContext {
            invoker: &invoker,
            classifier: &classifier,
            config: &config,
            target: file.path(),
            prior: &[],
        };

        let output = ReconStage.run(&ctx).await.expect("recon should not fail");

        assert!(output
            .findings
            .iter()
            .any(|f| f.source_tool == "entropy" && f.source_line.starts_with("entropy:")));
        // file + exiftool were attempted and recorded
        assert_eq!(output.tool_runs.len(), 2);
    }
}
