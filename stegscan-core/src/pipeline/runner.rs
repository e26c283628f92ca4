//! Sequential pipeline driver

use std::path::Path;

use tracing::{info, warn};

use crate::analysis::{Classifier, Finding, FindingCategory};
use crate::config::AnalysisConfig;
use crate::report::{Report, ReportMetadata};
use crate::tools::Invoker;

use super::{DecodeStage, PatternStage, ReconStage, Stage, StageContext, StegoStage};

/// Fixed-order analysis pipeline
///
/// Stages run one at a time; each sees the findings of the stages before
/// it. A failing stage is recorded in the report and the rest keep going:
/// the worst case is a partial report, never an aborted analysis.
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    /// The standard four stages: recon, stego, patterns, decode
    pub fn standard() -> Self {
        Self {
            stages: vec![
                Box::new(ReconStage),
                Box::new(StegoStage),
                Box::new(PatternStage),
                Box::new(DecodeStage),
            ],
        }
    }

    /// Build a pipeline from custom stages
    pub fn with_stages(stages: Vec<Box<dyn Stage>>) -> Self {
        Self { stages }
    }

    /// Analyze one target file and assemble the report
    pub async fn run(
        &self,
        invoker: &Invoker,
        config: &AnalysisConfig,
        target: &Path,
    ) -> Report {
        let classifier = Classifier::new(config.classifier.clone());
        let mut report = Report::new(ReportMetadata::new(target.display().to_string()));
        let mut accumulated: Vec<Finding> = Vec::new();

        for stage in &self.stages {
            info!(stage = stage.name(), target = %target.display(), "running stage");

            let ctx = StageContext {
                invoker,
                classifier: &classifier,
                config,
                target,
                prior: &accumulated,
            };

            match stage.run(&ctx).await {
                Ok(output) => {
                    for run in output.tool_runs {
                        report.add_tool_run(run);
                    }
                    accumulated.extend(output.findings.iter().cloned());
                    report.add_findings(output.findings);
                }
                Err(e) => {
                    warn!(stage = stage.name(), error = %e, "stage failed");
                    report.add_findings([Finding::new(
                        FindingCategory::Informational,
                        format!("stage {} failed: {}", stage.name(), e),
                        stage.name(),
                    )]);
                }
            }
        }

        report.finish();
        report
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::standard()
    }
}
