//! Analysis stage definitions

use std::path::Path;

use async_trait::async_trait;

use crate::analysis::{Classifier, Finding};
use crate::config::AnalysisConfig;
use crate::report::ToolRun;
use crate::tools::{Invoker, ToolOutput};
use crate::Result;

/// Context provided to stages during execution
pub struct StageContext<'a> {
    /// Tool invoker for running forensic tools
    pub invoker: &'a Invoker,
    /// Shared line classifier
    pub classifier: &'a Classifier,
    /// Analysis configuration
    pub config: &'a AnalysisConfig,
    /// Target file under analysis
    pub target: &'a Path,
    /// Findings accumulated by earlier stages, in pipeline order
    pub prior: &'a [Finding],
}

/// What one stage contributed to the analysis
#[derive(Debug, Default)]
pub struct StageOutput {
    pub findings: Vec<Finding>,
    pub tool_runs: Vec<ToolRun>,
}

impl StageOutput {
    /// Fold a tool wrapper's output into this stage's contribution:
    /// scannable text goes through the classifier, the run itself into the
    /// status table
    pub fn absorb(&mut self, output: ToolOutput, classifier: &Classifier) {
        if !output.text.is_empty() {
            self.findings
                .extend(classifier.normalize(&output.text, &output.tool));
        }
        self.tool_runs.push(ToolRun {
            tool: output.tool,
            outcome: output.outcome,
            note: output.note,
        });
    }
}

/// Core trait for all pipeline stages
#[async_trait]
pub trait Stage: Send + Sync {
    /// Stage name, used in logs and failure findings
    fn name(&self) -> &str;

    /// Run the stage against the target
    async fn run(&self, ctx: &StageContext<'_>) -> Result<StageOutput>;
}
