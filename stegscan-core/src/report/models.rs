//! Report data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::{Finding, FindingCategory};
use crate::tools::InvocationOutcome;

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Report title
    pub title: String,
    /// Target file as given by the caller
    pub target: String,
    /// Analysis identifier
    pub analysis_id: String,
    /// Analysis start time
    pub started_at: DateTime<Utc>,
    /// Analysis end time
    pub finished_at: Option<DateTime<Utc>>,
}

impl ReportMetadata {
    pub fn new(target: impl Into<String>) -> Self {
        let target = target.into();
        Self {
            title: format!("Analysis Report - {}", target),
            target,
            analysis_id: Uuid::new_v4().to_string(),
            started_at: Utc::now(),
            finished_at: None,
        }
    }
}

/// Finding counts by category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub flags: usize,
    pub interesting: usize,
    pub encoded: usize,
    pub informational: usize,
}

impl CategoryCounts {
    pub fn total(&self) -> usize {
        self.flags + self.interesting + self.encoded + self.informational
    }

    pub fn of(&self, category: FindingCategory) -> usize {
        match category {
            FindingCategory::Flag => self.flags,
            FindingCategory::Interesting => self.interesting,
            FindingCategory::Encoded => self.encoded,
            FindingCategory::Informational => self.informational,
        }
    }
}

/// How one tool's run ended, for the report's status table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolRun {
    pub tool: String,
    pub outcome: InvocationOutcome,
    pub note: Option<String>,
}

/// Complete analysis report
///
/// Built fresh per analysis and never persisted as cross-run state; export
/// is a one-shot serialization for the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub tool_runs: Vec<ToolRun>,
    pub findings: Vec<Finding>,
    pub counts: CategoryCounts,
}

impl Report {
    /// Create a new empty report
    pub fn new(metadata: ReportMetadata) -> Self {
        Self {
            metadata,
            tool_runs: Vec::new(),
            findings: Vec::new(),
            counts: CategoryCounts::default(),
        }
    }

    /// Append findings, keeping arrival order and counts in sync
    pub fn add_findings(&mut self, findings: impl IntoIterator<Item = Finding>) {
        for finding in findings {
            match finding.category {
                FindingCategory::Flag => self.counts.flags += 1,
                FindingCategory::Interesting => self.counts.interesting += 1,
                FindingCategory::Encoded => self.counts.encoded += 1,
                FindingCategory::Informational => self.counts.informational += 1,
            }
            self.findings.push(finding);
        }
    }

    /// Record a tool run in the status table
    pub fn add_tool_run(&mut self, run: ToolRun) {
        self.tool_runs.push(run);
    }

    /// Findings of one category, in arrival order
    pub fn findings_in(&self, category: FindingCategory) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(move |f| f.category == category)
    }

    /// Mark the analysis finished
    pub fn finish(&mut self) {
        self.metadata.finished_at = Some(Utc::now());
    }
}
