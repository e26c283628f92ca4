//! One wrapper per forensic tool
//!
//! Each wrapper owns its tool's argument shape and post-processing, and
//! degrades every failure into a status note so the surrounding analysis
//! keeps going.

pub mod binwalk;
pub mod file_type;
pub mod metadata;
pub mod steghide;
pub mod strings;

use serde::{Deserialize, Serialize};

use super::invoker::{InvocationOutcome, InvocationResult};
use super::registry::ToolSpec;

/// Normalized wrapper output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutput {
    pub tool: String,
    pub outcome: InvocationOutcome,
    /// Text handed to the classifier; empty when the tool produced nothing
    /// scannable
    pub text: String,
    /// Human-readable status when the run needs explaining
    pub note: Option<String>,
}

impl ToolOutput {
    /// Build the output for a run that never produced scannable text
    pub fn from_failure(result: &InvocationResult, spec: Option<&ToolSpec>) -> Self {
        Self {
            tool: result.tool.clone(),
            outcome: result.outcome,
            text: String::new(),
            note: Some(failure_note(result, spec)),
        }
    }
}

/// Describe a failed invocation for the report
fn failure_note(result: &InvocationResult, spec: Option<&ToolSpec>) -> String {
    match result.outcome {
        InvocationOutcome::NotFound => match spec {
            Some(spec) => format!(
                "{} is not installed (try: {})",
                result.tool, spec.install_hint
            ),
            None => format!("{} is not installed", result.tool),
        },
        InvocationOutcome::TimedOut => {
            format!("{} timed out and was killed", result.tool)
        }
        InvocationOutcome::PermissionDenied => {
            format!("{} was rejected: {}", result.tool, result.stderr.trim())
        }
        InvocationOutcome::FileNotFound => result.stderr.trim().to_string(),
        InvocationOutcome::DecodeFailure => {
            format!("{} produced non-text output", result.tool)
        }
        InvocationOutcome::NonZeroExit => format!(
            "{} exited with code {}: {}",
            result.tool,
            result.exit_code.unwrap_or(-1),
            result.stderr.trim()
        ),
        InvocationOutcome::Success => String::new(),
    }
}
