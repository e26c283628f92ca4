//! `file` wrapper: file type identification

use std::path::Path;

use super::ToolOutput;
use crate::tools::Invoker;

/// Identify the target's file type via `file -b`, with its on-disk size
pub async fn run(invoker: &Invoker, target: &Path) -> ToolOutput {
    let args = vec!["-b".to_string(), target.display().to_string()];
    let result = invoker.invoke("file", target, &args).await;

    if !result.is_success() {
        return ToolOutput::from_failure(&result, invoker.registry().get("file"));
    }

    let size = tokio::fs::metadata(target).await.map(|m| m.len()).ok();

    ToolOutput {
        tool: result.tool.clone(),
        outcome: result.outcome,
        text: describe(&result.stdout, size),
        note: None,
    }
}

/// Render the `file -b` output with the target's size
fn describe(stdout: &str, size: Option<u64>) -> String {
    let file_type = stdout.trim();
    match size {
        Some(size) => format!("file type: {}\nsize: {} bytes", file_type, size),
        None => format!("file type: {}", file_type),
    }
}
