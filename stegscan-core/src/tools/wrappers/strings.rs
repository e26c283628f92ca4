//! `strings` wrapper: printable string extraction

use std::path::Path;

use super::ToolOutput;
use crate::tools::Invoker;

/// Extract printable strings of at least `min_len` characters
pub async fn run(invoker: &Invoker, target: &Path, min_len: u32) -> ToolOutput {
    let args = vec![
        "-n".to_string(),
        min_len.to_string(),
        target.display().to_string(),
    ];
    let result = invoker.invoke("strings", target, &args).await;

    if !result.is_success() {
        return ToolOutput::from_failure(&result, invoker.registry().get("strings"));
    }

    let count = result.stdout.lines().count();

    ToolOutput {
        tool: result.tool.clone(),
        outcome: result.outcome,
        text: result.stdout,
        note: Some(format!("{} strings extracted (min length {})", count, min_len)),
    }
}
