//! `binwalk` wrapper: embedded file scanning
//!
//! Runs in scan mode only (no `-e`), so the wrapper has no extraction side
//! effects; the report carries the extraction hint instead.

use std::path::Path;

use super::ToolOutput;
use crate::tools::Invoker;

/// Scan for embedded file signatures
pub async fn run(invoker: &Invoker, target: &Path) -> ToolOutput {
    let args = vec![target.display().to_string()];
    let result = invoker.invoke("binwalk", target, &args).await;

    if !result.is_success() {
        return ToolOutput::from_failure(&result, invoker.registry().get("binwalk"));
    }

    let items = signature_lines(&result.stdout);
    let note = if items.is_empty() {
        "no embedded files detected".to_string()
    } else {
        format!(
            "{} embedded items found (run binwalk -e to extract)",
            items.len()
        )
    };

    ToolOutput {
        tool: result.tool.clone(),
        outcome: result.outcome,
        text: items.join("\n"),
        note: Some(note),
    }
}

/// Strip binwalk's table header and separators, keeping signature rows
fn signature_lines(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| {
            !line.is_empty() && !line.starts_with("DECIMAL") && !line.starts_with('-')
        })
        .map(String::from)
        .collect()
}
