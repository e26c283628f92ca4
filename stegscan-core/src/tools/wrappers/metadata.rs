//! `exiftool` wrapper: metadata extraction

use std::path::Path;

use super::ToolOutput;
use crate::tools::Invoker;

/// Dump all metadata fields with `exiftool`
///
/// The raw field lines go straight to the classifier: flag markers and
/// keyword fields (comment, author, copyright, ...) are picked up there.
pub async fn run(invoker: &Invoker, target: &Path) -> ToolOutput {
    let args = vec![target.display().to_string()];
    let result = invoker.invoke("exiftool", target, &args).await;

    if !result.is_success() {
        return ToolOutput::from_failure(&result, invoker.registry().get("exiftool"));
    }

    let field_count = result.stdout.lines().filter(|l| l.contains(": ")).count();

    ToolOutput {
        tool: result.tool.clone(),
        outcome: result.outcome,
        text: result.stdout,
        note: Some(format!("{} metadata fields read", field_count)),
    }
}
