//! `steghide` wrapper: steganographic payload extraction
//!
//! steghide writes its payload to a separate output file. That file is a
//! side channel this wrapper owns: it is created under the system temp
//! directory with a unique name and removed on every exit path, so repeated
//! analysis of the same input leaves no residue.

use std::path::{Path, PathBuf};

use tracing::debug;
use uuid::Uuid;

use super::ToolOutput;
use crate::tools::invoker::InvocationResult;
use crate::tools::Invoker;

/// Removes the extraction file when dropped, whichever way the run ended
struct ExtractGuard {
    path: PathBuf,
}

impl Drop for ExtractGuard {
    fn drop(&mut self) {
        if std::fs::remove_file(&self.path).is_ok() {
            debug!(path = %self.path.display(), "removed extraction file");
        }
    }
}

/// Attempt extraction with the given passphrase (empty tries passwordless)
pub async fn run(invoker: &Invoker, target: &Path, password: &str) -> ToolOutput {
    let out_path = std::env::temp_dir().join(format!("stegscan-{}.extracted", Uuid::new_v4()));
    let _guard = ExtractGuard {
        path: out_path.clone(),
    };

    let args = vec![
        "extract".to_string(),
        "-sf".to_string(),
        target.display().to_string(),
        "-xf".to_string(),
        out_path.display().to_string(),
        "-p".to_string(),
        password.to_string(),
        "-f".to_string(),
    ];
    let result = invoker.invoke("steghide", target, &args).await;

    let payload = if result.is_success() {
        tokio::fs::read(&out_path).await.ok()
    } else {
        None
    };

    interpret(&result, payload.as_deref(), invoker)
}

/// Turn the invocation plus any extracted payload into wrapper output
fn interpret(result: &InvocationResult, payload: Option<&[u8]>, invoker: &Invoker) -> ToolOutput {
    if let Some(payload) = payload {
        return match std::str::from_utf8(payload) {
            Ok(text) => ToolOutput {
                tool: result.tool.clone(),
                outcome: result.outcome,
                text: text.to_string(),
                note: Some(format!("{} byte payload extracted", payload.len())),
            },
            Err(_) => ToolOutput {
                tool: result.tool.clone(),
                outcome: result.outcome,
                text: String::new(),
                note: Some(format!(
                    "{} byte binary payload extracted (not text; inspect manually)",
                    payload.len()
                )),
            },
        };
    }

    // "could not extract" is steghide's normal answer for a clean file
    if result.stderr.to_lowercase().contains("could not extract") {
        return ToolOutput {
            tool: result.tool.clone(),
            outcome: result.outcome,
            text: String::new(),
            note: Some("no steghide payload found".to_string()),
        };
    }

    ToolOutput::from_failure(result, invoker.registry().get("steghide"))
}
