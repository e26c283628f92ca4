//! External command invocation with timeout and typed outcomes

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tracing::{debug, warn};

use super::registry::{ToolRegistry, ToolSpec, ToolStatus};

/// How a single invocation ended
///
/// `NotFound` and `TimedOut` are recoverable: callers turn them into
/// user-facing status lines and move on to the next tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvocationOutcome {
    /// Command ran and exited zero
    Success,
    /// Binary is not installed on this host
    NotFound,
    /// Wall-clock timeout exceeded; the process was killed
    TimedOut,
    /// Command rejected before execution, or the OS denied it
    PermissionDenied,
    /// Command ran but exited non-zero
    NonZeroExit,
    /// Target file does not exist; no process was spawned
    FileNotFound,
    /// Output was not valid UTF-8 text
    DecodeFailure,
}

impl std::fmt::Display for InvocationOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::NotFound => write!(f, "not installed"),
            Self::TimedOut => write!(f, "timed out"),
            Self::PermissionDenied => write!(f, "permission denied"),
            Self::NonZeroExit => write!(f, "non-zero exit"),
            Self::FileNotFound => write!(f, "file not found"),
            Self::DecodeFailure => write!(f, "undecodable output"),
        }
    }
}

/// Captured result of one tool invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationResult {
    pub tool: String,
    pub outcome: InvocationOutcome,
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl InvocationResult {
    fn aborted(tool: &str, outcome: InvocationOutcome, detail: impl Into<String>) -> Self {
        Self {
            tool: tool.to_string(),
            outcome,
            exit_code: None,
            stdout: String::new(),
            stderr: detail.into(),
        }
    }

    /// Combined stdout and stderr
    pub fn output(&self) -> String {
        if self.stderr.is_empty() {
            self.stdout.clone()
        } else if self.stdout.is_empty() {
            self.stderr.clone()
        } else {
            format!("{}\n{}", self.stdout, self.stderr)
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == InvocationOutcome::Success
    }
}

/// Runs allow-listed commands against a target file
///
/// Stateless apart from its registry and default timeout; every invocation
/// is independent and never retried.
pub struct Invoker {
    registry: ToolRegistry,
    default_timeout: Duration,
}

impl Invoker {
    pub fn new(registry: ToolRegistry, default_timeout: Duration) -> Self {
        Self {
            registry,
            default_timeout,
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    fn timeout_for(&self, spec: &ToolSpec) -> Duration {
        spec.timeout_secs
            .map_or(self.default_timeout, Duration::from_secs)
    }

    /// Invoke an allow-listed tool against a target file
    ///
    /// Total: every failure mode is reported as an [`InvocationOutcome`],
    /// never as an error. The allow-list and target checks run before any
    /// process is spawned.
    pub async fn invoke(&self, tool_name: &str, target: &Path, args: &[String]) -> InvocationResult {
        let Some(spec) = self.registry.get(tool_name) else {
            warn!(tool = tool_name, "rejected: command not on the allow-list");
            return InvocationResult::aborted(
                tool_name,
                InvocationOutcome::PermissionDenied,
                format!("'{}' is not on the allow-list", tool_name),
            );
        };

        if tokio::fs::metadata(target).await.is_err() {
            return InvocationResult::aborted(
                tool_name,
                InvocationOutcome::FileNotFound,
                format!("file not found: {}", target.display()),
            );
        }

        let timeout = self.timeout_for(spec);
        debug!(tool = %spec.name, ?timeout, target = %target.display(), "invoking");

        let child = Command::new(&spec.command)
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = match tokio::time::timeout(timeout, child).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                let outcome = match e.kind() {
                    std::io::ErrorKind::NotFound => InvocationOutcome::NotFound,
                    std::io::ErrorKind::PermissionDenied => InvocationOutcome::PermissionDenied,
                    _ => InvocationOutcome::NonZeroExit,
                };
                return InvocationResult::aborted(tool_name, outcome, e.to_string());
            }
            Err(_) => {
                warn!(tool = %spec.name, ?timeout, "killed after timeout");
                return InvocationResult::aborted(
                    tool_name,
                    InvocationOutcome::TimedOut,
                    format!("exceeded {}s timeout", timeout.as_secs()),
                );
            }
        };

        let (stdout, stdout_ok) = decode(&output.stdout);
        let (stderr, _) = decode(&output.stderr);

        let outcome = if !stdout_ok {
            InvocationOutcome::DecodeFailure
        } else if output.status.success() {
            InvocationOutcome::Success
        } else {
            InvocationOutcome::NonZeroExit
        };

        InvocationResult {
            tool: tool_name.to_string(),
            outcome,
            exit_code: output.status.code(),
            stdout,
            stderr,
        }
    }

    /// Check whether a tool is installed by probing `--version`
    ///
    /// Any completed run counts as installed, even a non-zero exit; only a
    /// missing binary or a hung probe counts as missing.
    pub async fn probe(&self, spec: &ToolSpec, probe_timeout: Duration) -> ToolStatus {
        let child = Command::new(&spec.command)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status();

        match tokio::time::timeout(probe_timeout, child).await {
            Ok(Ok(_)) => ToolStatus::Ready,
            _ => ToolStatus::Missing,
        }
    }

    /// Probe every registered tool, in registry order
    pub async fn probe_all(&self, probe_timeout: Duration) -> Vec<(String, ToolStatus)> {
        let mut statuses = Vec::with_capacity(self.registry.all().len());
        for spec in self.registry.all() {
            let status = self.probe(spec, probe_timeout).await;
            statuses.push((spec.name.clone(), status));
        }
        statuses
    }
}

/// Decode process output, falling back to lossy text when not UTF-8
fn decode(bytes: &[u8]) -> (String, bool) {
    match std::str::from_utf8(bytes) {
        Ok(s) => (s.to_string(), true),
        Err(_) => (String::from_utf8_lossy(bytes).into_owned(), false),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use std::io::Write;

    fn test_invoker() -> Invoker {
        let mut registry = ToolRegistry::empty();
        registry.register(ToolSpec::new("echo", "echo"));
        registry.register(ToolSpec::new("sh", "sh"));
        registry.register(ToolSpec::new("sleep", "sleep").with_timeout_secs(1));
        registry.register(ToolSpec::new("no-such-binary", "stegscan-no-such-binary"));
        Invoker::new(registry, Duration::from_secs(5))
    }

    fn temp_target() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("should create temp file");
        writeln!(file, "content").expect("should write");
        file
    }

    #[tokio::test]
    async fn test_rejects_command_not_on_allow_list() {
        let invoker = test_invoker();
        let target = temp_target();

        let result = invoker.invoke("rm", target.path(), &[]).await;

        assert_eq!(result.outcome, InvocationOutcome::PermissionDenied);
        assert!(result.stderr.contains("allow-list"));
        assert!(result.exit_code.is_none());
    }

    #[tokio::test]
    async fn test_missing_target_short_circuits() {
        let invoker = test_invoker();

        let result = invoker
            .invoke("echo", Path::new("/no/such/file"), &[])
            .await;

        assert_eq!(result.outcome, InvocationOutcome::FileNotFound);
        assert!(result.exit_code.is_none());
    }

    #[tokio::test]
    async fn test_successful_invocation_captures_stdout() {
        let invoker = test_invoker();
        let target = temp_target();

        let result = invoker
            .invoke("echo", target.path(), &["hello".to_string()])
            .await;

        assert_eq!(result.outcome, InvocationOutcome::Success);
        assert_eq!(result.exit_code, Some(0));
        assert!(result.stdout.contains("hello"));
    }

    #[tokio::test]
    async fn test_missing_binary_maps_to_not_found() {
        let invoker = test_invoker();
        let target = temp_target();

        let result = invoker.invoke("no-such-binary", target.path(), &[]).await;

        assert_eq!(result.outcome, InvocationOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_non_zero_exit_carries_stderr() {
        let invoker = test_invoker();
        let target = temp_target();
        let args = vec!["-c".to_string(), "echo oops >&2; exit 3".to_string()];

        let result = invoker.invoke("sh", target.path(), &args).await;

        assert_eq!(result.outcome, InvocationOutcome::NonZeroExit);
        assert_eq!(result.exit_code, Some(3));
        assert!(result.stderr.contains("oops"));
    }

    #[tokio::test]
    async fn test_timeout_kills_process() {
        let invoker = test_invoker();
        let target = temp_target();

        let result = invoker
            .invoke("sleep", target.path(), &["30".to_string()])
            .await;

        assert_eq!(result.outcome, InvocationOutcome::TimedOut);
        assert!(result.stderr.contains("timeout"));
    }

    #[tokio::test]
    async fn test_non_utf8_output_is_decode_failure() {
        let invoker = test_invoker();
        let target = temp_target();
        let args = vec!["-c".to_string(), r"printf '\377\376'".to_string()];

        let result = invoker.invoke("sh", target.path(), &args).await;

        assert_eq!(result.outcome, InvocationOutcome::DecodeFailure);
        // Lossy text is still attached for context
        assert!(!result.stdout.is_empty());
    }

    #[tokio::test]
    async fn test_probe_reports_missing_binary() {
        let invoker = test_invoker();
        let registry = invoker.registry();

        let missing = registry.get("no-such-binary").unwrap();
        let status = invoker.probe(missing, Duration::from_secs(2)).await;
        assert_eq!(status, ToolStatus::Missing);

        let present = registry.get("sh").unwrap();
        let status = invoker.probe(present, Duration::from_secs(5)).await;
        assert_eq!(status, ToolStatus::Ready);
    }

    #[test]
    fn test_combined_output() {
        let result = InvocationResult {
            tool: "file".to_string(),
            outcome: InvocationOutcome::Success,
            exit_code: Some(0),
            stdout: "out".to_string(),
            stderr: "err".to_string(),
        };
        assert_eq!(result.output(), "out\nerr");
    }
}
