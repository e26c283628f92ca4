//! Report rendering and export
//!
//! Rendering is deterministic for a given finding sequence: run ids and
//! timestamps stay in the JSON export's metadata, never in the rendered
//! text, so re-running the same analysis yields byte-identical output.

use std::path::Path;

use crate::analysis::FindingCategory;
use crate::config::DisplayCaps;
use crate::Result;

use super::models::Report;

/// Render the bounded Markdown report
pub fn render_markdown(report: &Report, caps: &DisplayCaps) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", report.metadata.title));

    // Tool status table
    md.push_str("## Tool Status\n\n");
    if report.tool_runs.is_empty() {
        md.push_str("No tools were run.\n\n");
    } else {
        md.push_str("| Tool | Outcome | Note |\n|------|---------|------|\n");
        for run in &report.tool_runs {
            md.push_str(&format!(
                "| {} | {} | {} |\n",
                run.tool,
                run.outcome,
                run.note.as_deref().unwrap_or("-")
            ));
        }
        md.push('\n');
    }

    // Flags are the goal: always shown in full
    render_category(&mut md, report, FindingCategory::Flag, None);
    render_category(&mut md, report, FindingCategory::Interesting, Some(caps.interesting));
    render_category(&mut md, report, FindingCategory::Encoded, Some(caps.encoded));
    render_category(
        &mut md,
        report,
        FindingCategory::Informational,
        Some(caps.informational),
    );

    md
}

fn section_title(category: FindingCategory) -> &'static str {
    match category {
        FindingCategory::Flag => "Flags",
        FindingCategory::Interesting => "Interesting",
        FindingCategory::Encoded => "Encoded Candidates",
        FindingCategory::Informational => "Informational",
    }
}

fn render_category(md: &mut String, report: &Report, category: FindingCategory, cap: Option<usize>) {
    let total = report.counts.of(category);
    md.push_str(&format!("## {} ({})\n\n", section_title(category), total));

    if total == 0 {
        if category == FindingCategory::Flag {
            md.push_str("No flags found.\n\n");
        } else {
            md.push_str("None.\n\n");
        }
        return;
    }

    let shown = cap.map_or(total, |cap| cap.min(total));
    for finding in report.findings_in(category).take(shown) {
        md.push_str(&format!(
            "- `{}` ({})\n",
            finding.source_line, finding.source_tool
        ));
    }

    if shown < total {
        md.push_str(&format!("\n_{} more omitted_\n", total - shown));
    }
    md.push('\n');
}

/// Export report to pretty-printed JSON
pub fn export_json(report: &Report, path: impl AsRef<Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Export the rendered Markdown report
pub fn export_markdown(report: &Report, caps: &DisplayCaps, path: impl AsRef<Path>) -> Result<()> {
    std::fs::write(path, render_markdown(report, caps))?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::analysis::Finding;
    use crate::report::models::{ReportMetadata, ToolRun};
    use crate::tools::InvocationOutcome;

    fn sample_report() -> Report {
        let mut report = Report::new(ReportMetadata::new("sample.jpg"));
        report.add_tool_run(ToolRun {
            tool: "file".to_string(),
            outcome: InvocationOutcome::Success,
            note: None,
        });
        report.add_tool_run(ToolRun {
            tool: "steghide".to_string(),
            outcome: InvocationOutcome::NotFound,
            note: Some("steghide is not installed (try: sudo apt install steghide)".to_string()),
        });
        report.add_findings(vec![
            Finding::new(FindingCategory::Flag, "CTF{found_it}", "strings"),
            Finding::new(FindingCategory::Informational, "noise", "strings"),
        ]);
        report
    }

    #[test]
    fn test_flags_render_first_and_in_full() {
        let report = sample_report();
        let md = render_markdown(&report, &DisplayCaps::default());

        let flags_at = md.find("## Flags (1)").unwrap();
        let info_at = md.find("## Informational (1)").unwrap();
        assert!(flags_at < info_at);
        assert!(md.contains("- `CTF{found_it}` (strings)"));
    }

    #[test]
    fn test_tool_status_table() {
        let report = sample_report();
        let md = render_markdown(&report, &DisplayCaps::default());

        assert!(md.contains("| file | success | - |"));
        assert!(md.contains("| steghide | not installed |"));
        assert!(md.contains("sudo apt install steghide"));
    }

    #[test]
    fn test_omitted_count_matches_total_minus_cap() {
        let mut report = Report::new(ReportMetadata::new("sample.jpg"));
        report.add_findings(
            (0..14).map(|i| {
                Finding::new(FindingCategory::Informational, format!("line {}", i), "strings")
            }),
        );

        let caps = DisplayCaps {
            interesting: 10,
            encoded: 5,
            informational: 10,
        };
        let md = render_markdown(&report, &caps);

        assert!(md.contains("## Informational (14)"));
        assert!(md.contains("- `line 9` (strings)"));
        assert!(!md.contains("- `line 10` (strings)"));
        assert!(md.contains("_4 more omitted_"));
    }

    #[test]
    fn test_no_omitted_note_when_under_cap() {
        let report = sample_report();
        let md = render_markdown(&report, &DisplayCaps::default());
        assert!(!md.contains("omitted"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let report = sample_report();
        let caps = DisplayCaps::default();

        assert_eq!(
            render_markdown(&report, &caps),
            render_markdown(&report, &caps)
        );
    }

    #[test]
    fn test_empty_report_says_no_flags() {
        let report = Report::new(ReportMetadata::new("clean.png"));
        let md = render_markdown(&report, &DisplayCaps::default());

        assert!(md.contains("No tools were run."));
        assert!(md.contains("No flags found."));
    }

    #[test]
    fn test_export_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let report = sample_report();

        let json_path = dir.path().join("report.json");
        export_json(&report, &json_path).unwrap();
        let loaded: Report =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(loaded.counts, report.counts);

        let md_path = dir.path().join("report.md");
        export_markdown(&report, &DisplayCaps::default(), &md_path).unwrap();
        let md = std::fs::read_to_string(&md_path).unwrap();
        assert!(md.contains("# Analysis Report - sample.jpg"));
    }
}
