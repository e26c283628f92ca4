//! Analysis execution runner

use anyhow::{bail, Context, Result};
use stegscan_core::config::AnalysisConfig;
use tracing::info;
use stegscan_core::pipeline::Pipeline;
use stegscan_core::report::{export_json, export_markdown, render_markdown, Report};
use stegscan_core::tools::{Invoker, ToolRegistry, ToolStatus};

use crate::args::Args;

/// Run one analysis end to end: config, pre-flight, pipeline, report
pub async fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => AnalysisConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => AnalysisConfig::load_default(),
    };

    if let Some(password) = &args.password {
        config.tools.steghide_password = password.clone();
    }
    if let Some(timeout) = args.timeout {
        config.tools.timeout_secs = timeout;
    }
    if args.json {
        config.output.export_json = true;
    }
    if args.markdown {
        config.output.export_markdown = true;
    }

    if !args.file.exists() {
        bail!("file not found: {}", args.file.display());
    }

    let invoker = Invoker::new(ToolRegistry::new(), config.tools.timeout());

    if !args.no_preflight {
        print_preflight(&invoker, &config).await;
    }

    let report = Pipeline::standard()
        .run(&invoker, &config, &args.file)
        .await;
    info!(
        flags = report.counts.flags,
        total = report.counts.total(),
        "analysis finished"
    );

    println!("{}", render_markdown(&report, &config.caps));

    export(&report, &config)?;

    Ok(())
}

/// Print the tool availability table before the analysis starts
async fn print_preflight(invoker: &Invoker, config: &AnalysisConfig) {
    println!("Tool status:");
    let statuses = invoker.probe_all(config.tools.probe_timeout()).await;
    for (name, status) in statuses {
        match status {
            ToolStatus::Ready => println!("  {:<10} ready", name),
            ToolStatus::Missing => {
                let hint = invoker
                    .registry()
                    .get(&name)
                    .map(|spec| spec.install_hint.clone())
                    .unwrap_or_default();
                println!("  {:<10} missing ({})", name, hint);
            }
        }
    }
    println!();
}

/// Write the configured report exports
fn export(report: &Report, config: &AnalysisConfig) -> Result<()> {
    if !config.output.export_json && !config.output.export_markdown {
        return Ok(());
    }

    std::fs::create_dir_all(&config.output.report_dir).with_context(|| {
        format!(
            "failed to create report dir {}",
            config.output.report_dir.display()
        )
    })?;

    let stem = format!("stegscan-{}", report.metadata.analysis_id);

    if config.output.export_json {
        let path = config.output.report_dir.join(format!("{}.json", stem));
        export_json(report, &path)?;
        println!("JSON report written to {}", path.display());
    }

    if config.output.export_markdown {
        let path = config.output.report_dir.join(format!("{}.md", stem));
        export_markdown(report, &config.caps, &path)?;
        println!("Markdown report written to {}", path.display());
    }

    Ok(())
}
