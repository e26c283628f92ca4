use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod args;
mod runner;

#[tokio::main]
async fn main() -> Result<()> {
    let parsed = args::Args::parse();

    // Initialize tracing; -v/-vv override RUST_LOG
    let filter = match parsed.verbose {
        0 => EnvFilter::from_default_env(),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    runner::run(parsed).await
}
