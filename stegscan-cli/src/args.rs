//! CLI argument parsing

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "stegscan")]
#[command(author, version, about = "Forensic tool pipeline for steganography challenges")]
pub struct Args {
    /// Target file to analyze
    pub file: PathBuf,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Steghide passphrase to try (defaults to passwordless extraction)
    #[arg(long)]
    pub password: Option<String>,

    /// Per-tool timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Export the report as JSON into the report directory
    #[arg(long)]
    pub json: bool,

    /// Export the report as Markdown into the report directory
    #[arg(long)]
    pub markdown: bool,

    /// Skip the pre-flight tool availability check
    #[arg(long)]
    pub no_preflight: bool,

    /// Verbose output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
