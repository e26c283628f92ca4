//! Error types for stegscan-core

use miette::Diagnostic;
use thiserror::Error;

/// Result type alias using stegscan Error
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for stegscan
///
/// Tool-level failures (missing binary, timeout, non-zero exit) are not
/// errors: they are typed invocation outcomes handled inside the analysis.
/// This enum covers the failures that stop an operation outright.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Configuration error: {0}")]
    #[diagnostic(code(stegscan::config))]
    Config(String),

    #[error("IO error: {0}")]
    #[diagnostic(code(stegscan::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(stegscan::serde))]
    Serde(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    #[diagnostic(code(stegscan::toml))]
    Toml(#[from] toml::de::Error),

    #[error("Tool error: {0}")]
    #[diagnostic(code(stegscan::tool))]
    Tool(String),

    #[error("Pipeline error: {0}")]
    #[diagnostic(code(stegscan::pipeline))]
    Pipeline(String),

    #[error("Report generation error: {0}")]
    #[diagnostic(code(stegscan::report))]
    Report(String),
}
