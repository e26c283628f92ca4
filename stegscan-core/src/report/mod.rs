//! Report assembly and rendering

pub mod models;
pub mod render;

pub use models::{CategoryCounts, Report, ReportMetadata, ToolRun};
pub use render::{export_json, export_markdown, render_markdown};
