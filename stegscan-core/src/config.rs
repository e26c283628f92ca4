//! Configuration types for stegscan analyses
//!
//! Every heuristic the classifier and the tool wrappers rely on (flag
//! markers, keyword lists, the encoded-length threshold, display caps,
//! timeouts) lives here so callers and tests can inject fixtures instead of
//! depending on module-level constants.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Line classification heuristics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Case-sensitive flag-marker prefixes (each ends at the opening brace)
    #[serde(default = "default_flag_markers")]
    pub flag_markers: Vec<String>,
    /// Case-insensitive keywords that mark a line as interesting
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
    /// A line longer than this, drawn entirely from the encoded alphabet,
    /// is classified as encoded
    #[serde(default = "default_encoded_min_len")]
    pub encoded_min_len: usize,
}

fn default_flag_markers() -> Vec<String> {
    ["CTF{", "FLAG{", "flag{"].map(String::from).to_vec()
}

fn default_keywords() -> Vec<String> {
    [
        "password",
        "secret",
        "key",
        "hidden",
        "comment",
        "description",
        "copyright",
        "author",
    ]
    .map(String::from)
    .to_vec()
}

fn default_encoded_min_len() -> usize {
    40
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            flag_markers: default_flag_markers(),
            keywords: default_keywords(),
            encoded_min_len: default_encoded_min_len(),
        }
    }
}

/// Per-category display caps for report rendering
///
/// Flags are exempt: they are the goal and are always shown in full.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DisplayCaps {
    #[serde(default = "default_max_interesting")]
    pub interesting: usize,
    #[serde(default = "default_max_encoded")]
    pub encoded: usize,
    #[serde(default = "default_max_informational")]
    pub informational: usize,
}

fn default_max_interesting() -> usize {
    10
}

fn default_max_encoded() -> usize {
    5
}

fn default_max_informational() -> usize {
    10
}

impl Default for DisplayCaps {
    fn default() -> Self {
        Self {
            interesting: default_max_interesting(),
            encoded: default_max_encoded(),
            informational: default_max_informational(),
        }
    }
}

/// External tool invocation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Wall-clock timeout for a single tool run, in seconds
    #[serde(default = "default_tool_timeout_secs")]
    pub timeout_secs: u64,
    /// Timeout for the `--version` installed-check probe, in seconds
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,
    /// Minimum printable-string length passed to `strings -n`
    #[serde(default = "default_strings_min_len")]
    pub strings_min_len: u32,
    /// Passphrase handed to steghide; empty tries passwordless extraction
    #[serde(default)]
    pub steghide_password: String,
}

fn default_tool_timeout_secs() -> u64 {
    30
}

fn default_probe_timeout_secs() -> u64 {
    5
}

fn default_strings_min_len() -> u32 {
    6
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_tool_timeout_secs(),
            probe_timeout_secs: default_probe_timeout_secs(),
            strings_min_len: default_strings_min_len(),
            steghide_password: String::new(),
        }
    }
}

impl ToolsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}

/// Report export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_report_dir")]
    pub report_dir: PathBuf,
    #[serde(default)]
    pub export_json: bool,
    #[serde(default)]
    pub export_markdown: bool,
}

fn default_report_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".stegscan")
        .join("reports")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_dir: default_report_dir(),
            export_json: false,
            export_markdown: false,
        }
    }
}

/// Complete analysis configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub caps: DisplayCaps,
    #[serde(default)]
    pub tools: ToolsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl AnalysisConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> crate::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from default locations with cascade:
    /// 1. ./stegscan.toml (local override)
    /// 2. ~/.stegscan/config.toml (global defaults)
    /// 3. Built-in defaults
    pub fn load_default() -> Self {
        if let Ok(config) = Self::from_file("stegscan.toml") {
            return config;
        }

        if let Some(home) = dirs::home_dir() {
            let global_path = home.join(".stegscan").join("config.toml");
            if let Ok(config) = Self::from_file(&global_path) {
                return config;
            }
        }

        Self::default()
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".stegscan").join("config.toml"))
    }
}
