//! Allow-listed forensic tool definitions

use serde::{Deserialize, Serialize};

/// An allow-listed external command
///
/// Only commands registered here may ever be executed; user input reaches
/// them strictly as arguments, never as the command name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub command: String,
    pub description: String,
    /// Shell command that installs the tool, shown when it is missing
    pub install_hint: String,
    /// Per-tool wall-clock timeout override, in seconds
    pub timeout_secs: Option<u64>,
}

impl ToolSpec {
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            install_hint: format!("install {} manually", name),
            name,
            command: command.into(),
            description: String::new(),
            timeout_secs: None,
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    pub fn with_install_hint(mut self, hint: impl Into<String>) -> Self {
        self.install_hint = hint.into();
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
}

/// Availability of a registered tool on this host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolStatus {
    Ready,
    Missing,
}

impl std::fmt::Display for ToolStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToolStatus::Ready => write!(f, "ready"),
            ToolStatus::Missing => write!(f, "missing"),
        }
    }
}

/// Registry of allow-listed tools
pub struct ToolRegistry {
    tools: Vec<ToolSpec>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    /// Create a registry with the default forensic tool set
    pub fn new() -> Self {
        let tools = vec![
            ToolSpec::new("file", "file")
                .with_description("File type identification")
                .with_install_hint("sudo apt install file")
                .with_timeout_secs(10),
            ToolSpec::new("strings", "strings")
                .with_description("Printable string extraction")
                .with_install_hint("sudo apt install binutils"),
            ToolSpec::new("exiftool", "exiftool")
                .with_description("Metadata extraction")
                .with_install_hint("sudo apt install libimage-exiftool-perl"),
            ToolSpec::new("steghide", "steghide")
                .with_description("Steganographic payload extraction")
                .with_install_hint("sudo apt install steghide"),
            ToolSpec::new("binwalk", "binwalk")
                .with_description("Embedded file scanning")
                .with_install_hint("sudo apt install binwalk")
                .with_timeout_secs(60),
            ToolSpec::new("zsteg", "zsteg")
                .with_description("LSB steganography detection for PNG/BMP")
                .with_install_hint("gem install zsteg"),
            ToolSpec::new("foremost", "foremost")
                .with_description("File carving")
                .with_install_hint("sudo apt install foremost"),
        ];

        Self { tools }
    }

    /// Create an empty registry (tests inject their own specs)
    pub fn empty() -> Self {
        Self { tools: Vec::new() }
    }

    /// Register an additional tool
    pub fn register(&mut self, spec: ToolSpec) {
        self.tools.push(spec);
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&ToolSpec> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// Whether a command name is on the allow-list
    pub fn is_allowed(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Get all tools
    pub fn all(&self) -> &[ToolSpec] {
        &self.tools
    }
}
