//! Tool domain entities

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// An external executable the orchestrator can launch.
///
/// The serialized fields mirror a tool catalog record. The resolved path is
/// runtime state: it is filled in once by tool discovery and never written
/// back to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool {
    /// Unique name, matched case-insensitively (e.g., "Nmap")
    pub name: String,
    /// Base command name. Kept for catalog compatibility; launching only
    /// ever uses the resolved path from `paths`.
    #[serde(default)]
    pub command: String,
    /// Argument template used by `tool run` (e.g., "-sV -T4 {target}")
    #[serde(default)]
    pub args: String,
    /// Installation hint shown when the tool is missing (usually a URL)
    #[serde(default)]
    pub install: String,
    /// Candidate executable names or paths, probed in order
    #[serde(default)]
    pub paths: Vec<String>,
    /// Optional grouping used when listing tools (e.g., "Reconnaissance")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip)]
    resolved_path: Option<PathBuf>,
}

impl Tool {
    pub fn new(name: impl Into<String>, args: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: String::new(),
            args: args.into(),
            install: String::new(),
            paths: Vec::new(),
            category: None,
            resolved_path: None,
        }
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    pub fn with_install_hint(mut self, hint: impl Into<String>) -> Self {
        self.install = hint.into();
        self
    }

    pub fn with_probe(mut self, probe: impl Into<String>) -> Self {
        self.paths.push(probe.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Mark the tool as installed at the given executable path.
    pub fn installed_at(mut self, path: impl Into<PathBuf>) -> Self {
        self.resolved_path = Some(path.into());
        self
    }

    /// Resolve the executable by trying each probe in order.
    ///
    /// The first probe for which `lookup` returns a path wins. A tool with no
    /// matching probe ends up not installed, even if it was before.
    pub fn resolve_with<F>(mut self, mut lookup: F) -> Self
    where
        F: FnMut(&str) -> Option<PathBuf>,
    {
        self.resolved_path = self.paths.iter().find_map(|probe| lookup(probe));
        self
    }

    pub fn is_installed(&self) -> bool {
        self.resolved_path.is_some()
    }

    pub fn path(&self) -> Option<&Path> {
        self.resolved_path.as_deref()
    }

    /// Case-insensitive name comparison used for every tool lookup.
    pub fn matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}
