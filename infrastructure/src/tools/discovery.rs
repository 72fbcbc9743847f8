//! Tool discovery
//!
//! Each tool lists candidate executables in `paths`, e.g.
//! `["msfconsole", "/opt/metasploit-framework/bin/msfconsole"]`. The first
//! probe that resolves to an executable becomes the tool's path; a tool with
//! no resolving probe is marked not installed.
//!
//! ```text
//! $ rtcli list tools
//!
//! Available Tools:
//!   Nmap            ✓ [recon]
//!   Metasploit      ✗ [exploitation]
//! ```

use redteam_domain::Tool;
use std::path::PathBuf;
use tracing::{debug, info};

/// Result of tool discovery
#[derive(Debug, Clone, Default)]
pub struct DiscoveryResult {
    /// All tools, in catalog order, with their resolved paths filled in
    pub tools: Vec<Tool>,
    /// Names of tools with no resolving probe
    pub missing: Vec<String>,
}

impl DiscoveryResult {
    pub fn installed_count(&self) -> usize {
        self.tools.len() - self.missing.len()
    }

    /// One-line summary for logs
    pub fn format_summary(&self) -> String {
        if self.missing.is_empty() {
            return format!("{} tools, all installed", self.tools.len());
        }
        format!(
            "{} of {} tools installed (missing: {})",
            self.installed_count(),
            self.tools.len(),
            self.missing.join(", ")
        )
    }
}

/// Discover which catalog tools are installed.
pub fn discover_tools(tools: Vec<Tool>) -> DiscoveryResult {
    let mut result = DiscoveryResult::default();

    for tool in tools {
        let tool = tool.resolve_with(resolve_executable);
        match tool.path() {
            Some(path) => debug!("{} found at {}", tool.name, path.display()),
            None => {
                debug!("{} not found (probes: {:?})", tool.name, tool.paths);
                result.missing.push(tool.name.clone());
            }
        }
        result.tools.push(tool);
    }

    info!("Tool discovery: {}", result.format_summary());
    result
}

/// Resolve one probe: a bare name is searched on `PATH`, a path is checked
/// directly.
fn resolve_executable(probe: &str) -> Option<PathBuf> {
    which::which(probe).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_resolving_probe_wins() {
        let tool = Tool::new("shell", "")
            .with_probe("definitely_not_a_command_123xyz")
            .with_probe("sh")
            .with_probe("/bin/sh");

        let result = discover_tools(vec![tool]);

        assert!(result.missing.is_empty());
        let path = result.tools[0].path().unwrap();
        assert!(path.ends_with("sh"));
        assert!(path.is_absolute());
    }

    #[test]
    fn test_tool_without_resolving_probe_is_missing() {
        let tools = vec![
            Tool::new("ghost", "").with_probe("definitely_not_a_command_123xyz"),
            Tool::new("no-probes", ""),
            Tool::new("shell", "").with_probe("sh"),
        ];

        let result = discover_tools(tools);

        assert_eq!(result.missing, vec!["ghost", "no-probes"]);
        assert_eq!(result.installed_count(), 1);
        assert!(!result.tools[0].is_installed());
        assert!(result.format_summary().contains("missing: ghost, no-probes"));
    }

    #[cfg(unix)]
    #[test]
    fn test_absolute_probe() {
        assert!(resolve_executable("/bin/sh").is_some());
        assert!(resolve_executable("/nonexistent/bin/tool").is_none());
    }

    #[test]
    fn test_summary_all_installed() {
        let result = DiscoveryResult {
            tools: vec![Tool::new("a", "").installed_at("/bin/a")],
            missing: vec![],
        };
        assert_eq!(result.format_summary(), "1 tools, all installed");
    }
}
