//! Read-only collection of tools

use super::entities::Tool;

/// The tools known to this run, in catalog order.
///
/// Built once after discovery and never mutated, so a `&Tool` handed out
/// here always reflects the installed state the run started with.
#[derive(Debug, Clone, Default)]
pub struct ToolCatalog {
    tools: Vec<Tool>,
}

impl ToolCatalog {
    pub fn new(tools: Vec<Tool>) -> Self {
        Self { tools }
    }

    /// Look up a tool by name, ignoring case. The first match wins.
    pub fn find(&self, name: &str) -> Option<&Tool> {
        self.tools.iter().find(|tool| tool.matches(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tool> {
        self.tools.iter()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn installed_count(&self) -> usize {
        self.tools.iter().filter(|t| t.is_installed()).count()
    }
}
