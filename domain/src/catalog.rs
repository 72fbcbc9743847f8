//! The immutable tool and scenario catalog a run works against

use crate::scenario::entities::Scenario;
use crate::tool::{catalog::ToolCatalog, entities::Tool};

/// Tools and scenarios, frozen after startup.
///
/// Constructed explicitly by the binary (or by tests with synthetic data) and
/// shared by reference with every use case.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tools: ToolCatalog,
    scenarios: Vec<Scenario>,
}

impl Catalog {
    pub fn new(tools: Vec<Tool>, scenarios: Vec<Scenario>) -> Self {
        Self {
            tools: ToolCatalog::new(tools),
            scenarios,
        }
    }

    pub fn tools(&self) -> &ToolCatalog {
        &self.tools
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// Look up a tool by name, ignoring case.
    pub fn tool(&self, name: &str) -> Option<&Tool> {
        self.tools.find(name)
    }

    /// Look up a scenario by exact name.
    pub fn scenario(&self, name: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::entities::Phase;

    #[test]
    fn test_scenario_lookup_is_exact() {
        let catalog = Catalog::new(
            vec![],
            vec![Scenario::named("Recon")
                .unwrap()
                .with_phase(Phase::new("nmap", ""))],
        );
        assert!(catalog.scenario("Recon").is_some());
        assert!(catalog.scenario("recon").is_none());
    }

    #[test]
    fn test_tool_lookup_is_case_insensitive() {
        let catalog = Catalog::new(vec![Tool::new("Nmap", "")], vec![]);
        assert!(catalog.tool("nmap").is_some());
    }
}
