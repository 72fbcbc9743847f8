//! Check Scenario use case
//!
//! A read-only preflight: reports, for each phase, whether its tool would be
//! launched. It never gates `scenario run`, which attempts every phase
//! regardless.

use redteam_domain::{Catalog, DomainError};
use std::path::PathBuf;
use std::sync::Arc;

/// Whether a phase's tool is ready to launch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    Ready { path: PathBuf },
    NotInstalled { install_hint: String },
    UnknownTool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseReadiness {
    /// 1-based phase number
    pub number: usize,
    pub tool: String,
    pub readiness: Readiness,
}

/// Preflight result for one scenario
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioCheck {
    pub scenario: String,
    /// Declared prechecks, listed for information only
    pub prechecks: Vec<String>,
    pub phases: Vec<PhaseReadiness>,
}

impl ScenarioCheck {
    pub fn is_ready(&self) -> bool {
        self.phases
            .iter()
            .all(|p| matches!(p.readiness, Readiness::Ready { .. }))
    }

    /// Tool names that would be skipped, without duplicates, in phase order
    pub fn missing_tools(&self) -> Vec<&str> {
        let mut missing: Vec<&str> = Vec::new();
        for phase in &self.phases {
            if !matches!(phase.readiness, Readiness::Ready { .. })
                && !missing.contains(&phase.tool.as_str())
            {
                missing.push(&phase.tool);
            }
        }
        missing
    }
}

/// Use case for checking a scenario's tools without running anything
pub struct CheckScenarioUseCase {
    catalog: Arc<Catalog>,
}

impl CheckScenarioUseCase {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn execute(&self, name: &str) -> Result<ScenarioCheck, DomainError> {
        let scenario = self
            .catalog
            .scenario(name)
            .ok_or_else(|| DomainError::ScenarioNotFound(name.to_string()))?;

        let phases = scenario
            .phases
            .iter()
            .enumerate()
            .map(|(index, phase)| {
                let readiness = match self.catalog.tool(&phase.tool) {
                    None => Readiness::UnknownTool,
                    Some(tool) => match tool.path() {
                        Some(path) => Readiness::Ready {
                            path: path.to_path_buf(),
                        },
                        None => Readiness::NotInstalled {
                            install_hint: tool.install.clone(),
                        },
                    },
                };
                PhaseReadiness {
                    number: index + 1,
                    tool: phase.tool.clone(),
                    readiness,
                }
            })
            .collect();

        Ok(ScenarioCheck {
            scenario: scenario.name.clone(),
            prechecks: scenario.prechecks.clone(),
            phases,
        })
    }
}
