//! Edit Scenarios use case
//!
//! Creates scenarios and appends phases to them. Edits are applied to the
//! persisted list, so they take effect on the next run; the catalog of the
//! current run is never mutated.

use crate::ports::scenario_repository::{RepositoryError, ScenarioRepository};
use redteam_domain::{Catalog, DomainError, Phase, Scenario};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum EditScenarioError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Use case for editing the user's saved scenarios
pub struct EditScenariosUseCase<S: ScenarioRepository + ?Sized> {
    repo: Arc<S>,
    catalog: Arc<Catalog>,
}

impl<S: ScenarioRepository + ?Sized> EditScenariosUseCase<S> {
    pub fn new(repo: Arc<S>, catalog: Arc<Catalog>) -> Self {
        Self { repo, catalog }
    }

    /// Create an empty scenario. Names are unique and compared exactly.
    pub fn create(&self, name: &str) -> Result<Scenario, EditScenarioError> {
        let scenario = Scenario::named(name)?;
        let mut scenarios = self.repo.load()?;

        if scenarios.iter().any(|s| s.name == scenario.name) {
            return Err(DomainError::ScenarioExists(scenario.name).into());
        }

        scenarios.push(scenario.clone());
        self.repo.save(&scenarios)?;
        info!("Created scenario {}", scenario.name);
        Ok(scenario)
    }

    /// Append a phase and return the scenario's new phase count.
    ///
    /// The tool must be in the catalog; the phase stores the catalog's
    /// spelling of its name. It does not need to be installed.
    pub fn add_phase(
        &self,
        scenario: &str,
        tool: &str,
        args: &str,
    ) -> Result<usize, EditScenarioError> {
        let tool = self
            .catalog
            .tool(tool)
            .ok_or_else(|| DomainError::ToolNotFound(tool.to_string()))?;

        let mut scenarios = self.repo.load()?;
        let target = scenarios
            .iter_mut()
            .find(|s| s.name == scenario)
            .ok_or_else(|| DomainError::ScenarioNotFound(scenario.to_string()))?;

        target.push_phase(Phase::new(tool.name.clone(), args));
        let count = target.phase_count();

        self.repo.save(&scenarios)?;
        info!("Added {} to scenario {} (phase {})", tool.name, scenario, count);
        Ok(count)
    }
}
