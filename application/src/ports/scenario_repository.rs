//! Scenario persistence port

use redteam_domain::Scenario;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("failed to load scenarios: {0}")]
    Load(String),

    #[error("failed to save scenarios: {0}")]
    Save(String),
}

/// Port for reading and writing the user's scenario list.
///
/// `save` replaces the whole list; anything else stored alongside the
/// scenarios must be preserved by the implementation.
pub trait ScenarioRepository: Send + Sync {
    fn load(&self) -> Result<Vec<Scenario>, RepositoryError>;

    fn save(&self, scenarios: &[Scenario]) -> Result<(), RepositoryError>;
}
