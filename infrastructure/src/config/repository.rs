//! Scenario persistence in the user configuration file

use super::loader::ConfigLoader;
use redteam_application::ports::scenario_repository::{RepositoryError, ScenarioRepository};
use redteam_domain::Scenario;
use std::path::{Path, PathBuf};

/// Stores scenarios in the user configuration file.
///
/// Saving rewrites only the `scenarios` key; every other key in the file,
/// including ones this version does not know, is written back unchanged.
pub struct JsonScenarioRepository {
    path: PathBuf,
}

impl JsonScenarioRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScenarioRepository for JsonScenarioRepository {
    fn load(&self) -> Result<Vec<Scenario>, RepositoryError> {
        ConfigLoader::read_user_config(&self.path)
            .map(|config| config.scenarios)
            .map_err(|e| RepositoryError::Load(e.to_string()))
    }

    fn save(&self, scenarios: &[Scenario]) -> Result<(), RepositoryError> {
        ConfigLoader::save_scenarios(&self.path, scenarios)
            .map_err(|e| RepositoryError::Save(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redteam_domain::Phase;

    #[test]
    fn test_save_keeps_other_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{
                "scenarios": [],
                "tools": [{"name": "legacy", "args": "-x"}],
                "settings": {"log_dir": "custom_logs"}
            }"#,
        )
        .unwrap();

        let repo = JsonScenarioRepository::new(&path);
        let scenario = Scenario::named("recon")
            .unwrap()
            .with_phase(Phase::new("Nmap", "{target}"));
        repo.save(&[scenario.clone()]).unwrap();

        assert_eq!(repo.load().unwrap(), vec![scenario]);
        let config = ConfigLoader::read_user_config(&path).unwrap();
        assert_eq!(config.tools[0].name, "legacy");
        assert_eq!(config.settings.log_dir, PathBuf::from("custom_logs"));
    }

    #[test]
    fn test_save_leaves_absent_and_unknown_keys_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"scenarios": [], "theme": {"color": "red"}}"#).unwrap();

        let repo = JsonScenarioRepository::new(&path);
        repo.save(&[Scenario::named("recon").unwrap()]).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["theme"]["color"], "red");
        assert!(written.get("settings").is_none());
        assert!(written.get("tools").is_none());
        assert_eq!(written["scenarios"][0]["name"], "recon");
    }

    #[test]
    fn test_save_into_non_object_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "[]").unwrap();

        let result = JsonScenarioRepository::new(&path).save(&[]);
        assert!(matches!(result, Err(RepositoryError::Save(_))));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn test_load_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonScenarioRepository::new(dir.path().join("config.json"));
        assert!(repo.load().unwrap().is_empty());
        assert!(repo.path().exists());
    }

    #[test]
    fn test_malformed_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "[").unwrap();

        let result = JsonScenarioRepository::new(&path).load();
        assert!(matches!(result, Err(RepositoryError::Load(_))));
    }
}
