use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const MAX_SUGGESTIONS: usize = 5;

/// Project name → issue key mapping, persisted next to the config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectMapping {
    #[serde(default)]
    pub projects: BTreeMap<String, String>,
}

impl ProjectMapping {
    pub fn path_in(data_dir: &Path) -> PathBuf {
        data_dir.join("mapping.toml")
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let mapping: ProjectMapping = toml::from_str(&content)?;
        Ok(mapping)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn get(&self, project_name: &str) -> Option<&str> {
        self.projects.get(project_name).map(String::as_str)
    }

    pub fn set(&mut self, project_name: impl Into<String>, issue_key: impl Into<String>) {
        self.projects.insert(project_name.into(), issue_key.into());
    }

    pub fn remove(&mut self, project_name: &str) -> bool {
        self.projects.remove(project_name).is_some()
    }

    /// Issue-key suggestions for a project: an exact match first, then
    /// keys of projects whose names overlap either way, capped.
    pub fn suggestions(&self, project_name: &str) -> Vec<String> {
        let mut suggestions = Vec::new();

        if let Some(exact) = self.get(project_name) {
            suggestions.push(exact.to_string());
        }

        let query = project_name.to_lowercase();
        for (name, issue_key) in &self.projects {
            let candidate = name.to_lowercase();
            if (candidate.contains(&query) || query.contains(&candidate))
                && !suggestions.contains(issue_key)
            {
                suggestions.push(issue_key.clone());
            }
        }

        suggestions.truncate(MAX_SUGGESTIONS);
        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn round_trips_through_toml() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("mapping.toml");

        let mut mapping = ProjectMapping::default();
        mapping.set("billing", "PROJ-12");
        mapping.set("billing-api", "PROJ-13");
        mapping.save_to(&path)?;

        let loaded = ProjectMapping::load_from(&path)?;
        assert_eq!(loaded.get("billing"), Some("PROJ-12"));
        assert_eq!(loaded.projects.len(), 2);

        Ok(())
    }

    #[test]
    fn exact_match_ranks_first() {
        let mut mapping = ProjectMapping::default();
        mapping.set("api", "PROJ-1");
        mapping.set("billing-api", "PROJ-2");
        mapping.set("unrelated", "PROJ-3");

        let suggestions = mapping.suggestions("api");
        assert_eq!(suggestions, vec!["PROJ-1", "PROJ-2"]);
    }

    #[test]
    fn suggestions_are_capped() {
        let mut mapping = ProjectMapping::default();
        for i in 0..10 {
            mapping.set(format!("api-{}", i), format!("PROJ-{}", i));
        }
        assert_eq!(mapping.suggestions("api").len(), 5);
    }

    #[test]
    fn remove_reports_presence() {
        let mut mapping = ProjectMapping::default();
        mapping.set("api", "PROJ-1");
        assert!(mapping.remove("api"));
        assert!(!mapping.remove("api"));
    }
}
