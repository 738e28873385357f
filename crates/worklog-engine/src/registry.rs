use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use worklog_types::TeamMember;

/// One configured team: how its roster is resolved, plus the cached
/// roster from the last sync.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamInfo {
    /// External timesheet team id. Takes precedence over the group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timesheet_team_id: Option<String>,

    /// Directory group the roster can be resolved from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory_group: Option<String>,

    /// Cached member roster from the last report run.
    #[serde(default)]
    pub members: Vec<TeamMember>,

    /// When the roster was last resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_synced: Option<DateTime<Utc>>,
}

/// Team name → configuration, persisted next to the config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamRegistry {
    #[serde(default)]
    pub teams: BTreeMap<String, TeamInfo>,
}

impl TeamRegistry {
    pub fn path_in(data_dir: &Path) -> PathBuf {
        data_dir.join("teams.toml")
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let registry: TeamRegistry = toml::from_str(&content)?;
        Ok(registry)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Register a team. Returns false when the name is already taken.
    pub fn add(&mut self, name: impl Into<String>, info: TeamInfo) -> bool {
        let name = name.into();
        if self.teams.contains_key(&name) {
            return false;
        }
        self.teams.insert(name, info);
        true
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.teams.remove(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&TeamInfo> {
        self.teams.get(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.teams.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn add_rejects_duplicates() {
        let mut registry = TeamRegistry::default();
        assert!(registry.add("platform", TeamInfo::default()));
        assert!(!registry.add("platform", TeamInfo::default()));
        assert_eq!(registry.names(), vec!["platform"]);
    }

    #[test]
    fn round_trips_with_cached_roster() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("teams.toml");

        let mut registry = TeamRegistry::default();
        registry.add(
            "platform",
            TeamInfo {
                timesheet_team_id: Some("42".into()),
                directory_group: Some("platform-devs".into()),
                members: vec![TeamMember {
                    account_id: "id-ana".into(),
                    display_name: "Ana".into(),
                    email: None,
                }],
                last_synced: None,
            },
        );
        registry.save_to(&path)?;

        let loaded = TeamRegistry::load_from(&path)?;
        let team = loaded.get("platform").unwrap();
        assert_eq!(team.timesheet_team_id.as_deref(), Some("42"));
        assert_eq!(team.members.len(), 1);

        Ok(())
    }

    #[test]
    fn load_nonexistent_returns_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let registry = TeamRegistry::load_from(&temp_dir.path().join("teams.toml"))?;
        assert!(registry.teams.is_empty());
        Ok(())
    }
}
