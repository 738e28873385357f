use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where config, mappings and the team registry live. An explicit
/// `--data-dir` wins, then `WORKLOG_PATH`, then the platform data
/// directory, then `~/.worklog`.
pub fn resolve_data_dir(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var("WORKLOG_PATH") {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join("worklog"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".worklog"));
    }

    Err(Error::Config(
        "no usable data directory: neither a platform data dir nor HOME is set".to_string(),
    ))
}

/// `~/`-prefixed paths are taken relative to HOME.
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

fn default_daily_work_hours() -> f64 {
    8.0
}

fn default_normalize_hours() -> bool {
    true
}

fn default_round_increment_minutes() -> i64 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Reportable hours per working day.
    #[serde(default = "default_daily_work_hours")]
    pub daily_work_hours: f64,

    /// Whether analysis output should redistribute minutes to the daily
    /// budget before submission.
    #[serde(default = "default_normalize_hours")]
    pub normalize_hours: bool,

    /// Rounding increment for normalized values.
    #[serde(default = "default_round_increment_minutes")]
    pub round_increment_minutes: i64,

    /// Use commit history instead of session transcripts.
    #[serde(default)]
    pub use_git_mode: bool,

    /// Root of the per-project transcript tree.
    #[serde(default)]
    pub transcripts_dir: Option<PathBuf>,

    /// Repositories consulted in commit mode.
    #[serde(default)]
    pub git_repos: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            daily_work_hours: default_daily_work_hours(),
            normalize_hours: default_normalize_hours(),
            round_increment_minutes: default_round_increment_minutes(),
            use_git_mode: false,
            transcripts_dir: None,
            git_repos: Vec::new(),
        }
    }
}

impl Config {
    pub fn path_in(data_dir: &Path) -> PathBuf {
        data_dir.join("config.toml")
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Daily budget expressed in minutes, as the normalizer consumes it.
    pub fn daily_budget_minutes(&self) -> i64 {
        (self.daily_work_hours * 60.0).round() as i64
    }
}
