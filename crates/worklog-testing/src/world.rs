//! TestWorld pattern for declarative integration test setup.
//!
//! Provides a fluent interface for:
//! - Creating isolated test environments
//! - Laying out transcript trees and repository stubs
//! - Executing CLI commands with proper context

use anyhow::Result;
use assert_cmd::Command;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::fixtures::TranscriptFixture;

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use worklog_testing::{TestWorld, TranscriptFixture};
///
/// let world = TestWorld::new().with_transcript(
///     "-home-dev-api",
///     "session-1.jsonl",
///     TranscriptFixture::new().user_message(
///         "2025-03-03T09:00:00Z",
///         "/home/dev/api",
///         "wire up the payment webhook",
///     ),
/// );
///
/// let result = world.run(&["dates"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    data_dir: PathBuf,
    log_root: PathBuf,
    env_vars: HashMap<String, String>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base_path = temp_dir.path().to_path_buf();
        let data_dir = base_path.join(".worklog");
        let log_root = base_path.join("transcripts");

        std::fs::create_dir_all(&data_dir).expect("Failed to create data dir");
        std::fs::create_dir_all(&log_root).expect("Failed to create log dir");

        Self {
            temp_dir,
            data_dir,
            log_root,
            env_vars: HashMap::new(),
        }
    }

    /// Get the data directory path (.worklog).
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Get the transcript log root.
    pub fn log_root(&self) -> &Path {
        &self.log_root
    }

    /// Get the temp directory root.
    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Set an environment variable for CLI execution.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Write a transcript fixture into a project log directory.
    pub fn with_transcript(
        self,
        project_dir: &str,
        file_name: &str,
        fixture: TranscriptFixture,
    ) -> Self {
        let dest = self.log_root.join(project_dir).join(file_name);
        fixture.write_to(&dest).expect("Failed to write fixture");
        self
    }

    /// Create a directory that passes repository validation (a bare
    /// `.git` marker; no readable history).
    pub fn with_repo_stub(self, name: &str) -> Self {
        let repo = self.temp_dir.path().join(name);
        std::fs::create_dir_all(repo.join(".git")).expect("Failed to create repo stub");
        self
    }

    /// Configure a CLI command with this test environment's settings.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.arg("--data-dir")
            .arg(self.data_dir())
            .arg("--logs-dir")
            .arg(self.log_root())
            .arg("--format")
            .arg("plain");

        cmd.current_dir(self.temp_dir.path());

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        cmd
    }

    /// Execute a command using the project's binary and return the result.
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("worklog")
            .map_err(|e| anyhow::anyhow!("Failed to find worklog binary: {}", e))?;

        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    /// Check if the command succeeded.
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
