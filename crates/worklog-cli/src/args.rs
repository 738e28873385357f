use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::types::OutputFormat;

#[derive(Parser)]
#[command(name = "worklog")]
#[command(about = "Reconstruct daily work activity into timesheet-ready worklogs", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data directory for config, mappings and the team registry
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Transcript log root (overrides the configured one)
    #[arg(long, global = true)]
    pub logs_dir: Option<PathBuf>,

    /// Extraction backend for this run (transcripts | commits)
    #[arg(long, global = true)]
    pub source: Option<String>,

    #[arg(long, default_value = "plain", global = true, overrides_with = "format")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a date range into a per-project worklog
    Analyze {
        /// Start date (YYYY-MM-DD); defaults to this week's Monday
        #[arg(long)]
        start: Option<NaiveDate>,

        /// End date (YYYY-MM-DD); defaults to this week's Sunday
        #[arg(long)]
        end: Option<NaiveDate>,

        /// Analyze a single date
        #[arg(long, conflicts_with_all = ["start", "end"])]
        date: Option<NaiveDate>,

        /// Analyze the previous Monday-Sunday week
        #[arg(long, conflicts_with_all = ["start", "end", "date"])]
        last_week: bool,

        /// Skip daily-budget normalization for this run
        #[arg(long)]
        no_normalize: bool,
    },

    /// List recent dates with any work evidence
    Dates {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Inspect or switch extraction sources
    Source {
        #[command(subcommand)]
        command: SourceCommand,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Manage project-to-issue mappings
    Map {
        #[command(subcommand)]
        command: MapCommand,
    },

    /// Manage the team registry
    Team {
        #[command(subcommand)]
        command: TeamCommand,
    },
}

#[derive(Subcommand)]
pub enum SourceCommand {
    /// Show the active source and configured repositories
    List,

    /// Switch the extraction backend (transcripts | commits)
    Mode { kind: String },

    /// Register a repository for commit-based extraction
    AddRepo { path: PathBuf },

    /// Unregister a repository
    RemoveRepo { path: PathBuf },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,

    /// Set one configuration value
    Set { key: String, value: String },
}

#[derive(Subcommand)]
pub enum MapCommand {
    /// List all project-to-issue mappings
    List,

    /// Map a project name to an issue key
    Set { project: String, issue_key: String },

    /// Remove a project mapping
    Remove { project: String },

    /// Suggest issue keys for a project name
    Suggest { project: String },
}

#[derive(Subcommand)]
pub enum TeamCommand {
    /// List configured teams
    List,

    /// Register a team (needs --team-id or --group)
    Add {
        name: String,

        /// External timesheet team id (takes precedence)
        #[arg(long)]
        team_id: Option<String>,

        /// Directory group to resolve the roster from
        #[arg(long)]
        group: Option<String>,
    },

    /// Remove a team
    Remove { name: String },
}
