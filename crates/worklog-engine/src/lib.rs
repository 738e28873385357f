// Error types
pub mod error;

// Configuration and persistence
pub mod config;
pub mod mapping;
pub mod registry;

// Core operations
pub mod normalize;
pub mod period;

// Team reporting
pub mod clients;
pub mod team;

pub use clients::{DirectoryClient, IssueClient, RemoteWorklog, TimesheetClient};
pub use config::{Config, resolve_data_dir};
pub use mapping::ProjectMapping;
pub use normalize::normalize_entries;
pub use period::{last_week, validate_range, week_bounds};
pub use registry::{TeamInfo, TeamRegistry};
pub use team::{ISSUE_TYPE_BATCH_SIZE, ProgressFn, TeamReportGenerator};

pub use error::{Error, Result};
