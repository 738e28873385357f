use anyhow::Result;
use chrono::NaiveDate;
use std::collections::HashMap;
use worklog_types::TeamMember;

/// One worklog record as returned by the timesheet service, before the
/// issue type is resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteWorklog {
    pub issue_key: String,
    pub date: NaiveDate,
    pub time_spent_seconds: i64,
    pub description: String,
}

/// Directory lookups (e.g. user groups in an issue tracker).
///
/// Responsibilities:
/// - Resolve a group identifier into its member accounts
pub trait DirectoryClient {
    fn group_members(&self, group: &str) -> Result<Vec<TeamMember>>;
}

/// Timesheet service access.
///
/// Responsibilities:
/// - Resolve a timesheet team id into its member accounts
/// - Fetch one member's worklogs for a date range
///
/// Calls are expected to carry their own timeouts; the engine performs
/// them sequentially and never retries.
pub trait TimesheetClient {
    fn team_members(&self, team_id: &str) -> Result<Vec<TeamMember>>;

    fn member_worklogs(
        &self,
        account_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<RemoteWorklog>>;
}

/// Issue metadata access.
pub trait IssueClient {
    /// Resolve issue keys to type names. Keys absent from the result are
    /// treated as unknown by the caller.
    fn issue_types(&self, keys: &[String]) -> Result<HashMap<String, String>>;
}
