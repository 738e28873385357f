use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row prepared for timesheet submission: a (project, date) entry
/// carrying both its raw evidenced minutes and, once normalization has
/// run, the adjusted minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionEntry {
    /// Target issue, if the project has a confirmed mapping.
    pub issue_key: Option<String>,
    pub date: NaiveDate,
    pub description: String,
    /// Minutes as evidenced by the sources.
    pub original_minutes: i64,
    /// Minutes after daily-budget redistribution. `None` until the
    /// normalizer has processed this entry.
    pub normalized_minutes: Option<i64>,
}

impl SubmissionEntry {
    pub fn new(
        issue_key: Option<String>,
        date: NaiveDate,
        description: String,
        original_minutes: i64,
    ) -> Self {
        Self {
            issue_key,
            date,
            description,
            original_minutes,
            normalized_minutes: None,
        }
    }

    /// Minutes that would actually be submitted: normalized when present,
    /// raw otherwise.
    pub fn minutes_to_submit(&self) -> i64 {
        self.normalized_minutes.unwrap_or(self.original_minutes)
    }
}
