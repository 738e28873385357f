use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sessions shorter than this are treated as noise (opened and immediately
/// closed) and dropped during extraction.
pub const MIN_SESSION_MINUTES: i64 = 5;

/// Caps applied while building a single session from raw records.
pub const MAX_SESSION_SUMMARIES: usize = 5;
pub const MAX_SESSION_TODOS: usize = 10;

/// Caps applied when sessions collapse into a daily entry.
pub const MAX_ENTRY_TODOS: usize = 5;
pub const MAX_ENTRY_SUMMARIES: usize = 3;

// ==========================================
// 1. WorkSession (one evidenced span of work)
// ==========================================

/// One evidenced, time-bounded unit of activity on one project.
///
/// Produced by a session source (transcript or commit history) and
/// immutable afterwards; consumed only by the aggregation below.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkSession {
    /// Working directory the activity happened in.
    pub project_path: String,
    /// Human-readable project name derived from the log directory or repo.
    pub project_name: String,
    /// Source identifier: transcript file stem or earliest commit hash.
    pub session_id: String,
    /// First evidenced timestamp.
    pub start_time: DateTime<Utc>,
    /// Last evidenced timestamp.
    pub end_time: DateTime<Utc>,
    /// Elapsed span in minutes (end - start).
    pub duration_minutes: i64,
    /// Calendar date this session belongs to (date of `start_time`).
    pub date: NaiveDate,
    /// Short previews of user-authored messages or commit subjects.
    pub summaries: Vec<String>,
    /// Completed task labels, deduplicated.
    pub todos: Vec<String>,
    /// Externally-assigned issue key, if a caller attached one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_key: Option<String>,
}

// ==========================================
// 2. Daily / project rollups
// ==========================================

/// One project's activity on one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyProjectEntry {
    pub date: NaiveDate,
    /// Sum of the durations of the sessions that map to this (project, date).
    pub minutes: i64,
    /// Deduplicated completed-task labels, capped at [`MAX_ENTRY_TODOS`].
    pub todos: Vec<String>,
    /// Message previews, capped at [`MAX_ENTRY_SUMMARIES`].
    pub summaries: Vec<String>,
}

impl DailyProjectEntry {
    /// Derived one-line description for timesheet submission.
    pub fn description(&self, project_name: &str) -> String {
        if !self.todos.is_empty() {
            let shown: Vec<&str> = self.todos.iter().take(3).map(String::as_str).collect();
            return format!("Done: {}", shown.join(", "));
        }
        if let Some(first) = self.summaries.first() {
            return first.chars().take(60).collect();
        }
        format!("Work on {}", project_name)
    }
}

/// One project's activity across the whole analyzed range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub project_name: String,
    pub project_path: String,
    /// Sum of the child entries' minutes.
    pub total_minutes: i64,
    /// One entry per calendar date, in date order.
    pub daily_entries: Vec<DailyProjectEntry>,
    /// Confirmed or suggested issue key for the whole project.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_key: Option<String>,
}

impl ProjectSummary {
    pub fn total_hours(&self) -> f64 {
        self.total_minutes as f64 / 60.0
    }
}

// ==========================================
// 3. WeeklyWorklog (full analysis result)
// ==========================================

/// Full analysis result for a date range.
///
/// The range is arbitrary, not necessarily seven days; the name is
/// historical. The flat session list is retained for traceability, and
/// the grouped view is derived on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyWorklog {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub sessions: Vec<WorkSession>,
}

impl WeeklyWorklog {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            sessions: Vec::new(),
        }
    }

    pub fn total_minutes(&self) -> i64 {
        self.sessions.iter().map(|s| s.duration_minutes).sum()
    }

    /// Distinct calendar dates with any evidence, sorted ascending.
    pub fn dates_covered(&self) -> Vec<NaiveDate> {
        let dates: std::collections::BTreeSet<NaiveDate> =
            self.sessions.iter().map(|s| s.date).collect();
        dates.into_iter().collect()
    }

    /// Group sessions by project, then by calendar date.
    ///
    /// The result is a pure function of the session list: ordered maps keyed
    /// by project name and date make the output independent of input order.
    /// Summaries are sorted by total minutes descending (project name breaks
    /// ties) because downstream tables rely on that ordering.
    pub fn project_summaries(&self) -> Vec<ProjectSummary> {
        let mut by_project: BTreeMap<&str, Vec<&WorkSession>> = BTreeMap::new();
        for session in &self.sessions {
            by_project
                .entry(session.project_name.as_str())
                .or_default()
                .push(session);
        }

        let mut summaries = Vec::with_capacity(by_project.len());
        for (project_name, mut sessions) in by_project {
            sessions.sort_by_key(|s| (s.start_time, s.session_id.clone()));

            let mut by_date: BTreeMap<NaiveDate, Vec<&WorkSession>> = BTreeMap::new();
            for &session in &sessions {
                by_date.entry(session.date).or_default().push(session);
            }

            let mut daily_entries = Vec::with_capacity(by_date.len());
            for (date, day_sessions) in by_date {
                let mut todos: Vec<String> = Vec::new();
                let mut day_summaries: Vec<String> = Vec::new();
                for s in &day_sessions {
                    for todo in &s.todos {
                        if !todos.contains(todo) {
                            todos.push(todo.clone());
                        }
                    }
                    day_summaries.extend(s.summaries.iter().cloned());
                }
                todos.truncate(MAX_ENTRY_TODOS);
                day_summaries.truncate(MAX_ENTRY_SUMMARIES);

                daily_entries.push(DailyProjectEntry {
                    date,
                    minutes: day_sessions.iter().map(|s| s.duration_minutes).sum(),
                    todos,
                    summaries: day_summaries,
                });
            }

            summaries.push(ProjectSummary {
                project_name: project_name.to_string(),
                project_path: sessions[0].project_path.clone(),
                total_minutes: sessions.iter().map(|s| s.duration_minutes).sum(),
                daily_entries,
                issue_key: sessions.iter().find_map(|s| s.issue_key.clone()),
            });
        }

        summaries.sort_by(|a, b| {
            b.total_minutes
                .cmp(&a.total_minutes)
                .then_with(|| a.project_name.cmp(&b.project_name))
        });
        summaries
    }
}
