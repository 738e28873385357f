use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::traits::SessionSource;
use worklog_types::{
    MAX_SESSION_SUMMARIES, MAX_SESSION_TODOS, MIN_SESSION_MINUTES, WeeklyWorklog, WorkSession,
};

/// Messages shorter than this are treated as command noise, not prose.
const MIN_MESSAGE_CHARS: usize = 10;
/// Message previews are truncated to this many characters.
const MESSAGE_PREVIEW_CHARS: usize = 100;

/// Path segments that never identify a project (home directories and
/// well-known parent folders). Checked when deriving a project name from
/// a flattened log-directory name.
const NOISE_SEGMENTS: &[&str] = &[
    "Users",
    "home",
    "Documents",
    "Downloads",
    "Desktop",
    "projects",
    "repos",
    "src",
    "work",
];

/// Extracts sessions from per-project JSONL transcript trees.
///
/// The log root contains one subdirectory per tracked project, each
/// holding append-only JSONL files (one session per file; a file may span
/// several calendar days). Files with the reserved `agent-` prefix are
/// skipped entirely.
pub struct TranscriptSource {
    projects_dir: PathBuf,
}

impl TranscriptSource {
    pub fn new(projects_dir: impl Into<PathBuf>) -> Self {
        Self {
            projects_dir: projects_dir.into(),
        }
    }

    pub fn projects_dir(&self) -> &Path {
        &self.projects_dir
    }

    fn session_files(&self) -> Vec<(String, PathBuf)> {
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.projects_dir)
            .min_depth(2)
            .max_depth(2)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !probe(path) {
                continue;
            }
            let project_name = path
                .parent()
                .and_then(|p| p.file_name())
                .and_then(|n| n.to_str())
                .map(extract_project_name)
                .unwrap_or_default();
            files.push((project_name, path.to_path_buf()));
        }
        files
    }
}

impl SessionSource for TranscriptSource {
    fn extract(&self, start: NaiveDate, end: NaiveDate) -> Result<WeeklyWorklog> {
        let mut worklog = WeeklyWorklog::new(start, end);

        for (project_name, path) in self.session_files() {
            // Unreadable files are skipped, same as corrupt lines.
            let mut sessions = match parse_session_file(&path, start, end, &project_name) {
                Ok(sessions) => sessions,
                Err(_) => continue,
            };
            worklog.sessions.append(&mut sessions);
        }

        worklog
            .sessions
            .sort_by(|a, b| (a.start_time, &a.session_id).cmp(&(b.start_time, &b.session_id)));
        Ok(worklog)
    }

    fn available_dates(&self, limit: usize) -> Result<Vec<NaiveDate>> {
        let mut dates = std::collections::BTreeSet::new();
        for (_, path) in self.session_files() {
            if let Some(date) = first_record_date(&path) {
                dates.insert(date);
            }
        }
        Ok(dates.into_iter().rev().take(limit).collect())
    }
}

/// Check whether a file is a parseable session transcript.
fn probe(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    if path.extension().is_none_or(|e| e != "jsonl") {
        return false;
    }
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| !n.starts_with("agent-"))
}

/// Derive a project name from a flattened log-directory name.
///
/// Directory names encode the project path with `-` separators (e.g.
/// `-home-dev-billing-api`); the last segment that is not a known
/// non-informative path component wins. Falls back to the raw name.
pub(crate) fn extract_project_name(dir_name: &str) -> String {
    for part in dir_name.split('-').rev() {
        if !part.is_empty() && !NOISE_SEGMENTS.contains(&part) {
            return part.to_string();
        }
    }
    dir_name.to_string()
}

#[derive(Default)]
struct DayBucket {
    timestamps: Vec<DateTime<Utc>>,
    project_path: String,
    messages: Vec<String>,
    todos: Vec<String>,
}

/// Parse one transcript file, bucketing records by calendar date and
/// emitting one session per date whose span clears the minimum duration.
fn parse_session_file(
    path: &Path,
    start: NaiveDate,
    end: NaiveDate,
    project_name: &str,
) -> crate::Result<Vec<WorkSession>> {
    let session_id = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();

    let file = std::fs::File::open(path)?;
    let reader = BufReader::new(file);

    let mut by_date: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();

    for line in reader.lines() {
        let line = line?;
        // Corrupt or partial lines are expected in append-only logs.
        let record: Value = match serde_json::from_str(&line) {
            Ok(value) => value,
            Err(_) => continue,
        };

        let Some(timestamp) = record
            .get("timestamp")
            .and_then(Value::as_str)
            .and_then(parse_timestamp)
        else {
            continue;
        };

        let date = timestamp.date_naive();
        if date < start || date > end {
            continue;
        }

        let bucket = by_date.entry(date).or_default();
        bucket.timestamps.push(timestamp);

        if bucket.project_path.is_empty()
            && let Some(cwd) = record.get("cwd").and_then(Value::as_str)
            && !cwd.is_empty()
        {
            bucket.project_path = cwd.to_string();
        }

        if record.get("type").and_then(Value::as_str) == Some("user")
            && let Some(content) = record
                .get("message")
                .and_then(|m| m.get("content"))
                .and_then(Value::as_str)
            && let Some(preview) = message_preview(content)
        {
            bucket.messages.push(preview);
        }

        if let Some(todos) = record
            .get("toolUseResult")
            .and_then(|r| r.get("newTodos"))
            .and_then(Value::as_array)
        {
            for todo in todos {
                if todo.get("status").and_then(Value::as_str) == Some("completed")
                    && let Some(content) = todo.get("content").and_then(Value::as_str)
                    && !content.is_empty()
                {
                    bucket.todos.push(content.to_string());
                }
            }
        }
    }

    let mut sessions = Vec::new();
    for (date, bucket) in by_date {
        let Some(start_time) = bucket.timestamps.iter().min().copied() else {
            continue;
        };
        let end_time = bucket.timestamps.iter().max().copied().unwrap_or(start_time);
        let duration_minutes = (end_time - start_time).num_minutes();

        if duration_minutes < MIN_SESSION_MINUTES {
            continue;
        }

        let mut summaries = bucket.messages;
        summaries.truncate(MAX_SESSION_SUMMARIES);

        let mut todos: Vec<String> = Vec::new();
        for todo in bucket.todos {
            if !todos.contains(&todo) {
                todos.push(todo);
            }
        }
        todos.truncate(MAX_SESSION_TODOS);

        sessions.push(WorkSession {
            project_path: bucket.project_path,
            project_name: project_name.to_string(),
            session_id: session_id.clone(),
            start_time,
            end_time,
            duration_minutes,
            date,
            summaries,
            todos,
            issue_key: None,
        });
    }

    Ok(sessions)
}

/// ISO-8601 with an optional trailing `Z` treated as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Short preview of a user-authored message, or None for command noise.
fn message_preview(content: &str) -> Option<String> {
    if content.chars().count() <= MIN_MESSAGE_CHARS {
        return None;
    }
    let preview: String = content
        .chars()
        .take(MESSAGE_PREVIEW_CHARS)
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect();
    let preview = preview.trim().to_string();
    if preview.is_empty() || preview.starts_with('⎿') {
        return None;
    }
    Some(preview)
}

/// Date of the first record carrying a timestamp, used for date listings
/// without parsing whole files.
fn first_record_date(path: &Path) -> Option<NaiveDate> {
    let file = std::fs::File::open(path).ok()?;
    let reader = BufReader::new(file);

    for line in reader.lines().map_while(|l| l.ok()) {
        if let Ok(record) = serde_json::from_str::<Value>(&line)
            && let Some(ts) = record
                .get("timestamp")
                .and_then(Value::as_str)
                .and_then(parse_timestamp)
        {
            return Some(ts.date_naive());
        }
    }
    None
}
