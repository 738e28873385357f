use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::traits::SessionSource;
use worklog_types::{MAX_SESSION_SUMMARIES, MIN_SESSION_MINUTES, WeeklyWorklog, WorkSession};

/// Extracts sessions from local repository commit history.
///
/// Commit timestamps are a proxy for elapsed time: all commits on one
/// (repository, calendar date) collapse into a single session spanning
/// the first to the last commit of that day. History is read with the
/// `git` binary; a repository whose history cannot be read contributes
/// nothing.
pub struct CommitSource {
    repos: Vec<PathBuf>,
}

impl Default for CommitSource {
    fn default() -> Self {
        Self::new()
    }
}

impl CommitSource {
    pub fn new() -> Self {
        Self { repos: Vec::new() }
    }

    pub fn with_repos(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut source = Self::new();
        for path in paths {
            source.add_repo(path);
        }
        source
    }

    /// Register a repository path. Returns false (and retains nothing)
    /// when the path does not contain repository metadata.
    pub fn add_repo(&mut self, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        if !is_repository(&path) {
            return false;
        }
        if !self.repos.contains(&path) {
            self.repos.push(path);
        }
        true
    }

    pub fn repos(&self) -> &[PathBuf] {
        &self.repos
    }
}

impl SessionSource for CommitSource {
    fn extract(&self, start: NaiveDate, end: NaiveDate) -> Result<WeeklyWorklog> {
        let mut worklog = WeeklyWorklog::new(start, end);

        for repo in &self.repos {
            let commits = log_commits(repo, Some((start, end)), None);
            if commits.is_empty() {
                continue;
            }

            let project_name = repo_name(repo);
            let project_path = repo.display().to_string();

            let mut by_date: BTreeMap<NaiveDate, Vec<&Commit>> = BTreeMap::new();
            for commit in &commits {
                // The git window is padded for timezone skew; the UTC date
                // decides membership in the range.
                let date = commit.timestamp.date_naive();
                if date < start || date > end {
                    continue;
                }
                by_date.entry(date).or_default().push(commit);
            }

            for (date, day_commits) in by_date {
                let Some(start_time) = day_commits.iter().map(|c| c.timestamp).min() else {
                    continue;
                };
                let end_time = day_commits
                    .iter()
                    .map(|c| c.timestamp)
                    .max()
                    .unwrap_or(start_time);
                let duration_minutes = (end_time - start_time).num_minutes();

                // Single-commit days have no measurable span.
                if duration_minutes < MIN_SESSION_MINUTES {
                    continue;
                }

                let earliest = day_commits
                    .iter()
                    .min_by_key(|c| c.timestamp)
                    .map(|c| c.short_hash())
                    .unwrap_or_default();

                let mut summaries: Vec<String> = day_commits
                    .iter()
                    .map(|c| c.subject.clone())
                    .filter(|s| !s.is_empty())
                    .collect();
                summaries.truncate(MAX_SESSION_SUMMARIES);

                worklog.sessions.push(WorkSession {
                    project_path: project_path.clone(),
                    project_name: project_name.clone(),
                    session_id: earliest,
                    start_time,
                    end_time,
                    duration_minutes,
                    date,
                    summaries,
                    todos: Vec::new(),
                    issue_key: None,
                });
            }
        }

        worklog
            .sessions
            .sort_by(|a, b| (a.start_time, &a.session_id).cmp(&(b.start_time, &b.session_id)));
        Ok(worklog)
    }

    fn available_dates(&self, limit: usize) -> Result<Vec<NaiveDate>> {
        let mut dates = std::collections::BTreeSet::new();
        for repo in &self.repos {
            for commit in log_commits(repo, None, Some(500)) {
                dates.insert(commit.timestamp.date_naive());
            }
        }
        Ok(dates.into_iter().rev().take(limit).collect())
    }
}

/// Presence of repository metadata is sufficient; no history check.
fn is_repository(path: &Path) -> bool {
    path.join(".git").exists()
}

fn repo_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("repository")
        .to_string()
}

struct Commit {
    hash: String,
    timestamp: DateTime<Utc>,
    subject: String,
}

impl Commit {
    fn short_hash(&self) -> String {
        self.hash.chars().take(8).collect()
    }
}

/// Read commit history with the git binary. Any failure (missing binary,
/// not actually a repository, empty history) yields an empty list.
fn log_commits(
    repo: &Path,
    range: Option<(NaiveDate, NaiveDate)>,
    max_count: Option<usize>,
) -> Vec<Commit> {
    let mut command = Command::new("git");
    command.arg("-C").arg(repo).arg("log").arg("--format=%H|%aI|%s");

    if let Some((start, end)) = range {
        // git parses --since/--until in the host timezone while bucket
        // dates come from the UTC instant, so the window is widened a day
        // each side and the caller filters by exact date.
        let since = start.pred_opt().unwrap_or(start);
        let until = end.succ_opt().unwrap_or(end);
        command
            .arg(format!("--since={}T00:00:00", since))
            .arg(format!("--until={}T23:59:59", until));
    }
    if let Some(n) = max_count {
        command.arg(format!("--max-count={}", n));
    }

    let output = match command.output() {
        Ok(output) if output.status.success() => output,
        _ => return Vec::new(),
    };

    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut commits = Vec::new();
    for line in stdout.lines() {
        let mut parts = line.splitn(3, '|');
        let (Some(hash), Some(raw_ts), Some(subject)) =
            (parts.next(), parts.next(), parts.next())
        else {
            continue;
        };
        let Ok(timestamp) = DateTime::parse_from_rfc3339(raw_ts) else {
            continue;
        };
        commits.push(Commit {
            hash: hash.to_string(),
            timestamp: timestamp.with_timezone(&Utc),
            subject: subject.trim().to_string(),
        });
    }
    commits
}
