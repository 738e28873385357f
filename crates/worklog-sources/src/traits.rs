use anyhow::Result;
use chrono::NaiveDate;
use worklog_types::WeeklyWorklog;

/// Session extraction backend
///
/// Responsibilities:
/// - Reconstruct evidenced work sessions for an inclusive date range
/// - Report which recent dates carry any evidence at all
///
/// Parsing failures inside a backend are per-record/per-file recoverable:
/// a corrupt line or unreadable file is skipped, never surfaced as a hard
/// failure for the whole range.
pub trait SessionSource {
    /// Extract sessions whose calendar dates fall within [start, end].
    fn extract(&self, start: NaiveDate, end: NaiveDate) -> Result<WeeklyWorklog>;

    /// Most recent dates with any evidence, newest first, at most `limit`.
    fn available_dates(&self, limit: usize) -> Result<Vec<NaiveDate>>;
}

/// Which extraction backend to use, selected once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Per-project JSONL session transcripts.
    Transcripts,
    /// Local repository commit history.
    Commits,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Transcripts => "transcripts",
            SourceKind::Commits => "commits",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "transcripts" | "transcript" => Some(SourceKind::Transcripts),
            "commits" | "git" => Some(SourceKind::Commits),
            _ => None,
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_kind_aliases() {
        assert_eq!(SourceKind::parse("transcripts"), Some(SourceKind::Transcripts));
        assert_eq!(SourceKind::parse("git"), Some(SourceKind::Commits));
        assert_eq!(SourceKind::parse("svn"), None);
    }
}
