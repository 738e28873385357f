mod session;
mod submission;
mod team;

pub use session::{
    DailyProjectEntry, MAX_ENTRY_SUMMARIES, MAX_ENTRY_TODOS, MAX_SESSION_SUMMARIES,
    MAX_SESSION_TODOS, MIN_SESSION_MINUTES, ProjectSummary, WeeklyWorklog, WorkSession,
};
pub use submission::SubmissionEntry;
pub use team::{MemberWorklogSummary, TeamMember, TeamReportData, WorklogEntry};
