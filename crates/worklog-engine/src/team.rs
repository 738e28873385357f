use anyhow::Result;
use chrono::{NaiveDate, Utc};
use std::collections::{BTreeSet, HashMap};
use worklog_types::{MemberWorklogSummary, TeamMember, TeamReportData, WorklogEntry};

use crate::clients::{DirectoryClient, IssueClient, RemoteWorklog, TimesheetClient};
use crate::registry::TeamInfo;

/// Upstream issue-search queries are chunked to this many keys.
pub const ISSUE_TYPE_BATCH_SIZE: usize = 50;

const UNKNOWN_ISSUE_TYPE: &str = "Unknown";

/// Observational progress callback: (member name, index, member count).
pub type ProgressFn<'a> = dyn FnMut(&str, usize, usize) + 'a;

/// Builds a whole-team report from the remote clients.
///
/// Holds no state between runs; the issue-type cache lives only for one
/// `generate` call and is never shared across invocations.
pub struct TeamReportGenerator<'a> {
    directory: &'a dyn DirectoryClient,
    timesheet: &'a dyn TimesheetClient,
    issues: &'a dyn IssueClient,
}

impl<'a> TeamReportGenerator<'a> {
    pub fn new(
        directory: &'a dyn DirectoryClient,
        timesheet: &'a dyn TimesheetClient,
        issues: &'a dyn IssueClient,
    ) -> Self {
        Self {
            directory,
            timesheet,
            issues,
        }
    }

    /// Generate a report for one team over an inclusive date range.
    ///
    /// The resolved roster is cached back into `info` (with a sync
    /// timestamp) so repeated reports can reuse membership; persisting
    /// the registry afterwards is the caller's job. Roster resolution
    /// failures are hard errors; a worklog fetch failure for a single
    /// member degrades to an empty contribution for that member.
    pub fn generate(
        &self,
        team_name: &str,
        info: &mut TeamInfo,
        start: NaiveDate,
        end: NaiveDate,
        mut progress: Option<&mut ProgressFn<'_>>,
    ) -> Result<TeamReportData> {
        let roster = self.resolve_roster(team_name, info)?;
        info.members = roster.clone();
        info.last_synced = Some(Utc::now());

        let total = roster.len();
        let mut fetched: Vec<(TeamMember, Vec<RemoteWorklog>)> = Vec::with_capacity(total);
        for (index, member) in roster.into_iter().enumerate() {
            let worklogs = self
                .timesheet
                .member_worklogs(&member.account_id, start, end)
                .unwrap_or_default();

            if let Some(callback) = progress.as_deref_mut() {
                callback(&member.display_name, index + 1, total);
            }
            fetched.push((member, worklogs));
        }

        let issue_types = self.resolve_issue_types(&fetched);

        let mut members: Vec<MemberWorklogSummary> = fetched
            .into_iter()
            .map(|(member, worklogs)| fold_member(member, worklogs, &issue_types))
            .collect();

        members.sort_by(|a, b| {
            b.total_seconds
                .cmp(&a.total_seconds)
                .then_with(|| a.member.display_name.cmp(&b.member.display_name))
        });

        Ok(TeamReportData {
            team_name: team_name.to_string(),
            group: info.directory_group.clone(),
            start_date: start,
            end_date: end,
            generated_at: Utc::now(),
            members,
        })
    }

    /// The timesheet team id takes precedence over the directory group.
    fn resolve_roster(&self, team_name: &str, info: &TeamInfo) -> Result<Vec<TeamMember>> {
        if let Some(team_id) = &info.timesheet_team_id {
            return self.timesheet.team_members(team_id);
        }
        if let Some(group) = &info.directory_group {
            return self.directory.group_members(group);
        }
        anyhow::bail!("team '{}' has no roster identifier configured", team_name)
    }

    /// Resolve issue types for every key any member referenced, in fixed
    /// batches. A failed batch leaves its keys unresolved rather than
    /// failing the report.
    fn resolve_issue_types(
        &self,
        fetched: &[(TeamMember, Vec<RemoteWorklog>)],
    ) -> HashMap<String, String> {
        let keys: BTreeSet<String> = fetched
            .iter()
            .flat_map(|(_, worklogs)| worklogs.iter().map(|w| w.issue_key.clone()))
            .collect();
        let keys: Vec<String> = keys.into_iter().collect();

        let mut types = HashMap::with_capacity(keys.len());
        for batch in keys.chunks(ISSUE_TYPE_BATCH_SIZE) {
            if let Ok(resolved) = self.issues.issue_types(batch) {
                types.extend(resolved);
            }
        }
        types
    }
}

/// Fold one member's worklogs into a summary, computing the three
/// breakdown maps in a single pass.
fn fold_member(
    member: TeamMember,
    worklogs: Vec<RemoteWorklog>,
    issue_types: &HashMap<String, String>,
) -> MemberWorklogSummary {
    let author_id = member.account_id.clone();
    let author_name = member.display_name.clone();

    let mut summary = MemberWorklogSummary {
        member,
        total_seconds: 0,
        entries: Vec::with_capacity(worklogs.len()),
        by_issue_type: Default::default(),
        by_date: Default::default(),
        by_issue: Default::default(),
    };

    for worklog in worklogs {
        let issue_type = issue_types
            .get(&worklog.issue_key)
            .cloned()
            .unwrap_or_else(|| UNKNOWN_ISSUE_TYPE.to_string());

        summary.total_seconds += worklog.time_spent_seconds;
        *summary
            .by_issue_type
            .entry(issue_type.clone())
            .or_insert(0) += worklog.time_spent_seconds;
        *summary.by_date.entry(worklog.date).or_insert(0) += worklog.time_spent_seconds;
        *summary
            .by_issue
            .entry(worklog.issue_key.clone())
            .or_insert(0) += worklog.time_spent_seconds;

        summary.entries.push(WorklogEntry {
            issue_key: worklog.issue_key,
            issue_type,
            date: worklog.date,
            time_spent_seconds: worklog.time_spent_seconds,
            description: worklog.description,
            author_id: author_id.clone(),
            author_name: author_name.clone(),
        });
    }

    summary
}
