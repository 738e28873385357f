use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One person in a team roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub account_id: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// One worklog record fetched from the timesheet service, enriched with
/// the issue's type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorklogEntry {
    pub issue_key: String,
    /// Issue type name, or "Unknown" when the lookup had no answer.
    pub issue_type: String,
    pub date: NaiveDate,
    pub time_spent_seconds: i64,
    pub description: String,
    pub author_id: String,
    pub author_name: String,
}

/// Everything reported for one member over the requested range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberWorklogSummary {
    pub member: TeamMember,
    pub total_seconds: i64,
    pub entries: Vec<WorklogEntry>,
    /// Seconds per issue type.
    pub by_issue_type: BTreeMap<String, i64>,
    /// Seconds per calendar date.
    pub by_date: BTreeMap<NaiveDate, i64>,
    /// Seconds per issue key.
    pub by_issue: BTreeMap<String, i64>,
}

impl MemberWorklogSummary {
    pub fn total_hours(&self) -> f64 {
        self.total_seconds as f64 / 3600.0
    }
}

/// Full team report for a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamReportData {
    pub team_name: String,
    /// Directory group the roster was resolved from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub generated_at: DateTime<Utc>,
    /// Sorted by total seconds descending, display name breaking ties.
    pub members: Vec<MemberWorklogSummary>,
}

impl TeamReportData {
    pub fn total_hours(&self) -> f64 {
        self.members.iter().map(|m| m.total_hours()).sum()
    }

    /// Team-wide seconds per issue type.
    pub fn by_issue_type_total(&self) -> BTreeMap<String, i64> {
        let mut totals = BTreeMap::new();
        for member in &self.members {
            for (issue_type, seconds) in &member.by_issue_type {
                *totals.entry(issue_type.clone()).or_insert(0) += seconds;
            }
        }
        totals
    }

    /// Team-wide seconds per calendar date.
    pub fn by_date_total(&self) -> BTreeMap<NaiveDate, i64> {
        let mut totals = BTreeMap::new();
        for member in &self.members {
            for (date, seconds) in &member.by_date {
                *totals.entry(*date).or_insert(0) += seconds;
            }
        }
        totals
    }

    /// Every issue type seen across the team, sorted.
    pub fn all_issue_types(&self) -> Vec<String> {
        let set: BTreeSet<&String> = self
            .members
            .iter()
            .flat_map(|m| m.by_issue_type.keys())
            .collect();
        set.into_iter().cloned().collect()
    }

    /// Every date with logged time across the team, sorted.
    pub fn all_dates(&self) -> Vec<NaiveDate> {
        let set: BTreeSet<NaiveDate> = self
            .members
            .iter()
            .flat_map(|m| m.by_date.keys().copied())
            .collect();
        set.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn member(name: &str) -> TeamMember {
        TeamMember {
            account_id: format!("id-{}", name),
            display_name: name.to_string(),
            email: None,
        }
    }

    fn summary(name: &str, seconds: i64, by_type: &[(&str, i64)]) -> MemberWorklogSummary {
        MemberWorklogSummary {
            member: member(name),
            total_seconds: seconds,
            entries: Vec::new(),
            by_issue_type: by_type
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
            by_date: BTreeMap::new(),
            by_issue: BTreeMap::new(),
        }
    }

    fn report(members: Vec<MemberWorklogSummary>) -> TeamReportData {
        TeamReportData {
            team_name: "platform".into(),
            group: None,
            start_date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 7).unwrap(),
            generated_at: Utc.with_ymd_and_hms(2025, 3, 8, 12, 0, 0).unwrap(),
            members,
        }
    }

    #[test]
    fn total_hours_sums_member_hours() {
        let report = report(vec![summary("ana", 7200, &[]), summary("ben", 3600, &[])]);
        assert!((report.total_hours() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn issue_type_totals_merge_across_members() {
        let report = report(vec![
            summary("ana", 7200, &[("Bug", 3600), ("Task", 3600)]),
            summary("ben", 3600, &[("Bug", 3600)]),
        ]);
        let totals = report.by_issue_type_total();
        assert_eq!(totals.get("Bug"), Some(&7200));
        assert_eq!(totals.get("Task"), Some(&3600));
        assert_eq!(report.all_issue_types(), vec!["Bug", "Task"]);
    }

    #[test]
    fn member_total_hours_from_seconds() {
        let s = summary("ana", 5400, &[]);
        assert!((s.total_hours() - 1.5).abs() < 1e-9);
    }
}
