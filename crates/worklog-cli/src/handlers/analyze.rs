use anyhow::Result;
use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::commands::Context;
use crate::output;
use crate::types::OutputFormat;
use worklog_engine::{ProjectMapping, normalize_entries, validate_range, week_bounds};
use worklog_types::{ProjectSummary, SubmissionEntry};

#[derive(Serialize)]
struct AnalysisReport {
    start_date: NaiveDate,
    end_date: NaiveDate,
    total_minutes: i64,
    dates_covered: Vec<NaiveDate>,
    projects: Vec<ProjectSummary>,
    entries: Vec<SubmissionEntry>,
}

pub fn handle(
    ctx: &Context,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    date: Option<NaiveDate>,
    last_week: bool,
    no_normalize: bool,
) -> Result<()> {
    let today = Local::now().date_naive();
    let (start, end) = if last_week {
        worklog_engine::last_week(today)
    } else if let Some(date) = date {
        (date, date)
    } else {
        match (start, end) {
            (Some(start), Some(end)) => (start, end),
            (None, None) => week_bounds(today),
            _ => anyhow::bail!("--start and --end must be given together"),
        }
    };
    validate_range(start, end).map_err(|msg| anyhow::anyhow!(msg))?;

    let source = super::build_source(ctx)?;
    let worklog = source.extract(start, end)?;

    let mapping = ProjectMapping::load_from(&ProjectMapping::path_in(&ctx.data_dir))?;

    let mut projects = worklog.project_summaries();
    for project in &mut projects {
        if project.issue_key.is_none() {
            project.issue_key = mapping.get(&project.project_name).map(String::from);
        }
    }

    let mut entries: Vec<SubmissionEntry> = Vec::new();
    for project in &projects {
        for daily in &project.daily_entries {
            entries.push(SubmissionEntry::new(
                project.issue_key.clone(),
                daily.date,
                daily.description(&project.project_name),
                daily.minutes,
            ));
        }
    }

    let normalize = ctx.config.normalize_hours && !no_normalize;
    if normalize {
        normalize_entries(
            &mut entries,
            ctx.config.daily_budget_minutes(),
            ctx.config.round_increment_minutes,
        );
    }

    let report = AnalysisReport {
        start_date: start,
        end_date: end,
        total_minutes: worklog.total_minutes(),
        dates_covered: worklog.dates_covered(),
        projects,
        entries,
    };

    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Plain => print_plain(&report),
    }
    Ok(())
}

fn print_plain(report: &AnalysisReport) {
    println!(
        "{} {} ~ {}",
        output::bold("Period:"),
        report.start_date,
        report.end_date
    );
    println!("Days with activity: {}", report.dates_covered.len());
    println!(
        "Total: {} minutes ({})",
        report.total_minutes,
        output::hours(report.total_minutes)
    );
    println!("Projects: {}", report.projects.len());
    println!();

    if report.projects.is_empty() {
        println!("No work evidence found in this range.");
        return;
    }

    output::print_project_summaries(&report.projects);
    output::print_submission_preview(&report.entries);
}
