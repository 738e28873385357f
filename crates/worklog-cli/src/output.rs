use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use worklog_types::{ProjectSummary, SubmissionEntry};

fn use_color() -> bool {
    std::io::stdout().is_terminal()
}

pub fn bold(text: &str) -> String {
    if use_color() {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

pub fn cyan(text: &str) -> String {
    if use_color() {
        text.cyan().to_string()
    } else {
        text.to_string()
    }
}

pub fn dimmed(text: &str) -> String {
    if use_color() {
        text.dimmed().to_string()
    } else {
        text.to_string()
    }
}

pub fn hours(minutes: i64) -> String {
    format!("{:.1} hours", minutes as f64 / 60.0)
}

/// The per-project section of the analysis output.
pub fn print_project_summaries(summaries: &[ProjectSummary]) {
    for (idx, project) in summaries.iter().enumerate() {
        let issue_tag = project
            .issue_key
            .as_deref()
            .map(|key| format!(" -> {}", cyan(key)))
            .unwrap_or_default();

        println!("[{}] {}{}", idx + 1, bold(&project.project_name), issue_tag);
        println!(
            "    total: {} minutes ({:.1} hours)",
            project.total_minutes,
            project.total_hours()
        );
        if !project.project_path.is_empty() {
            println!("    path: {}", dimmed(&project.project_path));
        }
        for entry in &project.daily_entries {
            println!(
                "    {}  {:>4} min  {}",
                entry.date,
                entry.minutes,
                entry.description(&project.project_name)
            );
        }
        println!();
    }
}

/// The submission preview: one row per (project, date) entry, original
/// minutes next to what would actually be submitted.
pub fn print_submission_preview(entries: &[SubmissionEntry]) {
    println!("{}", bold("Submission preview:"));
    println!(
        "  {:<12} {:<10} {:>9} {:>11}   {}",
        "date", "issue", "original", "normalized", "description"
    );
    for entry in entries {
        let normalized = entry
            .normalized_minutes
            .map(|m| format!("{} min", m))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<12} {:<10} {:>5} min {:>11}   {}",
            entry.date.to_string(),
            entry.issue_key.as_deref().unwrap_or("-"),
            entry.original_minutes,
            normalized,
            entry.description
        );
    }
}
