use anyhow::Result;

use crate::args::TeamCommand;
use crate::commands::Context;
use crate::output;
use crate::types::OutputFormat;
use worklog_engine::{TeamInfo, TeamRegistry};

pub fn handle(ctx: &Context, command: TeamCommand) -> Result<()> {
    let path = TeamRegistry::path_in(&ctx.data_dir);
    let mut registry = TeamRegistry::load_from(&path)?;

    match command {
        TeamCommand::List => {
            if ctx.format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&registry.teams)?);
                return Ok(());
            }
            if registry.teams.is_empty() {
                println!("No teams configured.");
                return Ok(());
            }
            for (name, info) in &registry.teams {
                let roster = match (&info.timesheet_team_id, &info.directory_group) {
                    (Some(id), _) => format!("timesheet team {}", id),
                    (None, Some(group)) => format!("group {}", group),
                    (None, None) => "no roster identifier".to_string(),
                };
                let synced = info
                    .last_synced
                    .map(|ts| format!(", synced {}", ts.format("%Y-%m-%d %H:%M")))
                    .unwrap_or_default();
                println!(
                    "{} ({}, {} cached members{})",
                    output::bold(name),
                    roster,
                    info.members.len(),
                    synced
                );
            }
        }

        TeamCommand::Add {
            name,
            team_id,
            group,
        } => {
            if team_id.is_none() && group.is_none() {
                anyhow::bail!("a team needs --team-id or --group to resolve its roster");
            }
            let info = TeamInfo {
                timesheet_team_id: team_id,
                directory_group: group,
                ..Default::default()
            };
            if !registry.add(name.clone(), info) {
                anyhow::bail!("team already exists: {}", name);
            }
            registry.save_to(&path)?;
            println!("Added team {}", name);
        }

        TeamCommand::Remove { name } => {
            if !registry.remove(&name) {
                anyhow::bail!("no such team: {}", name);
            }
            registry.save_to(&path)?;
            println!("Removed team {}", name);
        }
    }
    Ok(())
}
