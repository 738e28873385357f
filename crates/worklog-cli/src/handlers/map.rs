use anyhow::Result;

use crate::args::MapCommand;
use crate::commands::Context;
use crate::output;
use crate::types::OutputFormat;
use worklog_engine::ProjectMapping;

pub fn handle(ctx: &Context, command: MapCommand) -> Result<()> {
    let path = ProjectMapping::path_in(&ctx.data_dir);
    let mut mapping = ProjectMapping::load_from(&path)?;

    match command {
        MapCommand::List => {
            if ctx.format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&mapping.projects)?);
                return Ok(());
            }
            if mapping.projects.is_empty() {
                println!("No project mappings configured.");
                return Ok(());
            }
            for (project, issue_key) in &mapping.projects {
                println!("{} -> {}", project, output::cyan(issue_key));
            }
        }

        MapCommand::Set { project, issue_key } => {
            mapping.set(project.clone(), issue_key.clone());
            mapping.save_to(&path)?;
            println!("{} -> {}", project, issue_key);
        }

        MapCommand::Remove { project } => {
            if !mapping.remove(&project) {
                anyhow::bail!("no mapping for project: {}", project);
            }
            mapping.save_to(&path)?;
            println!("Removed mapping for {}", project);
        }

        MapCommand::Suggest { project } => {
            let suggestions = mapping.suggestions(&project);
            if ctx.format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&suggestions)?);
                return Ok(());
            }
            if suggestions.is_empty() {
                println!("No suggestions for {}", project);
                return Ok(());
            }
            for issue_key in suggestions {
                println!("{}", issue_key);
            }
        }
    }
    Ok(())
}
