use anyhow::Result;
use serde_json::json;

use crate::args::SourceCommand;
use crate::commands::Context;
use crate::output;
use crate::types::OutputFormat;
use worklog_sources::{CommitSource, SourceKind};

pub fn handle(ctx: &Context, command: SourceCommand) -> Result<()> {
    match command {
        SourceCommand::List => list(ctx),
        SourceCommand::Mode { kind } => set_mode(ctx, &kind),
        SourceCommand::AddRepo { path } => add_repo(ctx, path),
        SourceCommand::RemoveRepo { path } => remove_repo(ctx, path),
    }
}

fn active_kind(ctx: &Context) -> SourceKind {
    ctx.source_override.unwrap_or(if ctx.config.use_git_mode {
        SourceKind::Commits
    } else {
        SourceKind::Transcripts
    })
}

fn list(ctx: &Context) -> Result<()> {
    let kind = active_kind(ctx);

    if ctx.format == OutputFormat::Json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "mode": kind.as_str(),
                "transcripts_dir": ctx.config.transcripts_dir,
                "git_repos": ctx.config.git_repos,
            }))?
        );
        return Ok(());
    }

    println!("{} {}", output::bold("Active source:"), kind);
    if let Some(dir) = &ctx.config.transcripts_dir {
        println!("Transcripts: {}", dir.display());
    }
    if ctx.config.git_repos.is_empty() {
        println!("Repositories: none configured");
    } else {
        println!("Repositories:");
        for repo in &ctx.config.git_repos {
            println!("  {}", repo.display());
        }
    }
    Ok(())
}

fn set_mode(ctx: &Context, kind: &str) -> Result<()> {
    let kind = SourceKind::parse(kind)
        .ok_or_else(|| anyhow::anyhow!("unknown source kind: {} (transcripts | commits)", kind))?;

    let mut config = ctx.config.clone();
    config.use_git_mode = kind == SourceKind::Commits;
    config.save_to(&ctx.config_path())?;

    println!("Source mode set to {}", kind);
    Ok(())
}

fn add_repo(ctx: &Context, path: std::path::PathBuf) -> Result<()> {
    // Validation only; the probe source is discarded.
    let mut probe = CommitSource::new();
    if !probe.add_repo(path.clone()) {
        println!("Not a repository, nothing added: {}", path.display());
        return Ok(());
    }

    let mut config = ctx.config.clone();
    if config.git_repos.contains(&path) {
        println!("Already configured: {}", path.display());
        return Ok(());
    }
    config.git_repos.push(path.clone());
    config.save_to(&ctx.config_path())?;

    println!("Added repository: {}", path.display());
    Ok(())
}

fn remove_repo(ctx: &Context, path: std::path::PathBuf) -> Result<()> {
    let mut config = ctx.config.clone();
    let before = config.git_repos.len();
    config.git_repos.retain(|repo| repo != &path);

    if config.git_repos.len() == before {
        println!("Not configured: {}", path.display());
        return Ok(());
    }

    config.save_to(&ctx.config_path())?;
    println!("Removed repository: {}", path.display());
    Ok(())
}
