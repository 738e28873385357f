use anyhow::Result;
use serde_json::json;
use std::path::PathBuf;

use crate::args::ConfigCommand;
use crate::commands::Context;
use crate::types::OutputFormat;

pub fn handle(ctx: &Context, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show => show(ctx),
        ConfigCommand::Set { key, value } => set(ctx, &key, &value),
    }
}

fn show(ctx: &Context) -> Result<()> {
    let config = &ctx.config;

    if ctx.format == OutputFormat::Json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "daily_work_hours": config.daily_work_hours,
                "normalize_hours": config.normalize_hours,
                "round_increment_minutes": config.round_increment_minutes,
                "use_git_mode": config.use_git_mode,
                "transcripts_dir": config.transcripts_dir,
                "git_repos": config.git_repos,
            }))?
        );
        return Ok(());
    }

    println!("daily_work_hours = {}", config.daily_work_hours);
    println!("normalize_hours = {}", config.normalize_hours);
    println!("round_increment_minutes = {}", config.round_increment_minutes);
    println!("use_git_mode = {}", config.use_git_mode);
    match &config.transcripts_dir {
        Some(dir) => println!("transcripts_dir = {}", dir.display()),
        None => println!("transcripts_dir = (unset)"),
    }
    println!("git_repos = {} configured", config.git_repos.len());
    Ok(())
}

fn set(ctx: &Context, key: &str, value: &str) -> Result<()> {
    let mut config = ctx.config.clone();

    match key {
        "daily_work_hours" => {
            let hours: f64 = value
                .parse()
                .map_err(|_| anyhow::anyhow!("daily_work_hours expects a number, got '{}'", value))?;
            if hours <= 0.0 || hours > 24.0 {
                anyhow::bail!("daily_work_hours must be between 0 and 24");
            }
            config.daily_work_hours = hours;
        }
        "normalize_hours" => {
            config.normalize_hours = parse_bool(key, value)?;
        }
        "round_increment_minutes" => {
            let minutes: i64 = value.parse().map_err(|_| {
                anyhow::anyhow!("round_increment_minutes expects an integer, got '{}'", value)
            })?;
            if minutes <= 0 {
                anyhow::bail!("round_increment_minutes must be positive");
            }
            config.round_increment_minutes = minutes;
        }
        "use_git_mode" => {
            config.use_git_mode = parse_bool(key, value)?;
        }
        "transcripts_dir" => {
            config.transcripts_dir = Some(PathBuf::from(value));
        }
        _ => anyhow::bail!("unknown config key: {}", key),
    }

    config.save_to(&ctx.config_path())?;
    println!("{} = {}", key, value);
    Ok(())
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value {
        "true" | "on" | "yes" => Ok(true),
        "false" | "off" | "no" => Ok(false),
        _ => anyhow::bail!("{} expects true or false, got '{}'", key, value),
    }
}
