use anyhow::Result;
use std::path::PathBuf;

use crate::args::{Cli, Commands};
use crate::handlers;
use worklog_engine::{Config, resolve_data_dir};

/// Everything a handler needs that comes from the invocation context.
pub struct Context {
    pub data_dir: PathBuf,
    pub config: Config,
    pub logs_dir: Option<PathBuf>,
    pub source_override: Option<worklog_sources::SourceKind>,
    pub format: crate::types::OutputFormat,
}

impl Context {
    pub fn config_path(&self) -> PathBuf {
        Config::path_in(&self.data_dir)
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;
    let config = Config::load_from(&Config::path_in(&data_dir))?;

    let source_override = cli
        .source
        .as_deref()
        .map(|name| {
            worklog_sources::SourceKind::parse(name)
                .ok_or_else(|| anyhow::anyhow!("unknown source kind: {}", name))
        })
        .transpose()?;

    let ctx = Context {
        data_dir,
        config,
        logs_dir: cli.logs_dir,
        source_override,
        format: cli.format,
    };

    match cli.command {
        Commands::Analyze {
            start,
            end,
            date,
            last_week,
            no_normalize,
        } => handlers::analyze::handle(&ctx, start, end, date, last_week, no_normalize),

        Commands::Dates { limit } => handlers::dates::handle(&ctx, limit),

        Commands::Source { command } => handlers::source::handle(&ctx, command),

        Commands::Config { command } => handlers::config_cmd::handle(&ctx, command),

        Commands::Map { command } => handlers::map::handle(&ctx, command),

        Commands::Team { command } => handlers::team::handle(&ctx, command),
    }
}
