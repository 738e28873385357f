mod args;
mod commands;
mod handlers;
mod output;
mod types;

pub use args::{Cli, Commands, ConfigCommand, MapCommand, SourceCommand, TeamCommand};
pub use commands::run;
pub use types::OutputFormat;
