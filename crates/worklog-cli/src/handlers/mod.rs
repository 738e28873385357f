pub mod analyze;
pub mod config_cmd;
pub mod dates;
pub mod map;
pub mod source;
pub mod team;

use anyhow::Result;

use crate::commands::Context;
use worklog_sources::{CommitSource, SessionSource, SourceKind, TranscriptSource};

/// Build the extraction backend the config selects, honoring a
/// per-invocation `--source` override.
pub(crate) fn build_source(ctx: &Context) -> Result<Box<dyn SessionSource>> {
    let use_commits = match ctx.source_override {
        Some(kind) => kind == SourceKind::Commits,
        None => ctx.config.use_git_mode,
    };

    if use_commits {
        return Ok(Box::new(CommitSource::with_repos(
            ctx.config.git_repos.iter().cloned(),
        )));
    }

    let root = ctx
        .logs_dir
        .clone()
        .or_else(|| ctx.config.transcripts_dir.clone())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "no transcript directory configured; pass --logs-dir or set transcripts_dir"
            )
        })?;
    Ok(Box::new(TranscriptSource::new(root)))
}
