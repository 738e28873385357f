use anyhow::Result;

use crate::commands::Context;
use crate::types::OutputFormat;

pub fn handle(ctx: &Context, limit: usize) -> Result<()> {
    let source = super::build_source(ctx)?;
    let dates = source.available_dates(limit)?;

    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&dates)?),
        OutputFormat::Plain => {
            if dates.is_empty() {
                println!("No dates with work evidence.");
                return Ok(());
            }
            for date in dates {
                println!("{}", date);
            }
        }
    }
    Ok(())
}
