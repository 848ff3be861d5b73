use std::path::PathBuf;

use console::style;

use crate::cli::commands::ValidateArgs;
use crate::config;
use crate::errors::TriageError;

pub async fn handle_validate(args: ValidateArgs) -> Result<(), TriageError> {
    let path = PathBuf::from(&args.config);
    let parsed = config::parse_config(&path).await?;
    println!("{} Configuration is valid: {}", style("✔").green(), args.config);
    println!("  technical impact rule: {}", parsed.impact_rule());
    println!("  output: {} (delimiter '{}')", parsed.output_format(), parsed.output_delimiter());
    println!("  workers: {}", parsed.workers());
    Ok(())
}
