//! The `plater validate` command.

use plater_adapters::config;

use crate::cli::ValidateArgs;
use crate::error::CliResult;

/// Schema validation only, no generation.
pub fn execute(args: ValidateArgs) -> CliResult<()> {
    config::validate_file(&args.destdir)?;
    println!("{} is valid", config::CONFIG_FILE);
    Ok(())
}
