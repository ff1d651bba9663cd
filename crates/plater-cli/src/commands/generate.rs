//! The `plater generate` command.

use plater_adapters::builtin;
use plater_adapters::config::{self, ProjectConfig};
use plater_adapters::parsers;
use plater_core::prelude::{Generator, generate};
use tracing::{debug, info};

use crate::cli::GenerateArgs;
use crate::error::CliResult;

/// Load and validate the configuration, run the pipeline, persist the result.
///
/// A repository without a `.plater.yaml` runs from defaults; the file is only
/// written back when it already existed, so a bare run never plants an
/// incomplete configuration the next run would reject.
pub fn execute(args: GenerateArgs) -> CliResult<()> {
    let destdir = args.destdir.as_path();

    let loaded = config::read_config(destdir)?;
    let had_config = loaded.is_some();
    let mut config = match loaded {
        Some(config) => {
            // only validate what the user actually wrote
            config::validate_file(destdir)?;
            config
        }
        None => {
            debug!("no configuration file yet, running from defaults");
            ProjectConfig::default()
        }
    };
    config.ensure_defaults();

    let parsers = parsers::pipeline();
    let generators: Vec<Box<dyn Generator<ProjectConfig>>> =
        vec![Box::new(builtin::batch(args.force))];

    let enriched = generate(destdir, config, &parsers, &generators)?;
    if had_config {
        config::write_config(destdir, &enriched)?;
    }

    info!("generation completed in '{}'", destdir.display());
    Ok(())
}
