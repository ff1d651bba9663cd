//! Helm chart parser: merges chart value overrides into the configuration.

use std::path::Path;

use plater_core::error::EngineResult;
use plater_core::prelude::{Parser, merge_values};
use tracing::debug;

use crate::config::{CONFIG_FILE, ProjectConfig};

/// Builds the `helm` language entry used by the chart templates.
///
/// The whole accumulated configuration is serialized as a structural tree and
/// deep-merged with the developer-maintained `chart/.plater.yaml` overrides
/// (missing file means no overrides). Because it snapshots everything the
/// other parsers produced, this parser must run last in the pipeline.
pub struct HelmParser;

impl Parser<ProjectConfig> for HelmParser {
    fn enrich(&self, destdir: &Path, config: &mut ProjectConfig) -> EngineResult<()> {
        if config.no_chart {
            debug!("chart generation disabled, skipping helm parsing");
            return Ok(());
        }

        let overrides = destdir.join("chart").join(CONFIG_FILE);
        let merged = merge_values(config, &[overrides])?;
        config
            .languages
            .insert("helm".to_owned(), serde_json::Value::Object(merged));
        Ok(())
    }
}
