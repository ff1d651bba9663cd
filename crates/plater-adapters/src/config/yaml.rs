//! `.plater.yaml` reading and writing.

use std::path::Path;

use tracing::debug;

use super::{ConfigError, ProjectConfig};

/// Name of the configuration file at the destination root.
pub const CONFIG_FILE: &str = ".plater.yaml";

const HEADER: &str = "\
# Project configuration maintained by plater. Re-run `plater generate` after editing.
# yaml-language-server: $schema=https://raw.githubusercontent.com/plater-dev/plater/main/.schemas/plater.schema.json
";

/// Read `destdir`'s configuration file, `None` when there is none yet.
pub fn read_config(destdir: &Path) -> Result<Option<ProjectConfig>, ConfigError> {
    let path = destdir.join(CONFIG_FILE);
    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(ConfigError::Read {
                path: path.display().to_string(),
                source: err,
            });
        }
    };

    let config = serde_yaml::from_str(&content).map_err(|err| ConfigError::Decode {
        path: path.display().to_string(),
        source: err,
    })?;
    debug!("configuration loaded from '{}'", path.display());
    Ok(Some(config))
}

/// Keys re-derived by the parsers on every run, never persisted.
const RUNTIME_KEYS: [&str; 4] = ["project_host", "project_name", "project_path", "languages"];

/// Write the configuration back, with a deterministic header.
///
/// Runtime keys are stripped first. Serialization follows the struct's field
/// order, so writing an unchanged configuration reproduces the same bytes.
pub fn write_config(destdir: &Path, config: &ProjectConfig) -> Result<(), ConfigError> {
    let path = destdir.join(CONFIG_FILE);

    let mut document = serde_yaml::to_value(config).map_err(ConfigError::Encode)?;
    if let serde_yaml::Value::Mapping(mapping) = &mut document {
        for key in RUNTIME_KEYS {
            mapping.remove(key);
        }
    }

    let body = serde_yaml::to_string(&document).map_err(ConfigError::Encode)?;
    std::fs::write(&path, format!("{HEADER}{body}")).map_err(|err| ConfigError::Write {
        path: path.display().to_string(),
        source: err,
    })
}
