//! Node ecosystem parser: package.json detection.

use std::path::Path;
use std::sync::LazyLock;

use plater_core::error::{EngineError, EngineResult};
use plater_core::prelude::Parser;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ProjectConfig;

static PACKAGE_MANAGER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(npm|pnpm|yarn|bun)@\d+\.\d+\.\d+(-.+)?$").expect("hardcoded regex")
});

#[derive(Debug, Default, Deserialize, Serialize)]
struct PackageJson {
    name: Option<String>,
    version: Option<String>,
    #[serde(rename = "packageManager")]
    package_manager: Option<String>,
    private: Option<bool>,
    main: Option<String>,
}

/// Detects a Node project through its `package.json`.
///
/// On detection a `node` entry is recorded under `languages` and, unless an
/// earlier parser already found one, the package name becomes the project
/// name. A malformed manifest or an invalid `packageManager` field is a hard
/// error: generating CI against it would produce broken pipelines.
pub struct NodeParser;

impl Parser<ProjectConfig> for NodeParser {
    fn enrich(&self, destdir: &Path, config: &mut ProjectConfig) -> EngineResult<()> {
        let path = destdir.join("package.json");
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(err) => return Err(EngineError::io(format!("read '{}'", path.display()), err)),
        };

        let package: PackageJson =
            serde_json::from_str(&content).map_err(|err| EngineError::Parse {
                path: path.display().to_string(),
                reason: err.to_string(),
            })?;

        if let Some(manager) = &package.package_manager {
            if !PACKAGE_MANAGER.is_match(manager) {
                return Err(EngineError::Parse {
                    path: path.display().to_string(),
                    reason: format!("invalid packageManager '{manager}'"),
                });
            }
        }

        debug!("node project detected");
        if config.project_name.is_empty() {
            if let Some(name) = &package.name {
                config.project_name = name.clone();
            }
        }
        config.languages.insert(
            "node".to_owned(),
            serde_json::to_value(&package).map_err(|err| EngineError::Parse {
                path: path.display().to_string(),
                reason: err.to_string(),
            })?,
        );
        Ok(())
    }
}
