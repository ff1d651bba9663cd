//! The `.plater.yaml` project configuration: serde model, JSON schema and
//! YAML persistence.

use std::collections::BTreeMap;
use std::path::Path;

use plater_core::validate::ValidateError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod yaml;

pub use yaml::{CONFIG_FILE, read_config, write_config};

/// Embedded JSON schema for `.plater.yaml`.
pub const SCHEMA: &str = include_str!("schema.json");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("decode '{path}': {source}")]
    Decode {
        path: String,
        source: serde_yaml::Error,
    },
    #[error("encode configuration: {0}")]
    Encode(serde_yaml::Error),
    #[error("write '{path}': {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
    #[error("'{0}' not found")]
    NotFound(String),
    #[error(transparent)]
    Invalid(#[from] ValidateError),
}

/// User-maintained project description, plus the runtime-only fields filled in
/// by the repository parsers on every run.
///
/// Runtime fields are never written back to `.plater.yaml`: they are
/// re-derived from the repository itself each time, so persisting them would
/// only create drift.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    #[serde(default)]
    pub maintainers: Vec<Maintainer>,

    /// Dependency-update bot, i.e. `renovate` or `dependabot`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ci: Option<Ci>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docker: Option<Docker>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub no_makefile: bool,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub no_chart: bool,

    /// VCS platform override. When unset, the git parser detects it from the
    /// origin remote host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,

    // Runtime fields, re-derived by parsers on every run. They stay in the
    // serialized form (templates render the whole configuration) and are
    // stripped by `write_config` before persistence.
    #[serde(default)]
    pub project_host: String,
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub project_path: String,
    #[serde(default)]
    pub languages: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Maintainer {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ci {
    /// CI platform, i.e. `github` or `gitlab`.
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<CiAuth>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CiAuth {
    /// Token source for maintenance pipelines, i.e. `github-token`,
    /// `personal-token` or `mend.io`.
    pub maintenance: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Docker {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

impl ProjectConfig {
    /// Normalize user input: enum-like strings are matched case-insensitively
    /// everywhere, so fold them once here.
    pub fn ensure_defaults(&mut self) {
        if let Some(bot) = &mut self.bot {
            *bot = bot.to_lowercase();
        }
        if let Some(platform) = &mut self.platform {
            *platform = platform.to_lowercase();
        }
        if let Some(ci) = &mut self.ci {
            ci.name = ci.name.to_lowercase();
            ci.options.sort();
            ci.options.dedup();
        }
        if let Some(docker) = &mut self.docker {
            docker.port.get_or_insert(3000);
        }
    }

    pub fn is_ci(&self, name: &str) -> bool {
        self.ci.as_ref().is_some_and(|ci| ci.name == name)
    }

    pub fn is_bot(&self, name: &str) -> bool {
        self.bot.as_deref() == Some(name)
    }

    pub fn has_docker(&self) -> bool {
        self.docker.is_some()
    }
}

/// Validate `destdir`'s configuration file against the embedded schema.
pub fn validate_file(destdir: &Path) -> Result<(), ConfigError> {
    let path = destdir.join(CONFIG_FILE);
    let document = std::fs::read(&path).map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => ConfigError::NotFound(path.display().to_string()),
        _ => ConfigError::Read {
            path: path.display().to_string(),
            source: err,
        },
    })?;
    plater_core::validate::validate(SCHEMA.as_bytes(), document.as_slice())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_file(dir: &tempfile::TempDir, content: &str) {
        std::fs::write(dir.path().join(CONFIG_FILE), content).unwrap();
    }

    #[test]
    fn ensure_defaults_folds_case_and_fills_port() {
        let mut config = ProjectConfig {
            bot: Some("Renovate".into()),
            platform: Some("GitHub".into()),
            ci: Some(Ci {
                name: "GitLab".into(),
                options: vec!["sonar".into(), "codecov".into(), "sonar".into()],
                auth: None,
            }),
            docker: Some(Docker::default()),
            ..Default::default()
        };
        config.ensure_defaults();

        assert_eq!(config.bot.as_deref(), Some("renovate"));
        assert_eq!(config.platform.as_deref(), Some("github"));
        assert!(config.is_ci("gitlab"));
        assert_eq!(
            config.ci.as_ref().unwrap().options,
            vec!["codecov", "sonar"]
        );
        assert_eq!(config.docker.as_ref().unwrap().port, Some(3000));
    }

    #[test]
    fn predicate_helpers() {
        let config = ProjectConfig {
            bot: Some("renovate".into()),
            ci: Some(Ci {
                name: "gitlab".into(),
                auth: Some(CiAuth {
                    maintenance: "personal-token".into(),
                    release: None,
                }),
                ..Default::default()
            }),
            ..Default::default()
        };

        assert!(config.is_bot("renovate"));
        assert!(!config.is_bot("dependabot"));
        assert!(config.is_ci("gitlab"));
        assert!(!config.has_docker());
    }

    #[test]
    fn schema_accepts_a_complete_configuration() {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            &dir,
            "description: some project\n\
             maintainers:\n  - name: someone\n\
             bot: renovate\n\
             ci:\n  name: gitlab\n  auth:\n    maintenance: personal-token\n\
             docker:\n  port: 8080\n\
             platform: gitlab\n",
        );
        validate_file(dir.path()).unwrap();
    }

    #[test]
    fn schema_requires_maintenance_auth() {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            &dir,
            "maintainers:\n  - name: someone\nci:\n  name: github\n  auth: {}\n",
        );
        let err = validate_file(dir.path()).unwrap_err();
        assert!(
            err.to_string()
                .contains("- at '/ci/auth': missing property 'maintenance'"),
            "got {err}"
        );
    }

    #[test]
    fn schema_rejects_release_auth_on_gitlab() {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            &dir,
            "maintainers:\n  - name: someone\n\
             ci:\n  name: gitlab\n  auth:\n    maintenance: personal-token\n    release: github-token\n",
        );
        let err = validate_file(dir.path()).unwrap_err();
        assert!(
            err.to_string()
                .contains("- at '/ci/auth/release': must not be provided"),
            "got {err}"
        );
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            validate_file(dir.path()).unwrap_err(),
            ConfigError::NotFound(_)
        ));
    }
}
