//! Directory-backed template source using std::fs and walkdir.

use std::path::{Path, PathBuf};

use plater_core::error::{EngineError, EngineResult};
use plater_core::prelude::TemplateSource;

/// Template source rooted at a local directory.
///
/// Paths handed to [`read`](TemplateSource::read) and matched by
/// [`glob`](TemplateSource::glob) are relative to the root and always
/// slash-separated, whatever the platform. Glob results are sorted so that
/// primary-source selection stays deterministic.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl TemplateSource for DirSource {
    fn read(&self, path: &str) -> EngineResult<String> {
        let full = self.root.join(path);
        std::fs::read_to_string(&full).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => EngineError::MissingSource(path.to_owned()),
            _ => EngineError::io(format!("read '{}'", full.display()), err),
        })
    }

    fn glob(&self, pattern: &str) -> EngineResult<Vec<String>> {
        let pattern = glob::Pattern::new(pattern).map_err(|source| EngineError::Glob {
            pattern: pattern.to_owned(),
            source,
        })?;

        let mut matches = Vec::new();
        for entry in walkdir::WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
        {
            let Some(relative) = relative_slash_path(&self.root, entry.path()) else {
                continue;
            };
            if pattern.matches(&relative) {
                matches.push(relative);
            }
        }
        matches.sort();
        Ok(matches)
    }
}

fn relative_slash_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<&str> = relative
        .components()
        .map(|component| component.as_os_str().to_str())
        .collect::<Option<_>>()?;
    Some(parts.join("/"))
}
