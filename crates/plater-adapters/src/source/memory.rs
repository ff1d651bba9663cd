//! In-memory template source, used for embedded assets and tests.

use std::collections::BTreeMap;

use plater_core::error::{EngineError, EngineResult};
use plater_core::prelude::TemplateSource;

/// Template source backed by an ordered in-memory map.
///
/// The ordered map keeps glob results deterministic without an explicit sort.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: BTreeMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source file under a slash-separated relative path.
    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }
}

impl<P: Into<String>, C: Into<String>> FromIterator<(P, C)> for MemorySource {
    fn from_iter<I: IntoIterator<Item = (P, C)>>(iter: I) -> Self {
        Self {
            files: iter
                .into_iter()
                .map(|(path, content)| (path.into(), content.into()))
                .collect(),
        }
    }
}

impl TemplateSource for MemorySource {
    fn read(&self, path: &str) -> EngineResult<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| EngineError::MissingSource(path.to_owned()))
    }

    fn glob(&self, pattern: &str) -> EngineResult<Vec<String>> {
        let pattern = glob::Pattern::new(pattern).map_err(|source| EngineError::Glob {
            pattern: pattern.to_owned(),
            source,
        })?;
        Ok(self
            .files
            .keys()
            .filter(|path| pattern.matches(path))
            .cloned()
            .collect())
    }
}
