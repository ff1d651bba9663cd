//! Unified error handling for the generation engine.
//!
//! The engine aggregates rather than short-circuits in two places (the parser
//! pipeline and patch application), so alongside the usual `thiserror` enum
//! this module provides [`ErrorList`], a joined list of errors rendered one
//! per line.

use std::fmt;

use thiserror::Error;

/// Root error type for engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The template output path escapes the destination root.
    #[error("unsafe output path '{0}'")]
    UnsafePath(String),

    /// Invalid glob syntax in a template source pattern.
    #[error("invalid glob '{pattern}': {source}")]
    Glob {
        pattern: String,
        source: glob::PatternError,
    },

    /// A source pattern matched no file in the template source.
    #[error("no template source matches '{0}'")]
    MissingSource(String),

    /// Template compilation failed (syntax error in a source file).
    #[error("parse template file(s): {0}")]
    ParseTemplate(#[source] minijinja::Error),

    /// Template execution failed (e.g. an operation on an undefined field).
    #[error("template execution: {0}")]
    ExecuteTemplate(#[source] minijinja::Error),

    /// A rendered patch is not valid unified-diff text.
    #[error("parse patch '{name}': {reason}")]
    ParsePatch { name: String, reason: String },

    /// A diff entry could not be applied to the output file.
    #[error("apply diff number '{index}' of '{name}': {reason}")]
    ApplyDiff {
        index: usize,
        name: String,
        reason: String,
    },

    /// A repository file could not be interpreted by a parser.
    #[error("parse '{path}': {reason}")]
    Parse { path: String, reason: String },

    /// An override document could not be read or merged.
    #[error("merge '{path}': {reason}")]
    Merge { path: String, reason: String },

    /// Filesystem failure, tagged with the operation that produced it.
    #[error("{context}: {source}")]
    Io {
        context: String,
        source: std::io::Error,
    },

    /// Several errors joined together, one rendered per line.
    #[error("{0}")]
    Aggregate(ErrorList),

    /// Sentinel returned when at least one file couldn't be properly
    /// generated. Every individual failure is logged during processing, so
    /// this stays small and stable for top-level callers.
    #[error("some error(s) occurred during generation")]
    FailedGeneration,
}

impl EngineError {
    /// Wrap an io::Error with the operation that produced it.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

/// Convenient result type alias.
pub type EngineResult<T> = Result<T, EngineError>;

/// An ordered collection of engine errors, joined for display.
///
/// Mirrors the "collect, don't short-circuit" contract of the parser pipeline
/// and of patch application: every cause is kept and rendered on its own line.
#[derive(Debug, Default)]
pub struct ErrorList(Vec<EngineError>);

impl ErrorList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, err: EngineError) {
        self.0.push(err);
    }

    /// Record the error of a failed result, passing successes through.
    pub fn collect<T>(&mut self, result: EngineResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.push(err);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Collapse into a single result: `Ok(())` when empty, the sole error
    /// when there is exactly one, an [`EngineError::Aggregate`] otherwise.
    pub fn into_result(mut self) -> EngineResult<()> {
        match self.0.len() {
            0 => Ok(()),
            1 => Err(self.0.remove(0)),
            _ => Err(EngineError::Aggregate(self)),
        }
    }
}

impl fmt::Display for ErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl IntoIterator for ErrorList {
    type Item = EngineError;
    type IntoIter = std::vec::IntoIter<EngineError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_is_ok() {
        assert!(ErrorList::new().into_result().is_ok());
    }

    #[test]
    fn single_error_is_returned_unwrapped() {
        let mut errs = ErrorList::new();
        errs.push(EngineError::MissingSource("a.tmpl".into()));
        let err = errs.into_result().unwrap_err();
        assert!(matches!(err, EngineError::MissingSource(_)));
    }

    #[test]
    fn multiple_errors_join_one_per_line() {
        let mut errs = ErrorList::new();
        errs.push(EngineError::MissingSource("a.tmpl".into()));
        errs.push(EngineError::UnsafePath("../b".into()));
        let err = errs.into_result().unwrap_err();
        let text = err.to_string();
        assert!(text.contains("no template source matches 'a.tmpl'"));
        assert!(text.contains("unsafe output path '../b'"));
        assert_eq!(text.lines().count(), 2);
    }
}
