//! Engine ports (traits) for pluggable collaborators.
//!
//! - `TemplateSource`: read-only provider of template sources, satisfiable by
//!   an embedded asset store, a directory on disk, or a remote store.
//!   Implementations live in `plater-adapters`.
//! - `Parser`: enriches the configuration from repository facts. Parsers run
//!   first, in order, so later parsers may depend on fields set by earlier
//!   ones.
//! - `Generator`: performs filesystem side effects for one logical group of
//!   templates.
//!
//! Both `Parser` and `Generator` have blanket implementations for matching
//! closures, so pipelines can mix strategy objects and plain functions.

use std::path::Path;

use crate::error::EngineResult;

/// Read-only provider of template sources.
///
/// Paths are slash-separated and relative to the provider's root, whatever
/// the backing store.
pub trait TemplateSource: Send + Sync {
    /// Read the source at `path` in full.
    ///
    /// Returns [`EngineError::MissingSource`](crate::error::EngineError) when
    /// no such source exists.
    fn read(&self, path: &str) -> EngineResult<String>;

    /// All source paths matching `pattern`, in deterministic order.
    fn glob(&self, pattern: &str) -> EngineResult<Vec<String>>;
}

/// A function parsing a specific part of the target repository.
///
/// Parsers are the first strategies executed during generation, to get as
/// much information as possible into the configuration (that's why it's a
/// mutable reference).
pub trait Parser<C>: Send + Sync {
    fn enrich(&self, destdir: &Path, config: &mut C) -> EngineResult<()>;
}

impl<C, F> Parser<C> for F
where
    F: Fn(&Path, &mut C) -> EngineResult<()> + Send + Sync,
{
    fn enrich(&self, destdir: &Path, config: &mut C) -> EngineResult<()> {
        self(destdir, config)
    }
}

/// A function generating a specific part of the target repository.
///
/// Generators are called after all parsers, with the final configuration.
///
/// Errors returned by generators are logged rather than propagated eagerly,
/// to avoid one broken group blocking generation of unrelated files. A
/// generator that already logged its own failures should return
/// [`EngineError::FailedGeneration`](crate::error::EngineError) so the
/// orchestrator doesn't log them twice.
pub trait Generator<C>: Send + Sync {
    fn generate(&self, destdir: &Path, config: &C) -> EngineResult<()>;
}

impl<C, F> Generator<C> for F
where
    F: Fn(&Path, &C) -> EngineResult<()> + Send + Sync,
{
    fn generate(&self, destdir: &Path, config: &C) -> EngineResult<()> {
        self(destdir, config)
    }
}
