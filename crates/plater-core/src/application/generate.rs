//! Top-level orchestration: parser pipeline, then template batches.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error};

use crate::domain::Template;
use crate::error::{EngineError, EngineResult, ErrorList};

use super::apply::apply_template;
use super::ports::{Generator, Parser, TemplateSource};

/// Main entry point of the engine.
///
/// Executes all parsers in order against the destination repository; their
/// errors are collected (not short-circuited) and joined, and any failure
/// aborts the run before generation starts. Mutations already applied to the
/// configuration are not rolled back.
///
/// Then every generator runs against the enriched configuration. A generator
/// failure is logged (unless it's the [`EngineError::FailedGeneration`]
/// sentinel, which the generator is expected to have logged itself) and
/// counted; any failure makes the whole run return the sentinel, but never
/// prevents the remaining generators from running.
///
/// On success the enriched configuration is handed back to the caller for
/// optional persistence.
pub fn generate<C: Serialize>(
    destdir: &Path,
    mut config: C,
    parsers: &[Box<dyn Parser<C>>],
    generators: &[Box<dyn Generator<C>>],
) -> EngineResult<C> {
    // parse repository
    let mut errs = ErrorList::new();
    for parser in parsers {
        errs.collect(parser.enrich(destdir, &mut config));
    }
    errs.into_result()?;
    debug!("repository parsed, {} generator(s) to run", generators.len());

    // execute generators
    let mut failed = 0usize;
    for generator in generators {
        if let Err(err) = generator.generate(destdir, &config) {
            if !matches!(err, EngineError::FailedGeneration) {
                error!("{err}");
            }
            failed += 1;
        }
    }
    if failed > 0 {
        return Err(EngineError::FailedGeneration);
    }
    Ok(config)
}

/// A generator batching several templates under one reporting unit.
///
/// Each template is applied independently: individual failures are logged
/// with the output file's base name and only the
/// [`EngineError::FailedGeneration`] sentinel is returned, so one broken
/// template doesn't block generation of unrelated files.
pub struct TemplateBatch<C> {
    source: Arc<dyn TemplateSource>,
    templates: Vec<Template<C>>,
    force: bool,
}

impl<C> TemplateBatch<C> {
    pub fn new(source: Arc<dyn TemplateSource>, templates: Vec<Template<C>>) -> Self {
        Self {
            source,
            templates,
            force: false,
        }
    }

    /// Force regeneration of `IfAbsent` templates, as if they were `Always`.
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

impl<C: Serialize + Send + Sync> Generator<C> for TemplateBatch<C> {
    fn generate(&self, destdir: &Path, config: &C) -> EngineResult<()> {
        let mut failed = 0usize;
        for template in &self.templates {
            if let Err(err) =
                apply_template(self.source.as_ref(), destdir, template, config, self.force)
            {
                failed += 1;
                error!("failed to generate '{}': {err}", template.out_name());
            }
        }
        if failed > 0 {
            return Err(EngineError::FailedGeneration);
        }
        Ok(())
    }
}
