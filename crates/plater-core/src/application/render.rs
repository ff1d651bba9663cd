//! Rendering internals: per-template environment construction and the shared
//! helper set.
//!
//! Each applied template gets a fresh [`minijinja::Environment`] configured
//! with the template's delimiter pair, every glob-matched source registered
//! under its base name (so fragments are reachable through include-style
//! statements), and the helper functions below.
//!
//! ## Helpers
//!
//! - `cut_after(sep)`: cut the input at the first separator appearance.
//! - `to_yaml`: re-serialize any value as YAML. Always returns a string, even
//!   on serialization error (empty string), so it is safe inside templates.
//! - `merge(base, maps...)`: structural override-wins map merge.
//! - `urlencode` (builtin): query-parameter escaping.

use minijinja::syntax::SyntaxConfig;
use minijinja::value::Rest;
use minijinja::{Environment, Value};
use serde::Serialize;

use crate::domain::Delimiters;
use crate::error::{EngineError, EngineResult};
use crate::merge::deep_merge;

use super::TemplateSource;

/// Base name of a slash-separated source path.
pub(crate) fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Build an environment honoring the given delimiter pair.
fn environment(delimiters: &Delimiters) -> EngineResult<Environment<'static>> {
    let syntax = SyntaxConfig::builder()
        .variable_delimiters(delimiters.variable_start.clone(), delimiters.variable_end.clone())
        .block_delimiters(delimiters.block_start.clone(), delimiters.block_end.clone())
        .comment_delimiters(delimiters.comment_start.clone(), delimiters.comment_end.clone())
        .build()
        .map_err(EngineError::ParseTemplate)?;

    let mut env = Environment::new();
    env.set_syntax(syntax);
    env.add_filter("cut_after", cut_after);
    env.add_filter("to_yaml", to_yaml);
    env.add_function("merge", merge);
    Ok(env)
}

/// Compile all glob-matched sources and execute the primary one.
///
/// The first glob identifies the primary source; every match of every glob is
/// registered so the primary file can reference fragment definitions. Each
/// glob must match at least one source.
pub(crate) fn render_globs<C: Serialize>(
    source: &dyn TemplateSource,
    delimiters: &Delimiters,
    globs: &[String],
    config: &C,
) -> EngineResult<String> {
    let mut env = environment(delimiters)?;

    let mut primary: Option<String> = None;
    for pattern in globs {
        let matches = source.glob(pattern)?;
        if matches.is_empty() {
            return Err(EngineError::MissingSource(pattern.clone()));
        }
        for path in matches {
            let name = base_name(&path).to_owned();
            env.add_template_owned(name.clone(), source.read(&path)?)
                .map_err(EngineError::ParseTemplate)?;
            if primary.is_none() {
                primary = Some(name);
            }
        }
    }

    // globs is checked non-empty by the caller
    let primary = primary.ok_or_else(|| EngineError::MissingSource(String::new()))?;
    execute(&env, &primary, config)
}

/// Compile and execute a single source file (used for patch sources).
pub(crate) fn render_one<C: Serialize>(
    source: &dyn TemplateSource,
    delimiters: &Delimiters,
    path: &str,
    config: &C,
) -> EngineResult<String> {
    let mut env = environment(delimiters)?;
    let name = base_name(path).to_owned();
    env.add_template_owned(name.clone(), source.read(path)?)
        .map_err(EngineError::ParseTemplate)?;
    execute(&env, &name, config)
}

fn execute<C: Serialize>(env: &Environment<'_>, name: &str, config: &C) -> EngineResult<String> {
    let template = env.get_template(name).map_err(EngineError::ParseTemplate)?;
    template.render(config).map_err(EngineError::ExecuteTemplate)
}

/// Cut the input string at the first separator appearance.
fn cut_after(value: String, sep: String) -> String {
    match value.split_once(&sep) {
        Some((before, _)) => before.to_owned(),
        None => value,
    }
}

/// Re-serialize a value as YAML, without the trailing newline.
///
/// Serialization errors are swallowed into an empty string by design: this is
/// called from inside templates, where a hard failure would abort the whole
/// file for a cosmetic block.
fn to_yaml(value: Value) -> String {
    serde_yaml::to_string(&value)
        .map(|out| out.trim_end_matches('\n').to_owned())
        .unwrap_or_default()
}

/// Merge all further maps into `base`, later arguments winning.
fn merge(base: Value, rest: Rest<Value>) -> Result<Value, minijinja::Error> {
    let as_tree = |value: &Value| {
        serde_json::to_value(value).map_err(|err| {
            minijinja::Error::new(minijinja::ErrorKind::InvalidOperation, err.to_string())
        })
    };

    let mut acc = as_tree(&base)?;
    if !acc.is_object() {
        return Err(minijinja::Error::new(
            minijinja::ErrorKind::InvalidOperation,
            "merge expects map arguments",
        ));
    }
    for value in rest.iter() {
        let overrides = as_tree(value)?;
        if !overrides.is_object() {
            return Err(minijinja::Error::new(
                minijinja::ErrorKind::InvalidOperation,
                "merge expects map arguments",
            ));
        }
        deep_merge(&mut acc, overrides);
    }
    Ok(Value::from_serialize(&acc))
}
