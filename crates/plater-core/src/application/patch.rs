//! Incremental edits: templatized unified-diff patches.
//!
//! Some generated files must receive small, context-dependent edits without
//! being fully re-rendered, preserving surrounding user content. Each patch
//! source is a template (same delimiter and helper rules as the main sources)
//! whose rendered output must be unified-diff text in the standard
//! `diff --git` format. A patch template that renders to nothing is a no-op,
//! which lets patches guard themselves with template conditionals.

use std::path::Path;

use serde::Serialize;

use crate::domain::Template;
use crate::error::{EngineError, EngineResult, ErrorList};

use super::TemplateSource;
use super::apply::localize;
use super::render;

/// Apply the patches declared by `template` to its output file.
///
/// It's the continuance of [`apply_template`](super::apply_template), which
/// only generates (if necessary) the initial file. Rendering failures,
/// diff-parse failures and per-hunk apply failures are all collected rather
/// than short-circuited, then returned as a joined error.
pub fn apply_patches<C: Serialize>(
    source: &dyn TemplateSource,
    destdir: &Path,
    template: &Template<C>,
    config: &C,
) -> EngineResult<()> {
    let out = destdir.join(localize(&template.out)?);

    let mut errs = ErrorList::new();
    for patch in &template.patches {
        let name = render::base_name(patch);

        let rendered =
            match errs.collect(render::render_one(source, &template.delimiters, patch, config)) {
                Some(rendered) => rendered,
                None => continue,
            };

        for (index, entry) in split_entries(&rendered).iter().enumerate() {
            let diff = match diffy::Patch::from_str(entry) {
                Ok(diff) => diff,
                Err(err) => {
                    errs.push(EngineError::ParsePatch {
                        name: name.to_owned(),
                        reason: err.to_string(),
                    });
                    continue;
                }
            };
            errs.collect(apply_entry(&out, index, name, &diff));
        }
    }
    errs.into_result()
}

/// Apply one diff entry to the output file, creating it empty when absent.
fn apply_entry(out: &Path, index: usize, name: &str, diff: &diffy::Patch<'_, str>) -> EngineResult<()> {
    let current = match std::fs::read_to_string(out) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(err) => return Err(EngineError::io(format!("read '{}'", out.display()), err)),
    };

    let patched = diffy::apply(&current, diff).map_err(|err| EngineError::ApplyDiff {
        index,
        name: name.to_owned(),
        reason: err.to_string(),
    })?;

    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|err| EngineError::io(format!("create directory '{}'", parent.display()), err))?;
    }
    std::fs::write(out, patched)
        .map_err(|err| EngineError::io(format!("write '{}'", out.display()), err))
}

/// Split rendered patch text into per-file unified-diff entries.
///
/// Entries are delimited by `diff --git` lines; metadata lines (`index`,
/// mode changes) before the `---` header are dropped because the diff parser
/// only consumes the header and hunks. Blocks without a header (including a
/// fully empty rendering) yield no entries.
fn split_entries(rendered: &str) -> Vec<String> {
    let mut blocks: Vec<Vec<&str>> = Vec::new();
    for line in rendered.lines() {
        if line.starts_with("diff --git ") || blocks.is_empty() {
            blocks.push(Vec::new());
            if line.starts_with("diff --git ") {
                continue;
            }
        }
        if let Some(block) = blocks.last_mut() {
            block.push(line);
        }
    }

    blocks
        .into_iter()
        .filter_map(|lines| {
            let header = lines.iter().position(|line| line.starts_with("--- "))?;
            let mut entry = lines[header..].join("\n");
            entry.push('\n');
            Some(entry)
        })
        .collect()
}
