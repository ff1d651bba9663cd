//! Template descriptors and source naming conventions.

use std::fmt;

use super::{Delimiters, GeneratePolicy};

/// Extension for template source files.
pub const TMPL_EXTENSION: &str = ".tmpl";

/// Extension for template fragment files.
///
/// Used together with [`TMPL_EXTENSION`]: fragment files (`name-*.part.tmpl`)
/// only carry definitions referenced by the primary source through
/// include-style statements.
pub const PART_EXTENSION: &str = ".part";

/// Extension for incremental-edit sources. A patch source is itself a
/// template whose rendered output must be valid unified-diff text.
pub const PATCH_EXTENSION: &str = ".patch";

/// Removal predicate over the configuration.
pub type RemoveFn<C> = Box<dyn Fn(&C) -> bool + Send + Sync>;

/// Describes one generated artifact.
///
/// A template carries its delimiter pair, its overwrite policy, one or more
/// source globs (the first glob identifies the primary source; subsequent
/// globs match fragment files), the output path relative to the destination
/// root, an ordered list of patch sources applied after initial generation,
/// and an optional removal predicate.
pub struct Template<C> {
    /// Delimiter pair used to parse the source file(s).
    pub delimiters: Delimiters,

    /// Overwrite policy of the output file.
    pub policy: GeneratePolicy,

    /// Globs or specific files to parse during rendering.
    ///
    /// The first element must be the raw path to the primary source file;
    /// the rest match fragment files (see [`globs_with_part`]).
    pub globs: Vec<String>,

    /// Output file path, relative to the destination directory.
    pub out: String,

    /// Patch sources applied in order after the initial file is generated.
    ///
    /// Each patch is templatized with the same delimiters and helper set as
    /// the main sources and must render to a unified diff (standard
    /// `diff --git` format) against the output file.
    pub patches: Vec<String>,

    /// When set and evaluating true, the output file is deleted instead of
    /// generated.
    pub remove: Option<RemoveFn<C>>,
}

impl<C> Template<C> {
    /// Create a template descriptor for the given output path.
    pub fn new(out: impl Into<String>) -> Self {
        Self {
            delimiters: Delimiters::default(),
            policy: GeneratePolicy::default(),
            globs: Vec::new(),
            out: out.into(),
            patches: Vec::new(),
            remove: None,
        }
    }

    pub fn delimiters(mut self, delimiters: Delimiters) -> Self {
        self.delimiters = delimiters;
        self
    }

    pub fn policy(mut self, policy: GeneratePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn globs(mut self, globs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.globs = globs.into_iter().map(Into::into).collect();
        self
    }

    pub fn patches(mut self, patches: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.patches = patches.into_iter().map(Into::into).collect();
        self
    }

    pub fn remove(mut self, predicate: impl Fn(&C) -> bool + Send + Sync + 'static) -> Self {
        self.remove = Some(Box::new(predicate));
        self
    }

    /// Base name of the output path, used in logs and error messages.
    pub fn out_name(&self) -> &str {
        self.out.rsplit('/').next().unwrap_or(&self.out)
    }
}

impl<C> fmt::Debug for Template<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("delimiters", &self.delimiters)
            .field("policy", &self.policy)
            .field("globs", &self.globs)
            .field("out", &self.out)
            .field("patches", &self.patches)
            .field("remove", &self.remove.is_some())
            .finish()
    }
}

/// Returns a two-element glob list for a source and its fragments.
///
/// Paths are joined textually since a source may live on any
/// [`TemplateSource`](crate::application::TemplateSource) implementation, not
/// necessarily the local filesystem.
///
/// # Example
///
/// ```
/// use plater_core::domain::globs_with_part;
///
/// assert_eq!(
///     globs_with_part("path/to/file.yml"),
///     vec!["path/to/file.yml.tmpl".to_string(), "path/to/file-*.part.tmpl".to_string()],
/// );
/// ```
pub fn globs_with_part(src: &str) -> Vec<String> {
    let name = src.rsplit('/').next().unwrap_or(src);
    let dir = &src[..src.len() - name.len()];

    let stem = match name.rfind('.') {
        Some(0) | None => name,
        Some(dot) => &name[..dot],
    };

    vec![
        format!("{src}{TMPL_EXTENSION}"),
        format!("{dir}{stem}-*{PART_EXTENSION}{TMPL_EXTENSION}"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn globs_with_part_splits_extension() {
        assert_eq!(
            globs_with_part("path/to/file.yml"),
            vec!["path/to/file.yml.tmpl", "path/to/file-*.part.tmpl"]
        );
    }

    #[test]
    fn globs_with_part_without_extension() {
        assert_eq!(
            globs_with_part("makefile"),
            vec!["makefile.tmpl", "makefile-*.part.tmpl"]
        );
    }

    #[test]
    fn globs_with_part_hidden_file() {
        // A leading dot is not an extension separator.
        assert_eq!(
            globs_with_part(".gitlab-ci"),
            vec![".gitlab-ci.tmpl", ".gitlab-ci-*.part.tmpl"]
        );
    }

    #[test]
    fn out_name_is_base_name() {
        let tmpl: Template<()> = Template::new("chart/values.yaml");
        assert_eq!(tmpl.out_name(), "values.yaml");
    }
}
