//! Delimiter pairs for template substitution.
//!
//! Delimiters are chosen per template so that generated files which themselves
//! contain literal `{{ }}` markers for a *different* downstream templating
//! system (Helm charts, CI pipelines) do not collide with the engine's own
//! substitution syntax.

/// The marker pairs used to scan a rendering source for substitution sites.
///
/// A full pair set is carried (variables, blocks, comments) because the
/// rendering engine distinguishes expression sites from control-flow sites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    /// Start marker of an expression site, i.e. `<<`, `{{` or `[[`.
    pub variable_start: String,
    /// End marker of an expression site, i.e. `>>`, `}}` or `]]`.
    pub variable_end: String,
    /// Start marker of a control-flow site, i.e. `<%`, `{%` or `[%`.
    pub block_start: String,
    /// End marker of a control-flow site, i.e. `%>`, `%}` or `%]`.
    pub block_end: String,
    /// Start marker of a comment site.
    pub comment_start: String,
    /// End marker of a comment site.
    pub comment_end: String,
}

impl Delimiters {
    fn preset(pairs: [&str; 6]) -> Self {
        let [vs, ve, bs, be, cs, ce] = pairs.map(str::to_owned);
        Self {
            variable_start: vs,
            variable_end: ve,
            block_start: bs,
            block_end: be,
            comment_start: cs,
            comment_end: ce,
        }
    }

    /// Chevron delimiters `<< >>`, for outputs embedding literal `{{ }}`.
    pub fn chevron() -> Self {
        Self::preset(["<<", ">>", "<%", "%>", "<#", "#>"])
    }

    /// Bracket delimiters `{{ }}`, the conventional default.
    pub fn bracket() -> Self {
        Self::preset(["{{", "}}", "{%", "%}", "{#", "#}"])
    }

    /// Square bracket delimiters `[[ ]]`.
    pub fn square_bracket() -> Self {
        Self::preset(["[[", "]]", "[%", "%]", "[#", "#]"])
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Self::bracket()
    }
}
