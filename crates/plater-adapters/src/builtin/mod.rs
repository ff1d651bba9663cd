//! Builtin template assets shipped with the binary.
//!
//! Sources are embedded at compile time and exposed through a
//! [`MemorySource`], so generation needs no template directory on disk. Each
//! group function returns the descriptors for one shipped artifact; delimiter
//! pairs are chosen per artifact so that outputs embedding literal `{{ }}`
//! markers for downstream tooling (Helm, CI) render untouched.

use std::sync::Arc;

use plater_core::prelude::{
    Delimiters, GeneratePolicy, Template, TemplateBatch, TemplateSource, globs_with_part,
};

use crate::config::ProjectConfig;
use crate::source::MemorySource;

/// All embedded template sources.
pub fn source() -> MemorySource {
    [
        ("makefile.tmpl", include_str!("assets/makefile.tmpl")),
        (
            "makefile-docker.part.tmpl",
            include_str!("assets/makefile-docker.part.tmpl"),
        ),
        ("dockerfile.tmpl", include_str!("assets/dockerfile.tmpl")),
        ("gitlab-ci.yml.tmpl", include_str!("assets/gitlab-ci.yml.tmpl")),
        (
            "gitlab-ci.patch.tmpl",
            include_str!("assets/gitlab-ci.patch.tmpl"),
        ),
        ("readme.md.tmpl", include_str!("assets/readme.md.tmpl")),
        (
            "readme-badges.part.tmpl",
            include_str!("assets/readme-badges.part.tmpl"),
        ),
        ("values.yaml.tmpl", include_str!("assets/values.yaml.tmpl")),
    ]
    .into_iter()
    .collect()
}

/// All builtin template descriptors.
pub fn templates() -> Vec<Template<ProjectConfig>> {
    let mut templates = Vec::new();
    templates.extend(makefile());
    templates.extend(docker());
    templates.extend(gitlab_ci());
    templates.extend(readme());
    templates.extend(chart());
    templates
}

/// The builtin generator: embedded sources plus all builtin descriptors.
pub fn batch(force: bool) -> TemplateBatch<ProjectConfig> {
    let source: Arc<dyn TemplateSource> = Arc::new(source());
    TemplateBatch::new(source, templates()).force(force)
}

fn makefile() -> Vec<Template<ProjectConfig>> {
    vec![
        Template::new("Makefile")
            .delimiters(Delimiters::chevron())
            .globs(globs_with_part("makefile"))
            .remove(|config: &ProjectConfig| config.no_makefile),
    ]
}

fn docker() -> Vec<Template<ProjectConfig>> {
    vec![
        Template::new("Dockerfile")
            .globs(["dockerfile.tmpl"])
            .remove(|config: &ProjectConfig| !config.has_docker()),
    ]
}

fn gitlab_ci() -> Vec<Template<ProjectConfig>> {
    // regenerated on every run, then patched; manual edits don't survive
    vec![
        Template::new(".gitlab-ci.yml")
            .delimiters(Delimiters::chevron())
            .policy(GeneratePolicy::Always)
            .globs(["gitlab-ci.yml.tmpl"])
            .patches(["gitlab-ci.patch.tmpl"])
            .remove(|config: &ProjectConfig| !config.is_ci("gitlab")),
    ]
}

fn readme() -> Vec<Template<ProjectConfig>> {
    vec![Template::new("README.md").globs(globs_with_part("readme.md"))]
}

fn chart() -> Vec<Template<ProjectConfig>> {
    vec![
        Template::new("chart/values.yaml")
            .delimiters(Delimiters::chevron())
            .policy(GeneratePolicy::Always)
            .globs(["values.yaml.tmpl"])
            .remove(|config: &ProjectConfig| config.no_chart),
    ]
}
