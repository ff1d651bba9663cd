//! Applying one template: remove, skip, render, write, patch.

use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::domain::Template;
use crate::error::{EngineError, EngineResult};

use super::TemplateSource;
use super::patch::apply_patches;
use super::render;

/// Write or delete the output of a single template.
///
/// The sequence is:
/// 1. sandbox the output path against traversal and join it under `destdir`;
/// 2. when the removal predicate evaluates true, delete the output (a missing
///    file is not an error) and stop;
/// 3. evaluate the generation policy, skipping rendering when it refuses;
/// 4. render the glob-matched sources and write the result, creating parent
///    directories as needed (shell scripts get executable permission);
/// 5. apply declared patches on top of the just-written (or pre-existing)
///    file.
pub fn apply_template<C: Serialize>(
    source: &dyn TemplateSource,
    destdir: &Path,
    template: &Template<C>,
    config: &C,
    force: bool,
) -> EngineResult<()> {
    let out = destdir.join(localize(&template.out)?);
    let name = template.out_name();

    // remove file in case the predicate is asking for it
    if let Some(remove) = &template.remove {
        if remove(config) {
            if let Err(err) = remove_output(&out) {
                warn!("failed to delete '{name}': {err}");
            }
            return Ok(());
        }
    }

    if !template.policy.should_generate(&out, force) {
        info!("not generating '{name}' since it already exists");
    } else if template.globs.is_empty() {
        warn!("empty template 'globs', skipping '{name}' generation");
    } else {
        let rendered = render::render_globs(source, &template.delimiters, &template.globs, config)?;
        write_rendered(&out, &rendered)?;
    }

    if !template.patches.is_empty() {
        info!("applying patches on '{name}'");
        return apply_patches(source, destdir, template, config);
    }
    Ok(())
}

/// Constrain a template output path to stay below the destination root.
///
/// Rejects absolute paths, drive prefixes and parent-directory components;
/// generation is always done on the local filesystem under `destdir`.
pub(crate) fn localize(out: &str) -> EngineResult<PathBuf> {
    let path = Path::new(out);
    let mut localized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => localized.push(part),
            Component::CurDir => {}
            _ => return Err(EngineError::UnsafePath(out.to_owned())),
        }
    }
    if localized.as_os_str().is_empty() {
        return Err(EngineError::UnsafePath(out.to_owned()));
    }
    Ok(localized)
}

fn remove_output(out: &Path) -> std::io::Result<()> {
    match std::fs::remove_file(out) {
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

/// Write rendered content, refreshing permissions even when the file existed.
fn write_rendered(out: &Path, content: &str) -> EngineResult<()> {
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|err| EngineError::io(format!("create directory '{}'", parent.display()), err))?;
    }
    std::fs::write(out, content)
        .map_err(|err| EngineError::io(format!("write '{}'", out.display()), err))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let mode = if out.extension().is_some_and(|ext| ext == "sh") {
            0o755
        } else {
            0o644
        };
        std::fs::set_permissions(out, std::fs::Permissions::from_mode(mode))
            .map_err(|err| EngineError::io(format!("chmod '{}'", out.display()), err))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GeneratePolicy;
    use std::collections::BTreeMap;

    struct MapSource(BTreeMap<String, String>);

    impl MapSource {
        fn new(entries: &[(&str, &str)]) -> Self {
            Self(
                entries
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            )
        }
    }

    impl TemplateSource for MapSource {
        fn read(&self, path: &str) -> EngineResult<String> {
            self.0
                .get(path)
                .cloned()
                .ok_or_else(|| EngineError::MissingSource(path.into()))
        }

        fn glob(&self, pattern: &str) -> EngineResult<Vec<String>> {
            let pattern = glob::Pattern::new(pattern).map_err(|source| EngineError::Glob {
                pattern: pattern.into(),
                source,
            })?;
            Ok(self
                .0
                .keys()
                .filter(|path| pattern.matches(path))
                .cloned()
                .collect())
        }
    }

    #[derive(serde::Serialize)]
    struct Config {
        name: String,
        drop: bool,
    }

    fn config(drop: bool) -> Config {
        Config {
            name: "demo".into(),
            drop,
        }
    }

    #[test]
    fn renders_and_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let source = MapSource::new(&[("app.txt.tmpl", "hello {{ name }}\n")]);
        let template: Template<Config> = Template::new("app.txt").globs(["app.txt.tmpl"]);

        apply_template(&source, dir.path(), &template, &config(false), false).unwrap();
        let written = std::fs::read_to_string(dir.path().join("app.txt")).unwrap();
        assert_eq!(written, "hello demo\n");
    }

    #[test]
    fn if_absent_preserves_existing_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("app.txt");
        std::fs::write(&out, "user edited").unwrap();

        let source = MapSource::new(&[("app.txt.tmpl", "hello {{ name }}\n")]);
        let template: Template<Config> = Template::new("app.txt").globs(["app.txt.tmpl"]);

        apply_template(&source, dir.path(), &template, &config(false), false).unwrap();
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "user edited");
    }

    #[test]
    fn always_policy_replaces_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("app.txt");
        std::fs::write(&out, "user edited").unwrap();

        let source = MapSource::new(&[("app.txt.tmpl", "hello {{ name }}\n")]);
        let template: Template<Config> = Template::new("app.txt")
            .globs(["app.txt.tmpl"])
            .policy(GeneratePolicy::Always);

        apply_template(&source, dir.path(), &template, &config(false), false).unwrap();
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "hello demo\n");
    }

    #[test]
    fn force_behaves_like_always() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("app.txt");
        std::fs::write(&out, "user edited").unwrap();

        let source = MapSource::new(&[("app.txt.tmpl", "hello {{ name }}\n")]);
        let template: Template<Config> = Template::new("app.txt").globs(["app.txt.tmpl"]);

        apply_template(&source, dir.path(), &template, &config(false), true).unwrap();
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "hello demo\n");
    }

    #[test]
    fn remove_predicate_deletes_output() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("app.txt");
        std::fs::write(&out, "anything").unwrap();

        let source = MapSource::new(&[("app.txt.tmpl", "hello\n")]);
        let template: Template<Config> = Template::new("app.txt")
            .globs(["app.txt.tmpl"])
            .remove(|c: &Config| c.drop);

        apply_template(&source, dir.path(), &template, &config(true), false).unwrap();
        assert!(!out.exists());

        // removing again is idempotent
        apply_template(&source, dir.path(), &template, &config(true), false).unwrap();
        assert!(!out.exists());
    }

    #[test]
    fn parent_directories_are_created() {
        let dir = tempfile::tempdir().unwrap();
        let source = MapSource::new(&[("values.yaml.tmpl", "name: {{ name }}\n")]);
        let template: Template<Config> =
            Template::new("chart/values.yaml").globs(["values.yaml.tmpl"]);

        apply_template(&source, dir.path(), &template, &config(false), false).unwrap();
        assert!(dir.path().join("chart/values.yaml").exists());
    }

    #[cfg(unix)]
    #[test]
    fn shell_scripts_are_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let source = MapSource::new(&[("hook.sh.tmpl", "#!/bin/sh\necho {{ name }}\n")]);
        let template: Template<Config> = Template::new("hook.sh").globs(["hook.sh.tmpl"]);

        apply_template(&source, dir.path(), &template, &config(false), false).unwrap();
        let mode = std::fs::metadata(dir.path().join("hook.sh"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn traversal_in_out_path_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let source = MapSource::new(&[("app.txt.tmpl", "x")]);
        let template: Template<Config> = Template::new("../escape.txt").globs(["app.txt.tmpl"]);

        let err =
            apply_template(&source, dir.path(), &template, &config(false), false).unwrap_err();
        assert!(matches!(err, EngineError::UnsafePath(_)));
    }

    #[test]
    fn empty_globs_skip_generation() {
        let dir = tempfile::tempdir().unwrap();
        let source = MapSource::new(&[]);
        let template: Template<Config> = Template::new("app.txt");

        apply_template(&source, dir.path(), &template, &config(false), false).unwrap();
        assert!(!dir.path().join("app.txt").exists());
    }

    #[test]
    fn localize_accepts_nested_relative_paths() {
        assert_eq!(localize("a/b/c.txt").unwrap(), PathBuf::from("a/b/c.txt"));
    }

    #[test]
    fn localize_rejects_absolute_paths() {
        assert!(matches!(
            localize("/etc/passwd"),
            Err(EngineError::UnsafePath(_))
        ));
    }
}
