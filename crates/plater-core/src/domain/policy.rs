//! Generation policies: when to (re)write an output file.

use std::path::Path;

/// Overwrite policy of a single template output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GeneratePolicy {
    /// Never overwrite a file that already exists, whatever its content.
    /// This preserves user edits to generated-once artifacts.
    #[default]
    IfAbsent,

    /// Regenerate unconditionally. Use for derived, non-user-editable
    /// artifacts.
    Always,
}

impl GeneratePolicy {
    /// Whether the file at `out` should be generated under this policy.
    ///
    /// An external `force` flag (e.g. a `--force` CLI switch) is treated
    /// identically to [`GeneratePolicy::Always`].
    pub fn should_generate(self, out: &Path, force: bool) -> bool {
        match self {
            _ if force => true,
            GeneratePolicy::Always => true,
            GeneratePolicy::IfAbsent => !out.exists(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_generates_over_existing_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(GeneratePolicy::Always.should_generate(file.path(), false));
    }

    #[test]
    fn if_absent_skips_existing_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(!GeneratePolicy::IfAbsent.should_generate(file.path(), false));
    }

    #[test]
    fn if_absent_generates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(GeneratePolicy::IfAbsent.should_generate(&dir.path().join("missing"), false));
    }

    #[test]
    fn force_overrides_if_absent() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(GeneratePolicy::IfAbsent.should_generate(file.path(), true));
    }
}
