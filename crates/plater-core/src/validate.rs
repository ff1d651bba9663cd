//! Configuration validation against a JSON schema.
//!
//! The schema is JSON, the validated document is YAML. Violations are
//! reported all at once with their JSON pointer, so a misconfigured file
//! surfaces every problem in a single run.

use std::io::Read;

use jsonschema::error::ValidationErrorKind;
use thiserror::Error;

/// Validation failure.
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("read schema: {0}")]
    ReadSchema(#[from] serde_json::Error),
    #[error("compile schema: {0}")]
    CompileSchema(String),
    #[error("read document: {0}")]
    ReadDocument(#[from] serde_yaml::Error),
    #[error("validate schema:\n{0}")]
    Violations(ViolationList),
}

/// All schema violations found in one document.
#[derive(Debug)]
pub struct ViolationList(Vec<Violation>);

impl ViolationList {
    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for ViolationList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for violation in &self.0 {
            if !first {
                writeln!(f)?;
            }
            first = false;
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

/// One schema violation, located by JSON pointer.
#[derive(Debug)]
pub struct Violation {
    pub pointer: String,
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "- at '{}': {}", self.pointer, self.message)
    }
}

/// Validate a YAML document against a JSON schema.
///
/// All violations are collected; property-presence and exclusion failures get
/// rephrased into stable, human-oriented messages, everything else keeps the
/// schema library's wording.
pub fn validate<S: Read, D: Read>(schema: S, document: D) -> Result<(), ValidateError> {
    let schema: serde_json::Value = serde_json::from_reader(schema)?;
    let validator = jsonschema::validator_for(&schema)
        .map_err(|err| ValidateError::CompileSchema(err.to_string()))?;

    let document: serde_json::Value = serde_yaml::from_reader(document)?;

    let violations: Vec<Violation> = validator
        .iter_errors(&document)
        .map(|err| {
            let mut pointer = err.instance_path.to_string();
            if pointer.is_empty() {
                pointer.push('/');
            }
            let message = match &err.kind {
                ValidationErrorKind::Required { property } => match property.as_str() {
                    Some(name) => format!("missing property '{name}'"),
                    None => format!("missing property {property}"),
                },
                ValidationErrorKind::FalseSchema => "must not be provided".to_owned(),
                _ => err.to_string(),
            };
            Violation { pointer, message }
        })
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidateError::Violations(ViolationList(violations)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = r#"{
        "type": "object",
        "additionalProperties": false,
        "required": ["maintainers"],
        "properties": {
            "maintainers": {
                "type": "array",
                "minItems": 1,
                "items": { "type": "object", "required": ["name"] }
            },
            "platform": { "type": "string", "enum": ["github", "gitlab"] },
            "release": { "not": {} }
        }
    }"#;

    fn run(document: &str) -> Result<(), ValidateError> {
        validate(SCHEMA.as_bytes(), document.as_bytes())
    }

    #[test]
    fn valid_document_passes() {
        run("maintainers:\n  - name: someone\nplatform: github\n").unwrap();
    }

    #[test]
    fn missing_required_property_is_reported_by_name() {
        let err = run("platform: github\n").unwrap_err();
        let text = err.to_string();
        assert!(text.starts_with("validate schema:\n"), "got {text}");
        assert!(text.contains("- at '/': missing property 'maintainers'"), "got {text}");
    }

    #[test]
    fn excluded_property_must_not_be_provided() {
        let err = run("maintainers:\n  - name: someone\nrelease: true\n").unwrap_err();
        assert!(
            err.to_string().contains("- at '/release': must not be provided"),
            "got {err}"
        );
    }

    #[test]
    fn all_violations_are_collected() {
        let err = run("platform: bitbucket\nrelease: true\n").unwrap_err();
        let ValidateError::Violations(violations) = err else {
            panic!("expected violations");
        };
        assert!(violations.len() >= 3, "got {violations}");
    }

    #[test]
    fn nested_violations_carry_their_pointer() {
        let err = run("maintainers:\n  - email: someone@example.com\n").unwrap_err();
        assert!(
            err.to_string()
                .contains("- at '/maintainers/0': missing property 'name'"),
            "got {err}"
        );
    }

    #[test]
    fn invalid_schema_fails_compilation() {
        let err = validate(
            r#"{"type": "nonsense"}"#.as_bytes(),
            "a: 1\n".as_bytes(),
        )
        .unwrap_err();
        assert!(matches!(err, ValidateError::CompileSchema(_)));
    }

    #[test]
    fn unreadable_yaml_is_a_document_error() {
        let err = validate(SCHEMA.as_bytes(), ": [\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ValidateError::ReadDocument(_)));
    }
}
