//! CLI error type and exit-code mapping.

use plater_adapters::config::ConfigError;
use plater_core::error::EngineError;
use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be read, decoded or validated.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The generation engine failed. Individual causes were already logged.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl CliError {
    /// OS exit code: 1 internal/generation failure, 4 configuration error.
    /// (2 is argument parsing, handled by clap before this type exists.)
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 4,
            Self::Engine(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_errors_map_to_4() {
        let err = CliError::from(ConfigError::NotFound(".plater.yaml".into()));
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn engine_errors_map_to_1() {
        let err = CliError::from(EngineError::FailedGeneration);
        assert_eq!(err.exit_code(), 1);
    }
}
