//! Error type for the command-line front end

use antpath_core::{AntpathError, ConfigError, ParseError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Antpath(#[from] AntpathError),

    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to encode TOML: {0}")]
    Toml(#[from] toml::ser::Error),

    #[error("Failed to initialise logging: {0}")]
    Logging(String),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::Antpath(err.into())
    }
}

impl From<ParseError> for CliError {
    fn from(err: ParseError) -> Self {
        CliError::Antpath(err.into())
    }
}

pub type CliResult<T> = Result<T, CliError>;
