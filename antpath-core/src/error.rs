//! Error types for antpath operations

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Syntax error raised when a chain cannot be consumed.
///
/// `offset` is a zero-based character (not byte) offset into the input.
/// `found` is the character at that offset, or `None` at end of input.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("Parse error at character {offset} ({}): {message}", display_found(.found))]
pub struct ParseError {
    pub offset: usize,
    pub found: Option<char>,
    pub message: String,
}

fn display_found(found: &Option<char>) -> String {
    match found {
        Some(c) => format!("{:?}", c),
        None => "end of input".to_string(),
    }
}

impl ParseError {
    pub fn new(offset: usize, found: Option<char>, message: impl Into<String>) -> Self {
        Self {
            offset,
            found,
            message: message.into(),
        }
    }
}

/// Sequence builder errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    #[error("Invalid value for {field}: {reason}")]
    InvalidParameter { field: &'static str, reason: String },

    #[error("Authored rule {rule} for {family} does not parse: {source}")]
    Rule {
        family: String,
        rule: String,
        #[source]
        source: ParseError,
    },

    #[error(transparent)]
    Table(#[from] RewriteError),
}

/// Rewrite engine errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RewriteError {
    #[error("Replacement table already has a rule for {name}")]
    DuplicateRule { name: String },

    #[error("Generation {generation} has {length} operations, over the limit of {limit}")]
    SequenceTooLong {
        generation: usize,
        length: usize,
        limit: usize,
    },
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration file path (use --config or ANTPATH_CONFIG)")]
    MissingConfigPath,

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("Unknown fractal family: {0}")]
    UnknownFamily(String),
}

/// Master error type for all antpath errors.
#[derive(Debug, Error)]
pub enum AntpathError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    #[error("Rewrite error: {0}")]
    Rewrite(#[from] RewriteError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for antpath operations.
pub type AntpathResult<T> = Result<T, AntpathError>;
