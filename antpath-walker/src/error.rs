//! Step errors

use thiserror::Error;

/// Why an operation could not be applied. The walker logs these and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    #[error("missing argument")]
    MissingArgument,

    #[error("expected a number, got {0}")]
    NotANumber(String),

    #[error("unknown colour {0}")]
    UnknownColor(String),
}
