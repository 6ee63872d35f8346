//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::AppError;
use crate::domain::{ErrorKind, NameError};

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    App(#[from] AppError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

impl From<NameError> for CliError {
    fn from(e: NameError) -> Self {
        CliError::App(AppError::Name(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => crate::exitcode::USAGE,
            CliError::App(AppError::Config { .. }) => crate::exitcode::CONFIG,
            CliError::App(AppError::Name(e)) => match e.kind() {
                ErrorKind::IllegalArgument => crate::exitcode::DATAERR,
                ErrorKind::InvalidState | ErrorKind::MethodFailed | ErrorKind::ServiceFailure => {
                    crate::exitcode::SOFTWARE
                }
            },
        }
    }
}
