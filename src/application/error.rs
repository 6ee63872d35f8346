//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::NameError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Name(#[from] NameError),

    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for application layer operations.
pub type AppResult<T> = Result<T, AppError>;
