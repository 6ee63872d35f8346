//! Application layer: reports and use cases built on top of the domain

pub mod error;
pub mod report;

pub use error::{AppError, AppResult};
pub use report::NameReport;
