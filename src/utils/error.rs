// Error handling utilities
// Author: Gabriel Demetrios Lafis

use thiserror::Error;

use crate::data::DataError;
use crate::processing::{ProcessingError, QueryError};
use super::ConfigError;

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Data(#[from] DataError),
    #[error("{0}")]
    Query(#[from] QueryError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid command table: {0}")]
    CommandTable(String),
}

impl AppError {
    /// Whether this error was caused by a missing input file
    pub fn is_source_not_found(&self) -> bool {
        matches!(self, AppError::Data(DataError::SourceNotFound(_)))
    }
}

impl From<ProcessingError> for AppError {
    fn from(err: ProcessingError) -> Self {
        // Surface data errors directly so the missing-file case stays recognisable
        match err {
            ProcessingError::Data(data) => AppError::Data(data),
        }
    }
}

/// Result type alias for AppError
pub type AppResult<T> = Result<T, AppError>;
