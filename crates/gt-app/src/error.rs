//! Error types for the gt-app service layer.

use std::path::PathBuf;

/// Application error wrapping the backend crates' errors for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Study error: {0}")]
    Study(String),

    #[error("Failed to read study file: {path}")]
    StudyFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Study validation failed: {0}")]
    Validation(String),

    #[error("Data error: {0}")]
    Data(String),

    #[error("Performance error: {0}")]
    Performance(String),

    #[error("Price data error: {0}")]
    Prices(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for gt-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<gt_data::DataError> for AppError {
    fn from(err: gt_data::DataError) -> Self {
        AppError::Data(err.to_string())
    }
}

impl From<gt_perf::PerfError> for AppError {
    fn from(err: gt_perf::PerfError) -> Self {
        AppError::Performance(err.to_string())
    }
}

impl From<gt_tables::TableError> for AppError {
    fn from(err: gt_tables::TableError) -> Self {
        AppError::Performance(err.to_string())
    }
}

impl From<gt_prices::PricesError> for AppError {
    fn from(err: gt_prices::PricesError) -> Self {
        AppError::Prices(err.to_string())
    }
}
