//! Errors that end the program.

use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings store error: {0}")]
    Store(#[from] StoreError),
    #[error("API client error: {0}")]
    Api(#[from] campus_lib::error::ApiError),
    #[error("logger error: {0}")]
    Logger(#[from] log::SetLoggerError),
}
