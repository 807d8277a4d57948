use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    MethodNotAllowed,
    Validation,
    Io,
}

/// Failure raised by the logging service. Nothing is persisted when one of
/// these is returned.
#[derive(Debug, Error)]
pub enum LogServiceError {
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Io(String),
}

impl LogServiceError {
    pub fn code(&self) -> ErrorCode {
        match self {
            LogServiceError::MethodNotAllowed => ErrorCode::MethodNotAllowed,
            LogServiceError::Validation(_) => ErrorCode::Validation,
            LogServiceError::Io(_) => ErrorCode::Io,
        }
    }
}
