use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::models::response::ErrorResponse;

// Postgres SQLSTATE codes that mean "this transaction lost a race or ran out of time".
const LOCK_NOT_AVAILABLE: &str = "55P03";
const SERIALIZATION_FAILURE: &str = "40001";
const DEADLOCK_DETECTED: &str = "40P01";
const QUERY_CANCELED: &str = "57014";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error, ToSchema)]
pub enum ServiceError {
    #[error("Validation Error: {0}")]
    Validation(String),
    #[error("Not Found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Invalid Argument: {0}")]
    InvalidArgument(String),
    #[error("Transaction Aborted: {0}")]
    TransactionAborted(String),
    #[error("Storage Error: {0}")]
    Storage(String),
}

impl ServiceError {
    /// Stable, machine-readable error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => "validation_error",
            ServiceError::NotFound(_) => "not_found",
            ServiceError::Conflict(_) => "conflict",
            ServiceError::InvalidArgument(_) => "invalid_argument",
            ServiceError::TransactionAborted(_) => "transaction_aborted",
            ServiceError::Storage(_) => "storage_error",
        }
    }

    /// Only aborted transactions are worth retrying unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ServiceError::TransactionAborted(_))
    }

    /// Message safe to hand back to a caller. Storage details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            ServiceError::Validation(msg)
            | ServiceError::NotFound(msg)
            | ServiceError::Conflict(msg)
            | ServiceError::InvalidArgument(msg)
            | ServiceError::TransactionAborted(msg) => msg.clone(),
            ServiceError::Storage(_) => "Database operation failed".to_string(),
        }
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) | ServiceError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::TransactionAborted(_) => StatusCode::SERVICE_UNAVAILABLE,
            ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ServiceError::Storage(msg) => log::error!("Storage Error: {}", msg),
            ServiceError::TransactionAborted(msg) => log::warn!("Transaction Aborted: {}", msg),
            other => log::warn!("{}", other),
        }

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            status: "error".to_string(),
            kind: self.kind().to_string(),
            message: self.public_message(),
        })
    }
}

// Convert sqlx errors to ServiceError
impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => ServiceError::NotFound("Record not found".to_string()),
            sqlx::Error::PoolTimedOut => {
                ServiceError::TransactionAborted("Timed out waiting for a database connection".to_string())
            }
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                ServiceError::Conflict("Title must be unique".to_string())
            }
            sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
                Some(LOCK_NOT_AVAILABLE | SERIALIZATION_FAILURE | DEADLOCK_DETECTED | QUERY_CANCELED) => {
                    ServiceError::TransactionAborted(format!("Transaction aborted by the database: {}", db_err.message()))
                }
                _ => ServiceError::Storage(err.to_string()),
            },
            _ => ServiceError::Storage(err.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::Validation(err.to_string())
    }
}
