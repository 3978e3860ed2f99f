use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use thiserror::Error;

/// Custom error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Aggregation failed: {0}")]
    AggregationFailed(String),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
}

impl ServiceError {
    /// Wraps a failed sub-read of a multi-step fetch, keeping the underlying
    /// message. Already-wrapped errors pass through untouched.
    pub fn aggregation(err: ServiceError) -> Self {
        match err {
            ServiceError::AggregationFailed(_) => err,
            other => ServiceError::AggregationFailed(other.to_string()),
        }
    }

    /// Message safe to hand back to the caller. Server-side failures are
    /// reduced to a generic text; the detail only goes to the logs.
    pub fn public_message(&self) -> String {
        match self {
            ServiceError::Validation(msg)
            | ServiceError::Conflict(msg)
            | ServiceError::NotFound(msg) => msg.clone(),
            ServiceError::AggregationFailed(_) => "Failed to fetch hub data".to_string(),
            _ => "Internal server error".to_string(),
        }
    }
}

impl From<::config::ConfigError> for ServiceError {
    fn from(err: ::config::ConfigError) -> Self {
        ServiceError::Config(err.to_string())
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::AggregationFailed(_)
            | ServiceError::Database(_)
            | ServiceError::Config(_)
            | ServiceError::IO(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.public_message() }))
    }
}
