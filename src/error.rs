//! Error types for the events server

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

/// Key of the request path entry in a validation error body
pub const PATH: &str = "path";
/// Key of the status phrase entry in a validation error body
pub const STATUS: &str = "status";

/// A single failed field constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Rejected request body: the offending request path (when known) and every field violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub path: Option<String>,
    pub violations: Vec<FieldViolation>,
}

impl ValidationFailure {
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self {
            path: None,
            violations,
        }
    }

    pub fn at(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Response body: `path` and `status` first, then one entry per field
    pub fn body(&self, status: StatusCode) -> IndexMap<String, String> {
        let mut body = IndexMap::new();
        if let Some(path) = &self.path {
            body.insert(PATH.to_string(), format!("uri={}", path));
        }
        body.insert(
            STATUS.to_string(),
            status.canonical_reason().unwrap_or_default().to_string(),
        );
        for violation in &self.violations {
            body.insert(violation.field.clone(), violation.message.clone());
        }
        body
    }
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("Validation failed for {} field(s)", .0.violations.len())]
    Validation(ValidationFailure),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidArgument(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidArgument(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
            AppError::InvalidArgument(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AppError::Validation(failure) => {
                let status = StatusCode::BAD_REQUEST;
                (status, Json(failure.body(status))).into_response()
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
