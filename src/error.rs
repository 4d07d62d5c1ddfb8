use axum::{
    response::{IntoResponse, Response},
    Json,
    http::StatusCode,
};
use serde::Serialize;

#[derive(Serialize)]
pub struct ErrorResponse {
    error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    ValidationError(String),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Failed to fetch data: {0}")]
    FetchError(String),

    #[error("Compiler service error: {0}")]
    CompileServiceError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Path traversal rejected: {0}")]
    PathTraversalRejected(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Template error: {0}")]
    TemplateError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::PathTraversalRejected(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::FetchError(_) | AppError::CompileServiceError(_) => StatusCode::BAD_GATEWAY,
            AppError::StorageError(_) | AppError::TemplateError(_) | AppError::ConfigError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self {
            AppError::ValidationError(msg)
            | AppError::MethodNotAllowed(msg)
            | AppError::FetchError(msg)
            | AppError::CompileServiceError(msg)
            | AppError::StorageError(msg)
            | AppError::PathTraversalRejected(msg)
            | AppError::NotFound(msg)
            | AppError::TemplateError(msg)
            | AppError::ConfigError(msg) => msg,
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::FetchError(err.to_string())
    }
}

impl From<std::env::VarError> for AppError {
    fn from(err: std::env::VarError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::StorageError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_side_failures_map_to_4xx() {
        assert_eq!(AppError::ValidationError("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::PathTraversalRejected("x".into()).status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::MethodNotAllowed("x".into()).status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn backend_failures_map_to_5xx() {
        assert!(AppError::CompileServiceError("x".into()).status().is_server_error());
        assert!(AppError::StorageError("x".into()).status().is_server_error());
    }

    #[test]
    fn io_errors_become_storage_errors() {
        let err: AppError = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(matches!(err, AppError::StorageError(_)));
    }
}
