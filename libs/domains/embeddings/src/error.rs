use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_tables::TableError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error("Embedding provider error: {0}")]
    Provider(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type EmbeddingResult<T> = Result<T, EmbeddingError>;

impl From<reqwest::Error> for EmbeddingError {
    fn from(err: reqwest::Error) -> Self {
        EmbeddingError::Provider(err.to_string())
    }
}

impl From<serde_json::Error> for EmbeddingError {
    fn from(err: serde_json::Error) -> Self {
        EmbeddingError::Internal(format!("JSON error: {}", err))
    }
}

/// Convert EmbeddingError to AppError for standardized HTTP error responses
impl From<EmbeddingError> for AppError {
    fn from(err: EmbeddingError) -> Self {
        match err {
            EmbeddingError::Table(e) => e.into(),
            EmbeddingError::Provider(msg) => AppError::BadGateway(msg),
            EmbeddingError::Config(msg) => AppError::Configuration(msg),
            EmbeddingError::Database(e) => AppError::Database(e),
            EmbeddingError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for EmbeddingError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
