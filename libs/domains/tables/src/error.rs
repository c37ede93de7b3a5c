use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::mysql::MAX_IDENTIFIER_LEN;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("Table name is required")]
    MissingName,

    #[error("Table name must be at most {MAX_IDENTIFIER_LEN} characters")]
    NameTooLong,

    #[error("Table '{0}' does not exist")]
    NotFound(String),

    #[error("Table '{0}' must have a primary key to generate embeddings")]
    MissingPrimaryKey(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type TableResult<T> = Result<T, TableError>;

/// Convert TableError to AppError for standardized error responses
impl From<TableError> for AppError {
    fn from(err: TableError) -> Self {
        match err {
            TableError::MissingName | TableError::NameTooLong | TableError::MissingPrimaryKey(_) => {
                AppError::BadRequest(err.to_string())
            }
            TableError::NotFound(_) => AppError::NotFound(err.to_string()),
            TableError::Database(e) => AppError::Database(e),
            TableError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for TableError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
