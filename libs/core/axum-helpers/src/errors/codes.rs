//! Type-safe error codes for API responses.
//!
//! Each code carries:
//! - a SCREAMING_SNAKE_CASE identifier sent to clients (`error` field)
//! - an integer for logs and dashboards (`code` field)
//! - a default human-readable message
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::NotFound;
//! assert_eq!(code.as_str(), "NOT_FOUND");
//! assert_eq!(code.code(), 1004);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1099)
    /// Path or query input was rejected
    ValidationError,

    /// Request body could not be read as JSON
    JsonExtraction,

    /// Route or resource does not exist
    NotFound,

    /// Route exists but not for this method
    MethodNotAllowed,

    // Server errors (1100-1199)
    /// An unexpected internal server error occurred
    InternalError,

    /// Service is temporarily unavailable
    ServiceUnavailable,

    /// A required setting is missing at request time
    ConfigurationError,

    // Database errors (2000-2999)
    /// Query failed on the server
    DatabaseError,

    /// Could not talk to the database
    DatabaseConnection,

    /// Timed out waiting for a pooled connection
    DatabasePoolTimeout,

    /// Query expected a row and got none
    DatabaseRecordNotFound,

    /// Any other database error
    DatabaseUnhandled,

    // Upstream errors (3000-3999)
    /// The embedding API call failed
    UpstreamError,

    // Serialization errors (5000-5999)
    /// JSON serialization/deserialization error
    SerdeJsonError,
}

impl ErrorCode {
    /// Identifier sent in the `error` field of error responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::ConfigurationError => "CONFIGURATION_ERROR",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::DatabaseConnection => "DATABASE_CONNECTION",
            Self::DatabasePoolTimeout => "DATABASE_POOL_TIMEOUT",
            Self::DatabaseRecordNotFound => "DATABASE_RECORD_NOT_FOUND",
            Self::DatabaseUnhandled => "DATABASE_UNHANDLED",
            Self::UpstreamError => "UPSTREAM_ERROR",
            Self::SerdeJsonError => "SERDE_JSON_ERROR",
        }
    }

    /// Integer code for logging and monitoring.
    ///
    /// Ranges:
    /// - 1000-1099: client errors
    /// - 1100-1199: server errors
    /// - 2000-2999: database errors
    /// - 3000-3999: upstream API errors
    /// - 5000-5999: serialization errors
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::MethodNotAllowed => 1005,

            Self::InternalError => 1100,
            Self::ServiceUnavailable => 1101,
            Self::ConfigurationError => 1102,

            Self::DatabaseError => 2001,
            Self::DatabaseConnection => 2002,
            Self::DatabasePoolTimeout => 2003,
            Self::DatabaseRecordNotFound => 2004,
            Self::DatabaseUnhandled => 2099,

            Self::UpstreamError => 3001,

            Self::SerdeJsonError => 5001,
        }
    }

    /// Default user-facing message for this code.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::JsonExtraction => "Failed to parse request body",
            Self::NotFound => "The requested resource was not found",
            Self::MethodNotAllowed => "The HTTP method is not allowed for this resource",
            Self::InternalError => "An internal server error occurred",
            Self::ServiceUnavailable => "Service is temporarily unavailable",
            Self::ConfigurationError => "The server is missing required configuration",
            Self::DatabaseError => "Database error occurred",
            Self::DatabaseConnection => "Database connection failed",
            Self::DatabasePoolTimeout => "Database connection pool timed out",
            Self::DatabaseRecordNotFound => "Database record not found",
            Self::DatabaseUnhandled => "Unhandled database error",
            Self::UpstreamError => "Embedding provider request failed",
            Self::SerdeJsonError => "JSON serialization error",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
