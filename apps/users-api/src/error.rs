//! # Handler Errors
//!
//! Every handler returns [`ApiResult`]. Failures render as JSON with the
//! status taken from the code:
//!
//! ```text
//! DbError::NotFound, unknown id ....... 404 NOT_FOUND
//! ValidationError, bad JSON body ...... 400 VALIDATION_ERROR
//! DbError::UniqueViolation ............ 409 CONFLICT
//! any other DbError ................... 500 DATABASE_ERROR
//! hashing failure ..................... 500 INTERNAL
//! ```

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use shop_core::{CoreError, ValidationError};
use shop_db::DbError;

/// Error body returned by every failing endpoint.
///
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "User not found: 7"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    pub code: ErrorCode,
    /// Shown to the user as-is.
    pub message: String,
}

/// Stable error identifiers. Clients branch on these, never on `message`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotFound,
    ValidationError,
    /// Username already registered.
    Conflict,
    DatabaseError,
    Internal,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::DatabaseError | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Conflict, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Store failures other than "missing" and "taken" are logged here and
/// reach the client as a generic 500.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        let public = match &err {
            DbError::NotFound { entity, id } => return ApiError::not_found(entity, id),
            DbError::UniqueViolation { field, value } => {
                return ApiError::conflict(format!("{} '{}' already exists", field, value));
            }
            DbError::PoolExhausted => "Database is busy, try again",
            DbError::ConnectionFailed(_) | DbError::MigrationFailed(_) => "Database unavailable",
            DbError::QueryFailed(_) | DbError::Internal(_) => "Database operation failed",
        };
        tracing::error!(error = %err, "Users store failure");
        ApiError::new(ErrorCode::DatabaseError, public)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", id),
            CoreError::Qr(e) => ApiError::validation(e.to_string()),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Malformed or missing JSON bodies.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {:?}: {}", self.code.status().as_u16(), self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_per_code() {
        assert_eq!(ApiError::not_found("User", 7).code.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::validation("x").code.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::conflict("x").code.status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::internal("x").code.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_db_error_mapping() {
        let err = ApiError::from(DbError::duplicate("users.username", "ana"));
        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(err.message, "users.username 'ana' already exists");

        let err = ApiError::from(DbError::QueryFailed("syntax error".to_string()));
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.message, "Database operation failed");

        let err = ApiError::from(DbError::not_found("User", 7));
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "User not found: 7");
        assert_eq!(err.to_string(), "404 NotFound: User not found: 7");
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ApiError::not_found("User", 7)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"code": "NOT_FOUND", "message": "User not found: 7"})
        );
    }
}
