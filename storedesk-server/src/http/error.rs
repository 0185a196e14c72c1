//! API error types with IntoResponse
//!
//! Errors are converted to JSON `{error, message}` bodies with a status
//! code per kind. Pages are HTML; errors never are.

use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Form field failed validation (400)
    Validation(ValidationError),

    /// A cross-record rule refused the request (400)
    Rejected { message: String },

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// A uniqueness constraint refused the write (409)
    Conflict { message: String },

    /// A delete was refused because other records point here (409)
    Referenced { message: String },

    /// Request body could not be read as a form (status from the rejection)
    Malformed { status: StatusCode, message: String },

    /// Database error (500, logged)
    Database(DbError),
}

impl ApiError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn referenced(message: impl Into<String>) -> Self {
        Self::Referenced {
            message: message.into(),
        }
    }

    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Rejected { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } | Self::Referenced { .. } => StatusCode::CONFLICT,
            Self::Malformed { status, .. } => *status,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Validation(e) => json!({
                "error": "validation_error",
                "message": e.to_string()
            }),
            Self::Rejected { message } => json!({
                "error": "rejected",
                "message": message
            }),
            Self::NotFound { resource, id } => json!({
                "error": "not_found",
                "message": format!("{} '{}' not found", resource, id)
            }),
            Self::Conflict { message } => json!({
                "error": "conflict",
                "message": message
            }),
            Self::Referenced { message } => json!({
                "error": "referenced",
                "message": message
            }),
            Self::Malformed { message, .. } => json!({
                "error": "malformed_request",
                "message": message
            }),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                json!({
                    "error": "internal_error",
                    "message": "an internal error occurred"
                })
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        Self::Malformed {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            DbError::Conflict { .. } => Self::conflict(e.to_string()),
            DbError::Referenced { .. } => Self::referenced(e.to_string()),
            _ => Self::Database(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_is_400() {
        let err = ApiError::Validation(ValidationError::Empty { field: "store ID" });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["message"], "store ID cannot be empty");
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let err = ApiError::from(DbError::not_found("store", "PP-999"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["message"], "store 'PP-999' not found");
    }

    #[tokio::test]
    async fn referenced_is_409() {
        let err = ApiError::from(DbError::referenced("store", "PP-111"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(body_json(response).await["error"], "referenced");
    }

    #[tokio::test]
    async fn database_error_hides_cause() {
        let err = ApiError::from(DbError::Sqlx(sqlx::Error::PoolTimedOut));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["message"], "an internal error occurred");
    }

    #[tokio::test]
    async fn malformed_keeps_rejection_status() {
        let err = ApiError::Malformed {
            status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
            message: "Form requests must have `Content-Type: application/x-www-form-urlencoded`".into(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body_json(response).await["error"], "malformed_request");
    }
}
