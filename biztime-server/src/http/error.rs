//! API error types with IntoResponse
//!
//! Every failure leaves a handler as an `ApiError` and is rendered here as
//! `{"error": <kind>, "message": <text>}`. Internal details are logged,
//! never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// No route matches the request (404)
    RouteNotFound,

    /// Unique key already taken (409)
    Conflict { resource: &'static str, id: String },

    /// Database constraint rejected the write (400)
    Constraint { constraint: String },

    /// Request exceeded the configured timeout (408)
    Timeout,

    /// Database error (500, logged)
    Database(DbError),

    /// Internal error (500)
    Internal { message: String },
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Constraint { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } | Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Timeout => StatusCode::REQUEST_TIMEOUT,
            Self::Database(_) | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
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
            Self::NotFound { resource, id } => json!({
                "error": "not_found",
                "message": format!("{} '{}' not found", resource, id)
            }),
            Self::RouteNotFound => json!({
                "error": "not_found",
                "message": "Not Found"
            }),
            Self::Conflict { resource, id } => json!({
                "error": "conflict",
                "message": format!("{} '{}' already exists", resource, id)
            }),
            Self::Constraint { constraint } => json!({
                "error": "constraint_violation",
                "message": format!("request violates constraint '{}'", constraint)
            }),
            Self::Timeout => json!({
                "error": "timeout",
                "message": "request timed out"
            }),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                json!({
                    "error": "internal_error",
                    "message": "an internal error occurred"
                })
            }
            Self::Internal { message } => {
                tracing::error!("Internal error: {}", message);
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

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            DbError::Conflict { resource, id } => Self::Conflict { resource, id },
            DbError::Constraint { constraint } => Self::Constraint { constraint },
            DbError::Sqlx(_) => Self::Database(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_is_400() {
        let err = ApiError::Validation(ValidationError::Missing { field: "name" });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["message"], "name is required");
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let err = ApiError::NotFound {
            resource: "company",
            id: "nonexistent".into(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["message"], "company 'nonexistent' not found");
    }

    #[tokio::test]
    async fn route_not_found_message() {
        let response = ApiError::RouteNotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["error"], "not_found");
        assert_eq!(body["message"], "Not Found");
    }

    #[tokio::test]
    async fn conflict_is_409() {
        let err = ApiError::Conflict {
            resource: "company",
            id: "google".into(),
        };
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn database_error_hides_details() {
        let err = ApiError::from(DbError::Sqlx(sqlx::Error::PoolTimedOut));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "internal_error");
        assert_eq!(body["message"], "an internal error occurred");
    }

    #[tokio::test]
    async fn timeout_is_json_408() {
        let response = ApiError::Timeout.into_response();
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);

        let body = body_json(response).await;
        assert_eq!(body["error"], "timeout");
        assert_eq!(body["message"], "request timed out");
    }

    #[tokio::test]
    async fn internal_error_hides_details() {
        let err = ApiError::Internal {
            message: "No paths parameters found for matched route".into(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "internal_error");
        assert_eq!(body["message"], "an internal error occurred");
    }

    #[test]
    fn db_errors_map_to_api_errors() {
        let err = ApiError::from(DbError::NotFound {
            resource: "industry",
            id: "tech".into(),
        });
        assert!(matches!(err, ApiError::NotFound { resource: "industry", .. }));

        let err = ApiError::from(DbError::Constraint {
            constraint: "invoices_amt_check".into(),
        });
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
