//! Gateway error types with HTTP status code mapping.
//!
//! [`GatewayError`] is the central error type for the gateway. Each variant
//! maps to a specific HTTP status code and a flat JSON error body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Flat JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": "database query failed",
///   "details": "connection refused"
/// }
/// ```
///
/// `details` is omitted when there is nothing beyond the message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Credentials missing or rejected. Deliberately carries no hint of
    /// whether the user exists.
    #[error("unauthorized")]
    Unauthorized,

    /// Token present but invalid or expired.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Database query or connection failure.
    #[error("database query failed")]
    Database(#[source] sqlx::Error),

    /// Startup connectivity failure after exhausting retries. Fatal.
    #[error("could not establish database connectivity: {0}")]
    Startup(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Database(_) | Self::Startup(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Extra detail exposed to the caller, where the variant carries any.
    #[must_use]
    pub fn details(&self) -> Option<String> {
        match self {
            Self::Database(source) => Some(source.to_string()),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for GatewayError {
    fn from(source: sqlx::Error) -> Self {
        Self::Database(source)
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.to_string(),
            details: self.details(),
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_taxonomy() {
        assert_eq!(
            GatewayError::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            GatewayError::Forbidden("expired".to_string()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            GatewayError::InvalidRequest("bad".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GatewayError::Internal("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            GatewayError::Database(sqlx::Error::PoolClosed).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn database_errors_expose_details() {
        let err = GatewayError::Database(sqlx::Error::PoolClosed);
        assert!(err.details().is_some());
        assert!(GatewayError::Unauthorized.details().is_none());
    }

    #[test]
    fn unauthorized_message_reveals_nothing() {
        assert_eq!(GatewayError::Unauthorized.to_string(), "unauthorized");
    }
}
