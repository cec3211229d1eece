//! API error handling

use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use core_kernel::CoreError;
use domain_accounts::AccountError;
use domain_claims::ClaimError;

use crate::auth::AuthError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Credentials were presented but do not grant access
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// No usable bearer token
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Never shown to the caller; logged instead
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error_type, message) = match self {
            ApiError::BadRequest(msg) => ("bad_request", msg),
            ApiError::NotFound(msg) => ("not_found", msg),
            ApiError::Conflict(msg) => ("conflict", msg),
            ApiError::Forbidden(msg) => ("forbidden", msg),
            ApiError::Unauthorized(msg) => ("unauthorized", msg),
            ApiError::Internal(detail) => {
                error!(%detail, "request failed");
                ("internal_error", "Internal server error".to_string())
            }
        };

        let body = ErrorResponse {
            success: false,
            error: error_type.to_string(),
            message,
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<ClaimError> for ApiError {
    fn from(err: ClaimError) -> Self {
        match err {
            ClaimError::InvalidArgument(msg) => ApiError::BadRequest(msg),
            ClaimError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            ClaimError::Conflict(msg) => ApiError::Conflict(msg),
            ClaimError::DecisionAlreadyMade { .. } => ApiError::Conflict(err.to_string()),
            ClaimError::Store(port) => ApiError::Internal(port.to_string()),
        }
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::InvalidArgument(msg) => ApiError::BadRequest(msg),
            AccountError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            AccountError::Conflict(msg) => ApiError::Conflict(msg),
            AccountError::Unauthorized(msg) => ApiError::Forbidden(msg),
            AccountError::Store(port) => ApiError::Internal(port.to_string()),
        }
    }
}

/// Identifier parsing failures
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => ApiError::BadRequest(msg),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingRole(role) => ApiError::Forbidden(format!("{} role required", role)),
            AuthError::Signing(detail) => ApiError::Internal(detail),
            other => ApiError::Unauthorized(other.to_string()),
        }
    }
}

/// Malformed JSON, a wrong content type, or a body that does not fit the DTO
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// JSON extractor and response whose rejections use the API error body
#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{PortError, ReportId};
    use domain_claims::ClaimState;

    #[test]
    fn test_claim_errors_map_to_statuses() {
        let cases = [
            (ClaimError::invalid("reason is required"), StatusCode::BAD_REQUEST),
            (ClaimError::not_found("Report", 9), StatusCode::NOT_FOUND),
            (ClaimError::conflict("Item is already claimed"), StatusCode::CONFLICT),
            (
                ClaimError::DecisionAlreadyMade {
                    report_id: ReportId::new(1).unwrap(),
                    state: ClaimState::Approved,
                },
                StatusCode::CONFLICT,
            ),
            (
                ClaimError::Store(PortError::connection("pool closed")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status(), expected);
        }
    }

    #[test]
    fn test_account_unauthorized_is_forbidden() {
        let err = ApiError::from(AccountError::unauthorized("Account is not active"));
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_store_detail_is_not_leaked() {
        let response =
            ApiError::from(ClaimError::Store(PortError::internal("relation missing"))).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_missing_role_is_forbidden() {
        let err = ApiError::from(AuthError::MissingRole("admin".to_string()));
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_invalid_token_is_unauthorized() {
        assert_eq!(ApiError::from(AuthError::InvalidToken).status(), StatusCode::UNAUTHORIZED);
    }
}
