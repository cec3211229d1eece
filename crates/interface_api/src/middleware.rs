//! API middleware

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::{info, warn};

use crate::auth::{bearer_token, has_role, roles, validate_token, AuthError, Claims};
use crate::error::ApiError;
use crate::AppState;

/// Admin authorization middleware
///
/// Missing or invalid tokens are rejected with 401, valid tokens without the
/// admin role with 403. The caller's claims are attached to the request and
/// to the response so the audit log can name them.
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let claims = bearer_token(header)
        .and_then(|token| validate_token(token, &state.config.jwt_secret))
        .map_err(|e| {
            warn!(error = %e, "Rejected admin request");
            e
        })?;

    if !has_role(&claims, roles::ADMIN) {
        warn!(subject = %claims.sub, "Caller lacks admin role");
        return Err(AuthError::MissingRole(roles::ADMIN.to_string()).into());
    }

    request.extensions_mut().insert(claims.clone());
    let mut response = next.run(request).await;
    response.extensions_mut().insert(claims);
    Ok(response)
}

/// Audit logging middleware
///
/// Logs every API request with its outcome and duration.
pub async fn audit_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let start = Utc::now();

    let response = next.run(request).await;

    let duration = Utc::now() - start;
    let status = response.status();
    let caller = response
        .extensions()
        .get::<Claims>()
        .map(|c| c.sub.clone())
        .unwrap_or_else(|| "anonymous".to_string());

    info!(
        method = %method,
        uri = %uri,
        caller = %caller,
        status = %status.as_u16(),
        duration_ms = duration.num_milliseconds(),
        "API request"
    );

    response
}
