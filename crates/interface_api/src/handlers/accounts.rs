//! Account handlers

use axum::extract::State;

use domain_accounts::SignupForm;

use crate::auth::{create_token, roles};
use crate::dto::accounts::*;
use crate::error::{ApiError, Json};
use crate::AppState;

/// Registers a user
pub async fn signup(
    State(state): State<AppState>,
    Json(form): Json<SignupForm>,
) -> Result<Json<SignupResponse>, ApiError> {
    let user_id = state.accounts.signup(form).await?;

    Ok(Json(SignupResponse {
        success: true,
        message: "User registered successfully".to_string(),
        user_id,
    }))
}

/// Signs a user in and issues a `user` token
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user_id = state.accounts.login(&request.email, &request.password).await?;
    let token = create_token(
        &user_id.to_string(),
        vec![roles::USER.to_string()],
        &state.config.jwt_secret,
        state.config.jwt_expiration_secs,
    )?;

    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful".to_string(),
        user_id,
        token,
    }))
}

/// Signs an administrator in and issues an `admin` token
pub async fn admin_login(
    State(state): State<AppState>,
    Json(request): Json<AdminLoginRequest>,
) -> Result<Json<AdminLoginResponse>, ApiError> {
    let admin_id = state.accounts.admin_login(&request.email, &request.admin_key).await?;
    let token = create_token(
        &format!("admin:{}", admin_id),
        vec![roles::ADMIN.to_string()],
        &state.config.jwt_secret,
        state.config.jwt_expiration_secs,
    )?;

    Ok(Json(AdminLoginResponse {
        success: true,
        message: "Admin login successful".to_string(),
        token,
    }))
}

pub async fn user_summaries(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserSummaryResponse>>, ApiError> {
    let users = state.accounts.user_summaries().await?;
    Ok(Json(users.into_iter().map(UserSummaryResponse::from).collect()))
}
