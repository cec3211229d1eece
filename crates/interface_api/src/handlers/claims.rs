//! Claims handlers

use axum::extract::State;

use core_kernel::ReportId;
use domain_claims::ClaimDecision;

use crate::dto::claims::*;
use crate::dto::required_id;
use crate::error::{ApiError, Json};
use crate::AppState;

/// Submits a pending ownership claim against a found report
pub async fn submit_claim(
    State(state): State<AppState>,
    Json(request): Json<SubmitClaimRequest>,
) -> Result<Json<SubmitClaimResponse>, ApiError> {
    let report_id = required_id(request.report_id.as_ref(), "reportID", ReportId::parse_raw)?;
    let claim_id = state.claims.submit_claim(report_id, &request.reason).await?;

    Ok(Json(SubmitClaimResponse {
        success: true,
        message: "Claim submitted successfully".to_string(),
        claim_id,
    }))
}

/// Lists every claim with its item
pub async fn list_claims(
    State(state): State<AppState>,
) -> Result<Json<Vec<ClaimResponse>>, ApiError> {
    let claims = state.claims.claims().await?;
    Ok(Json(claims.into_iter().map(ClaimResponse::from).collect()))
}

/// Approves the pending claim on a report
pub async fn accept_claim(
    State(state): State<AppState>,
    Json(request): Json<DecideClaimRequest>,
) -> Result<Json<DecisionResponse>, ApiError> {
    decide(state, request, ClaimDecision::Approve).await
}

/// Rejects the pending claim on a report
pub async fn reject_claim(
    State(state): State<AppState>,
    Json(request): Json<DecideClaimRequest>,
) -> Result<Json<DecisionResponse>, ApiError> {
    decide(state, request, ClaimDecision::Reject).await
}

async fn decide(
    state: AppState,
    request: DecideClaimRequest,
    decision: ClaimDecision,
) -> Result<Json<DecisionResponse>, ApiError> {
    let report_id = required_id(request.report_id.as_ref(), "reportId", ReportId::parse_raw)?;
    let outcome = state.claims.decide_claim(report_id, decision).await?;
    Ok(Json(DecisionResponse::new(outcome)))
}

/// Marks a found item claimed directly, recording the claimant
pub async fn claim_item(
    State(state): State<AppState>,
    Json(request): Json<ClaimItemRequest>,
) -> Result<Json<ClaimItemResponse>, ApiError> {
    let report_id = required_id(request.item_id.as_ref(), "itemId", ReportId::parse_raw)?;
    let claim_id = state.claims.claim_item(report_id, &request.claimant_info).await?;

    Ok(Json(ClaimItemResponse {
        success: true,
        claim_id,
    }))
}
