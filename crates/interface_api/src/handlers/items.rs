//! Item report handlers

use axum::extract::{Path, State};

use core_kernel::{RawId, ReportId};
use domain_claims::{ItemKind, ItemReport};

use crate::dto::items::*;
use crate::dto::MessageResponse;
use crate::error::{ApiError, Json};
use crate::AppState;

fn listing(reports: Vec<ItemReport>) -> Json<Vec<ReportResponse>> {
    Json(reports.into_iter().map(ReportResponse::from).collect())
}

/// Lists active lost reports
pub async fn lost_items(
    State(state): State<AppState>,
) -> Result<Json<Vec<ReportResponse>>, ApiError> {
    Ok(listing(state.claims.lost_reports().await?))
}

/// Lists found reports nobody has claimed yet
pub async fn found_unclaimed_items(
    State(state): State<AppState>,
) -> Result<Json<Vec<ReportResponse>>, ApiError> {
    Ok(listing(state.claims.found_reports(Some(false)).await?))
}

pub async fn found_claimed_items(
    State(state): State<AppState>,
) -> Result<Json<Vec<ReportResponse>>, ApiError> {
    Ok(listing(state.claims.found_reports(Some(true)).await?))
}

/// Lists every found report regardless of claim state
pub async fn found_items(
    State(state): State<AppState>,
) -> Result<Json<Vec<ReportResponse>>, ApiError> {
    Ok(listing(state.claims.found_reports(None).await?))
}

pub async fn categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    let categories = state.claims.categories().await?;
    Ok(Json(categories.into_iter().map(CategoryResponse::from).collect()))
}

/// Files a lost report
pub async fn report_lost_item(
    State(state): State<AppState>,
    Json(request): Json<ReportItemRequest>,
) -> Result<Json<ReportItemResponse>, ApiError> {
    report_item(state, request, ItemKind::Lost).await
}

/// Files a found report
pub async fn report_found_item(
    State(state): State<AppState>,
    Json(request): Json<ReportItemRequest>,
) -> Result<Json<ReportItemResponse>, ApiError> {
    report_item(state, request, ItemKind::Found).await
}

async fn report_item(
    state: AppState,
    request: ReportItemRequest,
    kind: ItemKind,
) -> Result<Json<ReportItemResponse>, ApiError> {
    let report_id = state.claims.report_item(request.into_draft(kind)?).await?;

    Ok(Json(ReportItemResponse {
        success: true,
        report_id,
        message: format!("{} item reported successfully", capitalized(kind)),
    }))
}

fn capitalized(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Lost => "Lost",
        ItemKind::Found => "Found",
    }
}

/// Soft-removes a lost report
pub async fn remove_lost_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let report_id = ReportId::parse_raw(&RawId::Text(id))?;
    state.claims.remove_lost_report(report_id).await?;
    Ok(Json(MessageResponse::ok("Lost item removed")))
}
