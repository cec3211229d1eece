//! Claims DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, RawId, ReportId};
use domain_claims::{ClaimDetail, ClaimState, DecisionOutcome};

/// Body of `POST /api/submit-claim`
#[derive(Debug, Deserialize)]
pub struct SubmitClaimRequest {
    #[serde(rename = "reportID", alias = "reportId")]
    pub report_id: Option<RawId>,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitClaimResponse {
    pub success: bool,
    pub message: String,
    pub claim_id: ClaimId,
}

/// Body of `POST /api/claims/accept` and `POST /api/claims/reject`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecideClaimRequest {
    #[serde(alias = "reportID")]
    pub report_id: Option<RawId>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionResponse {
    pub success: bool,
    pub message: String,
    pub claim_id: ClaimId,
    pub report_id: ReportId,
    pub state: ClaimState,
}

impl DecisionResponse {
    pub fn new(outcome: DecisionOutcome) -> Self {
        let message = match outcome.state {
            ClaimState::Approved => "Claim accepted and item marked as claimed",
            _ => "Claim rejected",
        };
        Self {
            success: true,
            message: message.to_string(),
            claim_id: outcome.claim_id,
            report_id: outcome.report_id,
            state: outcome.state,
        }
    }
}

/// Body of `POST /api/claim-item`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimItemRequest {
    pub item_id: Option<RawId>,
    #[serde(default)]
    pub claimant_info: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimItemResponse {
    pub success: bool,
    pub claim_id: ClaimId,
}

/// A claim row as shown to administrators
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimResponse {
    pub claim_id: ClaimId,
    pub report_id: ReportId,
    pub item_name: String,
    pub category_name: String,
    pub location: String,
    pub reason: String,
    pub state: ClaimState,
    pub submitted_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
}

impl From<ClaimDetail> for ClaimResponse {
    fn from(detail: ClaimDetail) -> Self {
        Self {
            claim_id: detail.claim_id,
            report_id: detail.report_id,
            item_name: detail.item_name,
            category_name: detail.category_name,
            location: detail.location,
            reason: detail.reason,
            state: detail.state,
            submitted_at: detail.submitted_at,
            decided_at: detail.decided_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_submit_claim_reads_upper_case_id_field() {
        let request: SubmitClaimRequest =
            serde_json::from_value(json!({ "reportID": 5, "reason": "mine" })).unwrap();
        assert_eq!(request.report_id, Some(RawId::Integer(5)));

        let request: SubmitClaimRequest =
            serde_json::from_value(json!({ "reportId": "5" })).unwrap();
        assert_eq!(request.report_id, Some(RawId::Text("5".to_string())));
        assert!(request.reason.is_empty());
    }
}
