//! Claim lifecycle management
//!
//! The [`ClaimLifecycleManager`] is the only component allowed to change a
//! report's claimed status or a claim's decision state. Each operation opens
//! one store transaction, checks its preconditions against the locked report
//! and writes inside the same transaction, so concurrent callers on the same
//! report are serialized by the store.
//!
//! ```text
//! Found report:  Unclaimed --(claim approved)--> Claimed
//! Claim:         Pending --> Approved | Rejected
//! Lost report:   Active --> Removed
//! ```

use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use core_kernel::{ClaimId, ReportId};

use crate::claim::{
    validate_reason, ClaimDecision, ClaimDetail, ClaimRequest, ClaimState, NewClaim,
};
use crate::error::ClaimError;
use crate::item::{Category, ItemReport, NewItemReport, ReportDraft, ReportFilter, ReportStatus};
use crate::ports::{LostFoundPort, LostFoundTransaction};

/// Result of a committed claim decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecisionOutcome {
    pub claim_id: ClaimId,
    pub report_id: ReportId,
    pub state: ClaimState,
    pub report_claimed: bool,
}

/// Enforces the report and claim state machines
#[derive(Clone)]
pub struct ClaimLifecycleManager {
    store: Arc<dyn LostFoundPort>,
}

impl ClaimLifecycleManager {
    pub fn new(store: Arc<dyn LostFoundPort>) -> Self {
        Self { store }
    }

    /// Returns the underlying store port
    pub fn store(&self) -> &Arc<dyn LostFoundPort> {
        &self.store
    }

    /// Files a pending claim against an unclaimed found report
    ///
    /// # Errors
    ///
    /// * `InvalidArgument` - the reason is blank
    /// * `NotFound` - no active found report has this ID
    /// * `Conflict` - the report is claimed or already has a pending claim
    #[instrument(skip(self, reason), fields(report_id = %report_id))]
    pub async fn submit_claim(&self, report_id: ReportId, reason: &str) -> Result<ClaimId, ClaimError> {
        let reason = validate_reason(reason, "reason")?;

        let mut tx = self.store.begin().await?;
        let result = submit_within(tx.as_mut(), report_id, reason).await;
        let claim_id = finish(tx, result, "submit_claim").await?;

        info!(%claim_id, "claim submitted");
        Ok(claim_id)
    }

    /// Approves or rejects the pending claim on a report
    ///
    /// Approval also marks the report claimed; both writes commit together.
    ///
    /// # Errors
    ///
    /// * `NotFound` - the report does not exist or has no claims
    /// * `DecisionAlreadyMade` - the report's claims are all decided
    /// * `Conflict` - approving while the report is already claimed
    #[instrument(skip(self), fields(report_id = %report_id, decision = ?decision))]
    pub async fn decide_claim(
        &self,
        report_id: ReportId,
        decision: ClaimDecision,
    ) -> Result<DecisionOutcome, ClaimError> {
        let mut tx = self.store.begin().await?;
        let result = decide_within(tx.as_mut(), report_id, decision).await;
        let outcome = finish(tx, result, "decide_claim").await?;

        info!(
            claim_id = %outcome.claim_id,
            state = %outcome.state,
            report_claimed = outcome.report_claimed,
            "claim decided"
        );
        Ok(outcome)
    }

    /// Records a new lost or found report
    ///
    /// # Errors
    ///
    /// * `InvalidArgument` - a required field is blank or the date is unparseable
    /// * `NotFound` - the category does not exist
    #[instrument(skip(self, draft), fields(kind = %draft.kind, category_id = %draft.category_id))]
    pub async fn report_item(&self, draft: ReportDraft) -> Result<ReportId, ClaimError> {
        let report = draft.validate()?;

        let mut tx = self.store.begin().await?;
        let result = report_within(tx.as_mut(), &report).await;
        let report_id = finish(tx, result, "report_item").await?;

        info!(%report_id, "item reported");
        Ok(report_id)
    }

    /// Soft-removes an active lost report
    #[instrument(skip(self), fields(report_id = %report_id))]
    pub async fn remove_lost_report(&self, report_id: ReportId) -> Result<(), ClaimError> {
        let mut tx = self.store.begin().await?;
        let result = remove_within(tx.as_mut(), report_id).await;
        finish(tx, result, "remove_lost_report").await?;

        info!("lost report removed");
        Ok(())
    }

    /// Claims a found item directly, recording an approved claim
    ///
    /// Marks the report claimed and inserts the claim in one transaction.
    #[instrument(skip(self, claimant_info), fields(report_id = %report_id))]
    pub async fn claim_item(&self, report_id: ReportId, claimant_info: &str) -> Result<ClaimId, ClaimError> {
        let claimant_info = validate_reason(claimant_info, "claimantInfo")?;

        let mut tx = self.store.begin().await?;
        let result = claim_item_within(tx.as_mut(), report_id, claimant_info).await;
        let claim_id = finish(tx, result, "claim_item").await?;

        info!(%claim_id, "item claimed directly");
        Ok(claim_id)
    }

    pub async fn report(&self, report_id: ReportId) -> Result<ItemReport, ClaimError> {
        self.store
            .get_report(report_id)
            .await?
            .ok_or_else(|| ClaimError::not_found("Report", report_id))
    }

    pub async fn lost_reports(&self) -> Result<Vec<ItemReport>, ClaimError> {
        Ok(self.store.list_reports(ReportFilter::Lost).await?)
    }

    /// Lists found reports, optionally only claimed or only unclaimed ones
    pub async fn found_reports(&self, claimed: Option<bool>) -> Result<Vec<ItemReport>, ClaimError> {
        Ok(self.store.list_reports(ReportFilter::Found { claimed }).await?)
    }

    pub async fn categories(&self) -> Result<Vec<Category>, ClaimError> {
        Ok(self.store.list_categories().await?)
    }

    pub async fn claims(&self) -> Result<Vec<ClaimDetail>, ClaimError> {
        Ok(self.store.list_claim_details().await?)
    }

    pub async fn claims_for_report(&self, report_id: ReportId) -> Result<Vec<ClaimRequest>, ClaimError> {
        Ok(self.store.claims_for_report(report_id).await?)
    }
}

/// Commits on success, rolls back on failure, and returns the original result
async fn finish<T>(
    tx: Box<dyn LostFoundTransaction>,
    result: Result<T, ClaimError>,
    operation: &'static str,
) -> Result<T, ClaimError> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                error!(operation, error = %rollback_err, "rollback failed");
            }
            warn!(operation, error = %err, "transaction rolled back");
            Err(err)
        }
    }
}

async fn locked_report(
    tx: &mut dyn LostFoundTransaction,
    report_id: ReportId,
    entity: &'static str,
) -> Result<ItemReport, ClaimError> {
    tx.lock_report(report_id)
        .await?
        .ok_or_else(|| ClaimError::not_found(entity, report_id))
}

async fn ensure_no_pending_claim(
    tx: &mut dyn LostFoundTransaction,
    report_id: ReportId,
) -> Result<(), ClaimError> {
    let claims = tx.claims_for_report(report_id).await?;
    if claims.iter().any(|c| c.state == ClaimState::Pending) {
        return Err(ClaimError::conflict(format!(
            "Report {} already has a pending claim",
            report_id
        )));
    }
    Ok(())
}

async fn submit_within(
    tx: &mut dyn LostFoundTransaction,
    report_id: ReportId,
    reason: String,
) -> Result<ClaimId, ClaimError> {
    let report = locked_report(tx, report_id, "Found report").await?;
    report.ensure_claimable()?;
    ensure_no_pending_claim(tx, report_id).await?;

    let claim = NewClaim {
        report_id,
        reason,
        state: ClaimState::Pending,
    };
    Ok(tx.insert_claim(&claim).await?)
}

async fn decide_within(
    tx: &mut dyn LostFoundTransaction,
    report_id: ReportId,
    decision: ClaimDecision,
) -> Result<DecisionOutcome, ClaimError> {
    let mut report = locked_report(tx, report_id, "Report").await?;
    let claims = tx.claims_for_report(report_id).await?;

    let mut claim = match claims.iter().find(|c| c.state == ClaimState::Pending) {
        Some(pending) => pending.clone(),
        None => {
            let decided = claims
                .iter()
                .find(|c| c.state == ClaimState::Approved)
                .or_else(|| claims.last());
            return Err(match decided {
                Some(latest) => ClaimError::DecisionAlreadyMade {
                    report_id,
                    state: latest.state,
                },
                None => ClaimError::not_found("Pending claim for report", report_id),
            });
        }
    };

    let state = claim.decide(decision)?;
    if decision == ClaimDecision::Approve {
        report.mark_claimed()?;
    }

    tx.update_claim_state(claim.id, state).await?;
    if decision == ClaimDecision::Approve {
        tx.set_report_claimed(report_id).await?;
    }

    Ok(DecisionOutcome {
        claim_id: claim.id,
        report_id,
        state,
        report_claimed: report.is_claimed,
    })
}

async fn report_within(
    tx: &mut dyn LostFoundTransaction,
    report: &NewItemReport,
) -> Result<ReportId, ClaimError> {
    if !tx.category_exists(report.category_id).await? {
        return Err(ClaimError::not_found("Category", report.category_id));
    }
    Ok(tx.insert_report(report).await?)
}

async fn remove_within(
    tx: &mut dyn LostFoundTransaction,
    report_id: ReportId,
) -> Result<(), ClaimError> {
    let mut report = locked_report(tx, report_id, "Lost report").await?;
    report.remove()?;
    tx.set_report_status(report_id, ReportStatus::Removed).await?;
    Ok(())
}

async fn claim_item_within(
    tx: &mut dyn LostFoundTransaction,
    report_id: ReportId,
    claimant_info: String,
) -> Result<ClaimId, ClaimError> {
    let mut report = locked_report(tx, report_id, "Found report").await?;
    report.mark_claimed()?;
    ensure_no_pending_claim(tx, report_id).await?;

    tx.set_report_claimed(report_id).await?;
    let claim = NewClaim {
        report_id,
        reason: claimant_info,
        state: ClaimState::Approved,
    };
    Ok(tx.insert_claim(&claim).await?)
}
