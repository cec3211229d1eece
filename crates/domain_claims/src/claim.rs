//! Ownership claims against found items

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{ClaimId, ReportId};
use crate::error::ClaimError;

/// Decision state of a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimState {
    /// Awaiting an administrator's decision
    Pending,
    Approved,
    Rejected,
}

impl ClaimState {
    pub fn is_decided(&self) -> bool {
        !matches!(self, ClaimState::Pending)
    }
}

impl fmt::Display for ClaimState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClaimState::Pending => write!(f, "pending"),
            ClaimState::Approved => write!(f, "approved"),
            ClaimState::Rejected => write!(f, "rejected"),
        }
    }
}

/// An administrator's verdict on a pending claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClaimDecision {
    Approve,
    Reject,
}

impl ClaimDecision {
    pub fn target_state(&self) -> ClaimState {
        match self {
            ClaimDecision::Approve => ClaimState::Approved,
            ClaimDecision::Reject => ClaimState::Rejected,
        }
    }
}

/// A user's assertion of ownership over a found report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimRequest {
    pub id: ClaimId,
    pub report_id: ReportId,
    pub reason: String,
    pub state: ClaimState,
    pub submitted_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
}

impl ClaimRequest {
    /// Applies a decision to a pending claim
    ///
    /// Decided claims are immutable; deciding again fails without touching
    /// the claim.
    pub fn decide(&mut self, decision: ClaimDecision) -> Result<ClaimState, ClaimError> {
        if self.state.is_decided() {
            return Err(ClaimError::DecisionAlreadyMade {
                report_id: self.report_id,
                state: self.state,
            });
        }
        self.state = decision.target_state();
        self.decided_at = Some(Utc::now());
        Ok(self.state)
    }
}

/// Data for inserting a claim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClaim {
    pub report_id: ReportId,
    pub reason: String,
    pub state: ClaimState,
}

/// Claim joined with its report, as shown to administrators
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimDetail {
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

/// Trims a claim justification, rejecting blank text
pub fn validate_reason(reason: &str, field: &str) -> Result<String, ClaimError> {
    let trimmed = reason.trim();
    if trimmed.is_empty() {
        return Err(ClaimError::invalid(format!("{} must be a non-empty string", field)));
    }
    Ok(trimmed.to_string())
}
