//! Claims domain errors

use thiserror::Error;

use core_kernel::{CoreError, PortError, ReportId};
use crate::claim::ClaimState;

/// Errors that can occur in the claim lifecycle
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Claim for report {report_id} was already {state}")]
    DecisionAlreadyMade { report_id: ReportId, state: ClaimState },

    #[error("Store failure: {0}")]
    Store(PortError),
}

impl ClaimError {
    pub fn invalid(message: impl Into<String>) -> Self {
        ClaimError::InvalidArgument(message.into())
    }

    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        ClaimError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ClaimError::Conflict(message.into())
    }

    /// Returns true for failures caused by the store rather than the caller
    pub fn is_store_failure(&self) -> bool {
        matches!(self, ClaimError::Store(_))
    }
}

impl From<CoreError> for ClaimError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => ClaimError::InvalidArgument(msg),
        }
    }
}

/// Constraint violations raised by the store keep their meaning; everything
/// else is a store failure.
impl From<PortError> for ClaimError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::NotFound { entity_type, id } => ClaimError::NotFound {
                entity: "Referenced entity",
                id: format!("{} {}", entity_type, id),
            },
            PortError::Conflict { message } => ClaimError::Conflict(message),
            PortError::Validation { message, .. } => ClaimError::InvalidArgument(message),
            other => ClaimError::Store(other),
        }
    }
}
