//! Lost and Found Claims Domain
//!
//! This crate implements the report and claim lifecycle: lost and found item
//! reports, ownership claims against found items, and administrator
//! decisions on those claims.
//!
//! # Claim Lifecycle
//!
//! ```text
//! Report found item -> Submit claim (Pending) -> Approve -> Report Claimed
//!                                             -> Reject  -> Report stays Unclaimed
//! ```
//!
//! All state changes go through [`ClaimLifecycleManager`], which runs each
//! operation inside a single store transaction.

pub mod claim;
pub mod item;
pub mod lifecycle;
pub mod ports;
pub mod error;

pub use claim::{ClaimDecision, ClaimDetail, ClaimRequest, ClaimState, NewClaim};
pub use item::{
    Category, ItemClaimState, ItemKind, ItemReport, NewItemReport, ReportDraft, ReportFilter,
    ReportStatus,
};
pub use lifecycle::{ClaimLifecycleManager, DecisionOutcome};
pub use ports::{LostFoundPort, LostFoundTransaction};
pub use error::ClaimError;
