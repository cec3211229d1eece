//! Item reports
//!
//! A report records one lost or found item. Found reports move from
//! unclaimed to claimed when a claim is approved; lost reports can only be
//! soft-removed.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{CategoryId, ImageId, LocationId, ReportId};
use crate::error::ClaimError;

/// Whether a report describes something lost or something found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Lost,
    Found,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Lost => write!(f, "lost"),
            ItemKind::Found => write!(f, "found"),
        }
    }
}

/// Visibility of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportStatus {
    Active,
    /// Soft-deleted; hidden from listings
    Removed,
}

/// Claim state of a found report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemClaimState {
    Unclaimed,
    /// Terminal
    Claimed,
}

/// A lost or found item report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemReport {
    pub id: ReportId,
    pub kind: ItemKind,
    pub name: String,
    pub category_id: CategoryId,
    pub category_name: String,
    pub description: String,
    pub image_id: Option<ImageId>,
    pub image_url: Option<String>,
    pub location_id: LocationId,
    pub location: String,
    /// Date the item was lost or found
    pub date: NaiveDate,
    pub is_claimed: bool,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
}

impl ItemReport {
    /// Returns the claim state, or `None` for lost reports
    pub fn claim_state(&self) -> Option<ItemClaimState> {
        match (self.kind, self.is_claimed) {
            (ItemKind::Lost, _) => None,
            (ItemKind::Found, false) => Some(ItemClaimState::Unclaimed),
            (ItemKind::Found, true) => Some(ItemClaimState::Claimed),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ReportStatus::Active
    }

    /// Checks that a claim may be filed against this report
    ///
    /// Lost and removed reports are treated as absent: there is no found
    /// report with this identifier.
    pub fn ensure_claimable(&self) -> Result<(), ClaimError> {
        if self.kind != ItemKind::Found || !self.is_active() {
            return Err(ClaimError::not_found("Found report", self.id));
        }
        if self.is_claimed {
            return Err(ClaimError::conflict(format!(
                "Report {} has already been claimed",
                self.id
            )));
        }
        Ok(())
    }

    /// Moves a found report to `Claimed`
    pub fn mark_claimed(&mut self) -> Result<(), ClaimError> {
        self.ensure_claimable()?;
        self.is_claimed = true;
        Ok(())
    }

    /// Soft-removes a lost report
    pub fn remove(&mut self) -> Result<(), ClaimError> {
        if self.kind != ItemKind::Lost || !self.is_active() {
            return Err(ClaimError::not_found("Lost report", self.id));
        }
        self.status = ReportStatus::Removed;
        Ok(())
    }
}

/// Report fields as submitted, before validation
#[derive(Debug, Clone)]
pub struct ReportDraft {
    pub kind: ItemKind,
    pub name: String,
    pub category_id: CategoryId,
    pub description: String,
    pub image_url: Option<String>,
    pub location: String,
    pub date: String,
}

impl ReportDraft {
    /// Validates the draft into a report ready for the store
    ///
    /// Text fields are trimmed and must be non-empty. A blank image URL is
    /// treated as absent.
    pub fn validate(self) -> Result<NewItemReport, ClaimError> {
        let name = required(&self.name, "itemName")?;
        let description = required(&self.description, "description")?;
        let location = required(&self.location, "location")?;
        let date = parse_item_date(&self.date)?;
        let image_url = self
            .image_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        Ok(NewItemReport {
            kind: self.kind,
            name,
            category_id: self.category_id,
            description,
            image_url,
            location,
            date,
        })
    }
}

/// A validated report awaiting insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItemReport {
    pub kind: ItemKind,
    pub name: String,
    pub category_id: CategoryId,
    pub description: String,
    pub image_url: Option<String>,
    pub location: String,
    pub date: NaiveDate,
}

fn required(value: &str, field: &str) -> Result<String, ClaimError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ClaimError::invalid(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

/// Parses a calendar date as `YYYY-MM-DD` or an RFC 3339 timestamp
pub fn parse_item_date(input: &str) -> Result<NaiveDate, ClaimError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ClaimError::invalid("date is required"));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed).map(|ts| ts.date_naive()))
        .map_err(|_| ClaimError::invalid(format!("'{}' is not a valid date", trimmed)))
}

/// Selects which reports a listing returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFilter {
    Lost,
    Found { claimed: Option<bool> },
}

impl ReportFilter {
    /// Removed reports never match
    pub fn matches(&self, report: &ItemReport) -> bool {
        if !report.is_active() {
            return false;
        }
        match self {
            ReportFilter::Lost => report.kind == ItemKind::Lost,
            ReportFilter::Found { claimed } => {
                report.kind == ItemKind::Found
                    && claimed.map_or(true, |wanted| report.is_claimed == wanted)
            }
        }
    }
}

/// Item category lookup entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}
