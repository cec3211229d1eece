//! Claims Domain Ports
//!
//! The `LostFoundPort` trait is everything the claim lifecycle needs from the
//! persistent store. Reads go straight through the port; every write happens
//! inside a `LostFoundTransaction` so paired updates land together or not at
//! all.
//!
//! - **PostgreSQL adapter**: `infra_db::adapters::PostgresLostFoundAdapter`
//! - **In-memory adapter**: [`mock::InMemoryLostFoundStore`] (feature `mock`)
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut tx = port.begin().await?;
//! let report = tx.lock_report(report_id).await?;
//! tx.set_report_claimed(report_id).await?;
//! tx.commit().await?;
//! ```

use async_trait::async_trait;

use core_kernel::{
    CategoryId, ClaimId, DomainPort, HealthCheckable, PortError, ReportId,
};

use crate::claim::{ClaimDetail, ClaimRequest, ClaimState, NewClaim};
use crate::item::{Category, ItemReport, NewItemReport, ReportFilter, ReportStatus};

/// Store access for item reports and claims
#[async_trait]
pub trait LostFoundPort: DomainPort + HealthCheckable {
    /// Opens a transaction; dropping it without committing discards its writes
    async fn begin(&self) -> Result<Box<dyn LostFoundTransaction>, PortError>;

    /// Retrieves a report by ID, including removed reports
    async fn get_report(&self, id: ReportId) -> Result<Option<ItemReport>, PortError>;

    /// Lists active reports matching the filter, newest first
    async fn list_reports(&self, filter: ReportFilter) -> Result<Vec<ItemReport>, PortError>;

    /// Lists item categories ordered by ID
    async fn list_categories(&self) -> Result<Vec<Category>, PortError>;

    /// Lists all claims filed against a report, oldest first
    async fn claims_for_report(&self, report_id: ReportId) -> Result<Vec<ClaimRequest>, PortError>;

    /// Lists every claim joined with its report, newest first
    async fn list_claim_details(&self) -> Result<Vec<ClaimDetail>, PortError>;
}

/// A single all-or-nothing unit of work against the store
#[async_trait]
pub trait LostFoundTransaction: Send {
    async fn category_exists(&mut self, id: CategoryId) -> Result<bool, PortError>;

    /// Inserts a report, resolving its location by name and storing its image
    async fn insert_report(&mut self, report: &NewItemReport) -> Result<ReportId, PortError>;

    /// Fetches a report and holds it against concurrent writers until the
    /// transaction ends
    async fn lock_report(&mut self, id: ReportId) -> Result<Option<ItemReport>, PortError>;

    async fn claims_for_report(&mut self, report_id: ReportId) -> Result<Vec<ClaimRequest>, PortError>;

    async fn insert_claim(&mut self, claim: &NewClaim) -> Result<ClaimId, PortError>;

    /// Records a decision and stamps the decision time
    async fn update_claim_state(&mut self, claim_id: ClaimId, state: ClaimState) -> Result<(), PortError>;

    async fn set_report_claimed(&mut self, report_id: ReportId) -> Result<(), PortError>;

    async fn set_report_status(&mut self, report_id: ReportId, status: ReportStatus) -> Result<(), PortError>;

    async fn commit(self: Box<Self>) -> Result<(), PortError>;

    async fn rollback(self: Box<Self>) -> Result<(), PortError>;
}

/// In-memory implementation of LostFoundPort for testing
///
/// Transactions take an owned lock on the whole store and work on a copy;
/// commit swaps the copy in. Failures can be injected at named points to
/// exercise rollback.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex as StdMutex};

    use chrono::Utc;
    use tokio::sync::{Mutex, OwnedMutexGuard};

    use core_kernel::{AdapterHealth, CoreError, HealthCheckResult, ImageId, LocationId};

    use crate::item::ItemKind;

    /// Points at which the next matching store call fails
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum FailPoint {
        InsertReport,
        InsertClaim,
        UpdateClaimState,
        SetReportClaimed,
        SetReportStatus,
        Commit,
    }

    #[derive(Debug, Clone, Default)]
    struct StoreState {
        categories: BTreeMap<CategoryId, String>,
        locations: BTreeMap<String, LocationId>,
        images: BTreeMap<ImageId, String>,
        reports: BTreeMap<ReportId, ItemReport>,
        claims: BTreeMap<ClaimId, ClaimRequest>,
        last_id: i64,
    }

    impl StoreState {
        fn next_id<T>(&mut self) -> Result<T, PortError>
        where
            T: TryFrom<i64, Error = CoreError>,
        {
            self.last_id += 1;
            T::try_from(self.last_id).map_err(|e| PortError::internal(e.to_string()))
        }

        fn report_claims(&self, report_id: ReportId) -> Vec<ClaimRequest> {
            self.claims
                .values()
                .filter(|c| c.report_id == report_id)
                .cloned()
                .collect()
        }

        fn report_mut(&mut self, report_id: ReportId) -> Result<&mut ItemReport, PortError> {
            self.reports
                .get_mut(&report_id)
                .ok_or_else(|| PortError::not_found("Report", report_id))
        }
    }

    /// In-memory lost-and-found store
    #[derive(Debug, Clone, Default)]
    pub struct InMemoryLostFoundStore {
        state: Arc<Mutex<StoreState>>,
        fail_point: Arc<StdMutex<Option<FailPoint>>>,
    }

    impl InMemoryLostFoundStore {
        /// Creates an empty store
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a store seeded with the given category names, numbered from 1
        pub fn with_categories<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
            let mut state = StoreState::default();
            for name in names {
                if let Ok(id) = state.next_id::<CategoryId>() {
                    state.categories.insert(id, name.to_string());
                }
            }
            Self {
                state: Arc::new(Mutex::new(state)),
                fail_point: Arc::default(),
            }
        }

        /// Creates a store with the standard category list
        pub fn with_default_categories() -> Self {
            Self::with_categories(["Electronics", "Bags", "Documents", "Clothing", "Keys", "Other"])
        }

        /// Makes the next store call at `point` fail
        pub fn fail_next(&self, point: FailPoint) {
            if let Ok(mut slot) = self.fail_point.lock() {
                *slot = Some(point);
            }
        }
    }

    fn trip(fail_point: &StdMutex<Option<FailPoint>>, point: FailPoint) -> Result<(), PortError> {
        let mut slot = match fail_point.lock() {
            Ok(slot) => slot,
            Err(poisoned) => poisoned.into_inner(),
        };
        if *slot == Some(point) {
            *slot = None;
            return Err(PortError::internal(format!("injected failure at {:?}", point)));
        }
        Ok(())
    }

    impl DomainPort for InMemoryLostFoundStore {}

    #[async_trait]
    impl HealthCheckable for InMemoryLostFoundStore {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult {
                adapter_id: "in-memory-lost-found".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms: 0,
                message: Some("In-memory store always healthy".to_string()),
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl LostFoundPort for InMemoryLostFoundStore {
        async fn begin(&self) -> Result<Box<dyn LostFoundTransaction>, PortError> {
            let guard = self.state.clone().lock_owned().await;
            let working = guard.clone();
            Ok(Box::new(InMemoryTransaction {
                guard,
                working,
                fail_point: self.fail_point.clone(),
            }))
        }

        async fn get_report(&self, id: ReportId) -> Result<Option<ItemReport>, PortError> {
            Ok(self.state.lock().await.reports.get(&id).cloned())
        }

        async fn list_reports(&self, filter: ReportFilter) -> Result<Vec<ItemReport>, PortError> {
            let state = self.state.lock().await;
            Ok(state
                .reports
                .values()
                .rev()
                .filter(|r| filter.matches(r))
                .cloned()
                .collect())
        }

        async fn list_categories(&self) -> Result<Vec<Category>, PortError> {
            let state = self.state.lock().await;
            Ok(state
                .categories
                .iter()
                .map(|(id, name)| Category { id: *id, name: name.clone() })
                .collect())
        }

        async fn claims_for_report(&self, report_id: ReportId) -> Result<Vec<ClaimRequest>, PortError> {
            Ok(self.state.lock().await.report_claims(report_id))
        }

        async fn list_claim_details(&self) -> Result<Vec<ClaimDetail>, PortError> {
            let state = self.state.lock().await;
            state
                .claims
                .values()
                .rev()
                .map(|claim| -> Result<ClaimDetail, PortError> {
                    let report = state
                        .reports
                        .get(&claim.report_id)
                        .ok_or_else(|| PortError::not_found("Report", claim.report_id))?;
                    Ok(ClaimDetail {
                        claim_id: claim.id,
                        report_id: claim.report_id,
                        item_name: report.name.clone(),
                        category_name: report.category_name.clone(),
                        location: report.location.clone(),
                        reason: claim.reason.clone(),
                        state: claim.state,
                        submitted_at: claim.submitted_at,
                        decided_at: claim.decided_at,
                    })
                })
                .collect()
        }
    }

    /// Transaction over a private copy of the store
    pub struct InMemoryTransaction {
        guard: OwnedMutexGuard<StoreState>,
        working: StoreState,
        fail_point: Arc<StdMutex<Option<FailPoint>>>,
    }

    #[async_trait]
    impl LostFoundTransaction for InMemoryTransaction {
        async fn category_exists(&mut self, id: CategoryId) -> Result<bool, PortError> {
            Ok(self.working.categories.contains_key(&id))
        }

        async fn insert_report(&mut self, report: &NewItemReport) -> Result<ReportId, PortError> {
            trip(&self.fail_point, FailPoint::InsertReport)?;
            let category_name = self
                .working
                .categories
                .get(&report.category_id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Category", report.category_id))?;

            let location_id = match self.working.locations.get(&report.location) {
                Some(id) => *id,
                None => {
                    let id = self.working.next_id::<LocationId>()?;
                    self.working.locations.insert(report.location.clone(), id);
                    id
                }
            };
            let image_id = match &report.image_url {
                Some(url) => {
                    let id = self.working.next_id::<ImageId>()?;
                    self.working.images.insert(id, url.clone());
                    Some(id)
                }
                None => None,
            };

            let id = self.working.next_id::<ReportId>()?;
            self.working.reports.insert(
                id,
                ItemReport {
                    id,
                    kind: report.kind,
                    name: report.name.clone(),
                    category_id: report.category_id,
                    category_name,
                    description: report.description.clone(),
                    image_id,
                    image_url: report.image_url.clone(),
                    location_id,
                    location: report.location.clone(),
                    date: report.date,
                    is_claimed: false,
                    status: ReportStatus::Active,
                    created_at: Utc::now(),
                },
            );
            Ok(id)
        }

        async fn lock_report(&mut self, id: ReportId) -> Result<Option<ItemReport>, PortError> {
            Ok(self.working.reports.get(&id).cloned())
        }

        async fn claims_for_report(&mut self, report_id: ReportId) -> Result<Vec<ClaimRequest>, PortError> {
            Ok(self.working.report_claims(report_id))
        }

        async fn insert_claim(&mut self, claim: &NewClaim) -> Result<ClaimId, PortError> {
            trip(&self.fail_point, FailPoint::InsertClaim)?;
            if !self.working.reports.contains_key(&claim.report_id) {
                return Err(PortError::not_found("Report", claim.report_id));
            }
            // Mirrors the partial unique indexes on claim_requests
            let clash = matches!(claim.state, ClaimState::Pending | ClaimState::Approved)
                && self
                    .working
                    .report_claims(claim.report_id)
                    .iter()
                    .any(|c| c.state == claim.state);
            if clash {
                return Err(PortError::conflict(format!(
                    "report {} already has a {} claim",
                    claim.report_id, claim.state
                )));
            }

            let id = self.working.next_id::<ClaimId>()?;
            let now = Utc::now();
            self.working.claims.insert(
                id,
                ClaimRequest {
                    id,
                    report_id: claim.report_id,
                    reason: claim.reason.clone(),
                    state: claim.state,
                    submitted_at: now,
                    decided_at: claim.state.is_decided().then_some(now),
                },
            );
            Ok(id)
        }

        async fn update_claim_state(&mut self, claim_id: ClaimId, state: ClaimState) -> Result<(), PortError> {
            trip(&self.fail_point, FailPoint::UpdateClaimState)?;
            let claim = self
                .working
                .claims
                .get_mut(&claim_id)
                .ok_or_else(|| PortError::not_found("Claim", claim_id))?;
            claim.state = state;
            claim.decided_at = Some(Utc::now());
            Ok(())
        }

        async fn set_report_claimed(&mut self, report_id: ReportId) -> Result<(), PortError> {
            trip(&self.fail_point, FailPoint::SetReportClaimed)?;
            let report = self.working.report_mut(report_id)?;
            if report.kind != ItemKind::Found {
                return Err(PortError::validation("only found reports can be claimed"));
            }
            report.is_claimed = true;
            Ok(())
        }

        async fn set_report_status(&mut self, report_id: ReportId, status: ReportStatus) -> Result<(), PortError> {
            trip(&self.fail_point, FailPoint::SetReportStatus)?;
            self.working.report_mut(report_id)?.status = status;
            Ok(())
        }

        async fn commit(self: Box<Self>) -> Result<(), PortError> {
            trip(&self.fail_point, FailPoint::Commit)?;
            let InMemoryTransaction { mut guard, working, .. } = *self;
            *guard = working;
            Ok(())
        }

        async fn rollback(self: Box<Self>) -> Result<(), PortError> {
            Ok(())
        }
    }
}
