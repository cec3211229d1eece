//! PostgreSQL Lost-and-Found Adapter
//!
//! Implements `LostFoundPort` on top of the item, claim and lookup
//! repositories. Transactions wrap an `sqlx::Transaction`; dropping one
//! without committing rolls it back.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresLostFoundAdapter;
//! use domain_claims::{ClaimLifecycleManager, LostFoundPort};
//! use std::sync::Arc;
//!
//! let port: Arc<dyn LostFoundPort> = Arc::new(PostgresLostFoundAdapter::new(pool));
//! let manager = ClaimLifecycleManager::new(port);
//! ```

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, instrument};

use core_kernel::{
    AdapterHealth, CategoryId, ClaimId, CoreError, DomainPort, HealthCheckResult,
    HealthCheckable, ImageId, LocationId, PortError, ReportId,
};
use domain_claims::{
    Category, ClaimDetail, ClaimRequest, ClaimState, ItemKind, ItemReport, LostFoundPort,
    LostFoundTransaction, NewClaim, NewItemReport, ReportFilter, ReportStatus,
};

use crate::repositories::claims::{
    ClaimDetailRow, ClaimRow, ClaimState as DbClaimState, ClaimsRepository, NewClaimRow,
};
use crate::repositories::items::{
    ItemKind as DbItemKind, ItemRepository, NewReportRow, ReportRow,
    ReportStatus as DbReportStatus,
};
use crate::repositories::lookups::LookupRepository;

const ADAPTER_ID: &str = "postgres-lost-found-adapter";

/// PostgreSQL-backed implementation of the LostFoundPort trait
#[derive(Debug, Clone)]
pub struct PostgresLostFoundAdapter {
    items: ItemRepository,
    claims: ClaimsRepository,
    lookups: LookupRepository,
    pool: PgPool,
}

impl PostgresLostFoundAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            items: ItemRepository::new(pool.clone()),
            claims: ClaimsRepository::new(pool.clone()),
            lookups: LookupRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresLostFoundAdapter {}

#[async_trait]
impl HealthCheckable for PostgresLostFoundAdapter {
    /// Runs `SELECT 1` against the pool
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;

        let (status, message) = match result {
            Ok(_) => (AdapterHealth::Healthy, None),
            Err(e) => (AdapterHealth::Unhealthy, Some(format!("Database error: {}", e))),
        };
        HealthCheckResult {
            adapter_id: ADAPTER_ID.to_string(),
            status,
            latency_ms,
            message,
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl LostFoundPort for PostgresLostFoundAdapter {
    #[instrument(skip(self))]
    async fn begin(&self) -> Result<Box<dyn LostFoundTransaction>, PortError> {
        let tx = self.pool.begin().await.map_err(crate::DatabaseError::from)?;
        Ok(Box::new(PostgresLostFoundTransaction { tx }))
    }

    #[instrument(skip(self), fields(report_id = %id))]
    async fn get_report(&self, id: ReportId) -> Result<Option<ItemReport>, PortError> {
        self.items
            .find_by_id(id.get())
            .await?
            .map(row_to_report)
            .transpose()
    }

    #[instrument(skip(self))]
    async fn list_reports(&self, filter: ReportFilter) -> Result<Vec<ItemReport>, PortError> {
        let rows = match filter {
            ReportFilter::Lost => self.items.list_active(DbItemKind::Lost, None).await?,
            ReportFilter::Found { claimed } => self.items.list_active(DbItemKind::Found, claimed).await?,
        };
        debug!(count = rows.len(), "listed reports");
        rows.into_iter().map(row_to_report).collect()
    }

    #[instrument(skip(self))]
    async fn list_categories(&self) -> Result<Vec<Category>, PortError> {
        self.lookups
            .categories()
            .await?
            .into_iter()
            .map(|row| -> Result<Category, PortError> {
                Ok(Category {
                    id: to_id(row.category_id)?,
                    name: row.name,
                })
            })
            .collect()
    }

    #[instrument(skip(self), fields(report_id = %report_id))]
    async fn claims_for_report(&self, report_id: ReportId) -> Result<Vec<ClaimRequest>, PortError> {
        self.claims
            .for_report(report_id.get())
            .await?
            .into_iter()
            .map(row_to_claim)
            .collect()
    }

    #[instrument(skip(self))]
    async fn list_claim_details(&self) -> Result<Vec<ClaimDetail>, PortError> {
        self.claims
            .list_details()
            .await?
            .into_iter()
            .map(row_to_claim_detail)
            .collect()
    }
}

/// One database transaction driven by the claim lifecycle
pub struct PostgresLostFoundTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl LostFoundTransaction for PostgresLostFoundTransaction {
    async fn category_exists(&mut self, id: CategoryId) -> Result<bool, PortError> {
        Ok(LookupRepository::category_exists(&mut *self.tx, id.get()).await?)
    }

    #[instrument(skip(self, report), fields(kind = %report.kind))]
    async fn insert_report(&mut self, report: &NewItemReport) -> Result<ReportId, PortError> {
        let row = NewReportRow {
            kind: domain_to_db_kind(report.kind),
            item_name: report.name.clone(),
            category_id: report.category_id.get(),
            description: report.description.clone(),
            image_url: report.image_url.clone(),
            location: report.location.clone(),
            item_date: report.date,
        };
        let id = ItemRepository::insert(&mut self.tx, row).await?;
        to_id(id)
    }

    #[instrument(skip(self), fields(report_id = %id))]
    async fn lock_report(&mut self, id: ReportId) -> Result<Option<ItemReport>, PortError> {
        ItemRepository::lock_for_update(&mut self.tx, id.get())
            .await?
            .map(row_to_report)
            .transpose()
    }

    async fn claims_for_report(&mut self, report_id: ReportId) -> Result<Vec<ClaimRequest>, PortError> {
        ClaimsRepository::for_report_with(&mut *self.tx, report_id.get())
            .await?
            .into_iter()
            .map(row_to_claim)
            .collect()
    }

    #[instrument(skip(self, claim), fields(report_id = %claim.report_id, state = %claim.state))]
    async fn insert_claim(&mut self, claim: &NewClaim) -> Result<ClaimId, PortError> {
        let row = NewClaimRow {
            report_id: claim.report_id.get(),
            reason: claim.reason.clone(),
            state: domain_to_db_claim_state(claim.state),
        };
        let id = ClaimsRepository::insert(&mut self.tx, row).await?;
        to_id(id)
    }

    #[instrument(skip(self), fields(claim_id = %claim_id, state = %state))]
    async fn update_claim_state(&mut self, claim_id: ClaimId, state: ClaimState) -> Result<(), PortError> {
        ClaimsRepository::decide(&mut self.tx, claim_id.get(), domain_to_db_claim_state(state)).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(report_id = %report_id))]
    async fn set_report_claimed(&mut self, report_id: ReportId) -> Result<(), PortError> {
        ItemRepository::mark_claimed(&mut self.tx, report_id.get()).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(report_id = %report_id))]
    async fn set_report_status(&mut self, report_id: ReportId, status: ReportStatus) -> Result<(), PortError> {
        let status = match status {
            ReportStatus::Active => DbReportStatus::Active,
            ReportStatus::Removed => DbReportStatus::Removed,
        };
        ItemRepository::set_status(&mut self.tx, report_id.get(), status).await?;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), PortError> {
        self.tx.commit().await.map_err(crate::DatabaseError::from)?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), PortError> {
        self.tx.rollback().await.map_err(crate::DatabaseError::from)?;
        Ok(())
    }
}

// ============================================================================
// Type Conversions
// ============================================================================

/// Converts a stored integer key into a domain identifier
fn to_id<T>(value: i32) -> Result<T, PortError>
where
    T: TryFrom<i32, Error = CoreError>,
{
    T::try_from(value).map_err(|e| PortError::transformation(e.to_string()))
}

fn db_to_domain_kind(kind: DbItemKind) -> ItemKind {
    match kind {
        DbItemKind::Lost => ItemKind::Lost,
        DbItemKind::Found => ItemKind::Found,
    }
}

fn domain_to_db_kind(kind: ItemKind) -> DbItemKind {
    match kind {
        ItemKind::Lost => DbItemKind::Lost,
        ItemKind::Found => DbItemKind::Found,
    }
}

fn db_to_domain_claim_state(state: DbClaimState) -> ClaimState {
    match state {
        DbClaimState::Pending => ClaimState::Pending,
        DbClaimState::Approved => ClaimState::Approved,
        DbClaimState::Rejected => ClaimState::Rejected,
    }
}

fn domain_to_db_claim_state(state: ClaimState) -> DbClaimState {
    match state {
        ClaimState::Pending => DbClaimState::Pending,
        ClaimState::Approved => DbClaimState::Approved,
        ClaimState::Rejected => DbClaimState::Rejected,
    }
}

fn row_to_report(row: ReportRow) -> Result<ItemReport, PortError> {
    Ok(ItemReport {
        id: to_id(row.report_id)?,
        kind: db_to_domain_kind(row.kind),
        name: row.item_name,
        category_id: to_id(row.category_id)?,
        category_name: row.category_name,
        description: row.description,
        image_id: row.image_id.map(to_id::<ImageId>).transpose()?,
        image_url: row.image_url,
        location_id: to_id::<LocationId>(row.location_id)?,
        location: row.location_name,
        date: row.item_date,
        is_claimed: row.is_claimed,
        status: match row.status {
            DbReportStatus::Active => ReportStatus::Active,
            DbReportStatus::Removed => ReportStatus::Removed,
        },
        created_at: row.created_at,
    })
}

fn row_to_claim(row: ClaimRow) -> Result<ClaimRequest, PortError> {
    Ok(ClaimRequest {
        id: to_id(row.claim_id)?,
        report_id: to_id(row.report_id)?,
        reason: row.reason,
        state: db_to_domain_claim_state(row.state),
        submitted_at: row.submitted_at,
        decided_at: row.decided_at,
    })
}

fn row_to_claim_detail(row: ClaimDetailRow) -> Result<ClaimDetail, PortError> {
    Ok(ClaimDetail {
        claim_id: to_id(row.claim_id)?,
        report_id: to_id(row.report_id)?,
        item_name: row.item_name,
        category_name: row.category_name,
        location: row.location_name,
        reason: row.reason,
        state: db_to_domain_claim_state(row.state),
        submitted_at: row.submitted_at,
        decided_at: row.decided_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_state_round_trip() {
        for state in [ClaimState::Pending, ClaimState::Approved, ClaimState::Rejected] {
            assert_eq!(db_to_domain_claim_state(domain_to_db_claim_state(state)), state);
        }
    }

    #[test]
    fn test_non_positive_key_is_transformation_error() {
        let result = to_id::<ReportId>(0);
        assert!(matches!(result, Err(PortError::Transformation { .. })));
    }
}
