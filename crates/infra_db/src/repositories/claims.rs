//! Claims repository implementation
//!
//! Database access for ownership claims against found reports. The partial
//! unique indexes on `claim_requests` allow one pending and one approved
//! claim per report; inserts that break them fail with a duplicate entry.

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::error::DatabaseError;

/// Repository for managing claim requests
#[derive(Debug, Clone)]
pub struct ClaimsRepository {
    pool: PgPool,
}

impl ClaimsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lists every claim with its report details, newest first
    pub async fn list_details(&self) -> Result<Vec<ClaimDetailRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ClaimDetailRow>(
            r#"
            SELECT
                cr.claim_id,
                cr.report_id,
                r.item_name,
                c.name AS category_name,
                l.name AS location_name,
                cr.reason,
                cr.state,
                cr.submitted_at,
                cr.decided_at
            FROM claim_requests cr
            JOIN item_reports r ON r.report_id = cr.report_id
            JOIN categories c ON c.category_id = r.category_id
            JOIN locations l ON l.location_id = r.location_id
            ORDER BY cr.submitted_at DESC, cr.claim_id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn for_report(&self, report_id: i32) -> Result<Vec<ClaimRow>, DatabaseError> {
        Self::for_report_with(&self.pool, report_id).await
    }

    /// Claims against one report in submission order
    ///
    /// Works with the pool or with a transaction's connection.
    pub async fn for_report_with<'e, E>(executor: E, report_id: i32) -> Result<Vec<ClaimRow>, DatabaseError>
    where
        E: PgExecutor<'e>,
    {
        let rows = sqlx::query_as::<_, ClaimRow>(
            r#"
            SELECT claim_id, report_id, reason, state, submitted_at, decided_at
            FROM claim_requests
            WHERE report_id = $1
            ORDER BY submitted_at, claim_id
            "#,
        )
        .bind(report_id)
        .fetch_all(executor)
        .await?;
        Ok(rows)
    }

    /// Inserts a claim; claims inserted already decided are stamped now
    pub async fn insert(conn: &mut PgConnection, claim: NewClaimRow) -> Result<i32, DatabaseError> {
        let decided_at = (claim.state != ClaimState::Pending).then(Utc::now);

        let claim_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO claim_requests (report_id, reason, state, decided_at)
            VALUES ($1, $2, $3, $4)
            RETURNING claim_id
            "#,
        )
        .bind(claim.report_id)
        .bind(&claim.reason)
        .bind(claim.state)
        .bind(decided_at)
        .fetch_one(conn)
        .await?;
        Ok(claim_id)
    }

    /// Moves a pending claim to a decided state
    ///
    /// Returns `DuplicateEntry` when the claim is no longer pending.
    pub async fn decide(
        conn: &mut PgConnection,
        claim_id: i32,
        state: ClaimState,
    ) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE claim_requests
            SET state = $2, decided_at = now()
            WHERE claim_id = $1 AND state = 'pending'
            "#,
        )
        .bind(claim_id)
        .bind(state)
        .execute(conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::DuplicateEntry(format!(
                "claim {} is not pending",
                claim_id
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClaimRow {
    pub claim_id: i32,
    pub report_id: i32,
    pub reason: String,
    pub state: ClaimState,
    pub submitted_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
}

/// Claim joined with the report it targets
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClaimDetailRow {
    pub claim_id: i32,
    pub report_id: i32,
    pub item_name: String,
    pub category_name: String,
    pub location_name: String,
    pub reason: String,
    pub state: ClaimState,
    pub submitted_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewClaimRow {
    pub report_id: i32,
    pub reason: String,
    pub state: ClaimState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "claim_state", rename_all = "snake_case")]
pub enum ClaimState {
    Pending,
    Approved,
    Rejected,
}
