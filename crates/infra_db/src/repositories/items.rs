//! Item report repository
//!
//! Reads run against the pool. Writes take a connection so that the caller
//! can group them inside one transaction.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgConnection, PgPool};

use crate::error::DatabaseError;

const REPORT_SELECT: &str = r#"
    SELECT
        r.report_id,
        r.kind,
        r.item_name,
        r.category_id,
        c.name AS category_name,
        r.description,
        r.image_id,
        i.url AS image_url,
        r.location_id,
        l.name AS location_name,
        r.item_date,
        r.is_claimed,
        r.status,
        r.created_at
    FROM item_reports r
    JOIN categories c ON c.category_id = r.category_id
    JOIN locations l ON l.location_id = r.location_id
    LEFT JOIN images i ON i.image_id = r.image_id
"#;

/// Repository for lost and found item reports
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: PgPool,
}

impl ItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves a report by identifier, whatever its status
    pub async fn find_by_id(&self, report_id: i32) -> Result<Option<ReportRow>, DatabaseError> {
        let sql = format!("{REPORT_SELECT} WHERE r.report_id = $1");
        let row = sqlx::query_as::<_, ReportRow>(&sql)
            .bind(report_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Lists active reports of one kind, newest first
    ///
    /// # Arguments
    ///
    /// * `kind` - Lost or found
    /// * `claimed` - Restrict to claimed or unclaimed reports; `None` for both
    pub async fn list_active(
        &self,
        kind: ItemKind,
        claimed: Option<bool>,
    ) -> Result<Vec<ReportRow>, DatabaseError> {
        let sql = format!(
            "{REPORT_SELECT} WHERE r.status = 'active' AND r.kind = $1 \
             AND ($2::boolean IS NULL OR r.is_claimed = $2) \
             ORDER BY r.created_at DESC, r.report_id DESC"
        );
        let rows = sqlx::query_as::<_, ReportRow>(&sql)
            .bind(kind)
            .bind(claimed)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Locks a report row until the surrounding transaction ends
    pub async fn lock_for_update(
        conn: &mut PgConnection,
        report_id: i32,
    ) -> Result<Option<ReportRow>, DatabaseError> {
        let sql = format!("{REPORT_SELECT} WHERE r.report_id = $1 FOR UPDATE OF r");
        let row = sqlx::query_as::<_, ReportRow>(&sql)
            .bind(report_id)
            .fetch_optional(conn)
            .await?;
        Ok(row)
    }

    /// Inserts a report, creating its location and image rows as needed
    pub async fn insert(conn: &mut PgConnection, report: NewReportRow) -> Result<i32, DatabaseError> {
        let location_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO locations (name) VALUES ($1)
            ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
            RETURNING location_id
            "#,
        )
        .bind(&report.location)
        .fetch_one(&mut *conn)
        .await?;

        let image_id = match &report.image_url {
            Some(url) => Some(
                sqlx::query_scalar::<_, i32>("INSERT INTO images (url) VALUES ($1) RETURNING image_id")
                    .bind(url)
                    .fetch_one(&mut *conn)
                    .await?,
            ),
            None => None,
        };

        let report_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO item_reports (
                kind, item_name, category_id, description,
                image_id, location_id, item_date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING report_id
            "#,
        )
        .bind(report.kind)
        .bind(&report.item_name)
        .bind(report.category_id)
        .bind(&report.description)
        .bind(image_id)
        .bind(location_id)
        .bind(report.item_date)
        .fetch_one(&mut *conn)
        .await?;

        Ok(report_id)
    }

    /// Sets the claimed flag on a report
    pub async fn mark_claimed(conn: &mut PgConnection, report_id: i32) -> Result<(), DatabaseError> {
        let result = sqlx::query("UPDATE item_reports SET is_claimed = TRUE WHERE report_id = $1")
            .bind(report_id)
            .execute(conn)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Report", report_id));
        }
        Ok(())
    }

    pub async fn set_status(
        conn: &mut PgConnection,
        report_id: i32,
        status: ReportStatus,
    ) -> Result<(), DatabaseError> {
        let result = sqlx::query("UPDATE item_reports SET status = $2 WHERE report_id = $1")
            .bind(report_id)
            .bind(status)
            .execute(conn)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Report", report_id));
        }
        Ok(())
    }
}

// ============================================================================
// Row Types
// ============================================================================

/// Item report joined with its category, location and image
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReportRow {
    pub report_id: i32,
    pub kind: ItemKind,
    pub item_name: String,
    pub category_id: i32,
    pub category_name: String,
    pub description: String,
    pub image_id: Option<i32>,
    pub image_url: Option<String>,
    pub location_id: i32,
    pub location_name: String,
    pub item_date: NaiveDate,
    pub is_claimed: bool,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
}

/// Data for inserting a report
#[derive(Debug, Clone)]
pub struct NewReportRow {
    pub kind: ItemKind,
    pub item_name: String,
    pub category_id: i32,
    pub description: String,
    pub image_url: Option<String>,
    pub location: String,
    pub item_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "item_kind", rename_all = "snake_case")]
pub enum ItemKind {
    Lost,
    Found,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "report_status", rename_all = "snake_case")]
pub enum ReportStatus {
    Active,
    Removed,
}
