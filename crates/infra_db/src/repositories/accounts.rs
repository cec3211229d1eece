//! Account repository: users, administrators and feedback

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::DatabaseError;

/// Repository for user accounts, admin credentials and feedback
#[derive(Debug, Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a user; the case-insensitive email index rejects duplicates
    pub async fn insert_user(&self, user: NewUserRow) -> Result<i32, DatabaseError> {
        let user_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO users (full_name, phone_number, email, password_hash, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING user_id
            "#,
        )
        .bind(&user.full_name)
        .bind(&user.phone_number)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.status)
        .fetch_one(&self.pool)
        .await?;
        Ok(user_id)
    }

    pub async fn find_credential(&self, email: &str) -> Result<Option<CredentialRow>, DatabaseError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT user_id, email, password_hash, status
            FROM users
            WHERE lower(email) = lower($1)
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn user_exists(&self, user_id: i32) -> Result<bool, DatabaseError> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM users WHERE user_id = $1)")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    pub async fn find_admin(&self, email: &str) -> Result<Option<AdminRow>, DatabaseError> {
        let row = sqlx::query_as::<_, AdminRow>(
            "SELECT admin_id, email, key_hash FROM admins WHERE lower(email) = lower($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Inserts an administrator, or rotates the key of the one holding the
    /// same email (matched case-insensitively through `admins_email_unique`)
    pub async fn upsert_admin(&self, email: &str, key_hash: &str) -> Result<i32, DatabaseError> {
        let admin_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO admins (email, key_hash)
            VALUES ($1, $2)
            ON CONFLICT ((lower(email))) DO UPDATE SET key_hash = EXCLUDED.key_hash
            RETURNING admin_id
            "#,
        )
        .bind(email)
        .bind(key_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(admin_id)
    }

    pub async fn insert_feedback(&self, feedback: NewFeedbackRow) -> Result<i32, DatabaseError> {
        let feedback_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO feedback (user_id, rating, comments)
            VALUES ($1, $2, $3)
            RETURNING feedback_id
            "#,
        )
        .bind(feedback.user_id)
        .bind(feedback.rating)
        .bind(&feedback.comments)
        .fetch_one(&self.pool)
        .await?;
        Ok(feedback_id)
    }

    pub async fn user_summaries(&self) -> Result<Vec<UserSummaryRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, UserSummaryRow>(
            r#"
            SELECT user_id, full_name, phone_number, email, status, created_at
            FROM user_summary_view
            ORDER BY user_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Feedback with author names, newest first
    pub async fn reviews(&self) -> Result<Vec<ReviewRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ReviewRow>(
            r#"
            SELECT f.feedback_id, f.user_id, u.full_name AS author_name,
                   f.rating, f.comments, f.created_at
            FROM feedback f
            LEFT JOIN users u ON u.user_id = f.user_id
            ORDER BY f.created_at DESC, f.feedback_id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(Debug, Clone)]
pub struct NewUserRow {
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
    pub password_hash: String,
    pub status: AccountStatus,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CredentialRow {
    pub user_id: i32,
    pub email: String,
    pub password_hash: String,
    pub status: AccountStatus,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AdminRow {
    pub admin_id: i32,
    pub email: String,
    pub key_hash: String,
}

#[derive(Debug, Clone)]
pub struct NewFeedbackRow {
    pub user_id: Option<i32>,
    pub rating: i16,
    pub comments: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserSummaryRow {
    pub user_id: i32,
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReviewRow {
    pub feedback_id: i32,
    pub user_id: Option<i32>,
    pub author_name: Option<String>,
    pub rating: i16,
    pub comments: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "account_status", rename_all = "snake_case")]
pub enum AccountStatus {
    Active,
    Inactive,
    Suspended,
}
