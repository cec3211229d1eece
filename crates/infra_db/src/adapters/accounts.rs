//! PostgreSQL Account Adapter
//!
//! Implements `AccountPort` over the `AccountRepository`.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::instrument;

use core_kernel::{
    AdapterHealth, AdminId, CoreError, DomainPort, FeedbackId, HealthCheckResult, HealthCheckable,
    PortError, UserId,
};
use domain_accounts::{
    AccountPort, AccountStatus, AdminCredential, NewFeedback, NewUser, Rating, ReviewRow,
    UserCredential, UserSummary,
};

use crate::error::DatabaseError;
use crate::repositories::accounts::{
    AccountRepository, AccountStatus as DbAccountStatus, NewFeedbackRow, NewUserRow,
};

const ADAPTER_ID: &str = "postgres-account-adapter";

/// PostgreSQL-backed implementation of the AccountPort trait
#[derive(Debug, Clone)]
pub struct PostgresAccountAdapter {
    repository: AccountRepository,
    pool: PgPool,
}

impl PostgresAccountAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: AccountRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresAccountAdapter {}

#[async_trait]
impl HealthCheckable for PostgresAccountAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();
        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        HealthCheckResult {
            adapter_id: ADAPTER_ID.to_string(),
            status: if result.is_ok() {
                AdapterHealth::Healthy
            } else {
                AdapterHealth::Unhealthy
            },
            latency_ms: start.elapsed().as_millis() as u64,
            message: result.err().map(|e| format!("Database error: {}", e)),
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl AccountPort for PostgresAccountAdapter {
    #[instrument(skip(self, user))]
    async fn insert_user(&self, user: &NewUser) -> Result<UserId, PortError> {
        let row = NewUserRow {
            full_name: user.full_name.clone(),
            phone_number: user.phone_number.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            status: domain_to_db_status(user.status),
        };
        match self.repository.insert_user(row).await {
            Ok(id) => to_id(id),
            Err(DatabaseError::DuplicateEntry(_)) => Err(PortError::conflict(format!(
                "Email {} is already registered",
                user.email
            ))),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self, email))]
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserCredential>, PortError> {
        self.repository
            .find_credential(email)
            .await?
            .map(|row| -> Result<UserCredential, PortError> {
                Ok(UserCredential {
                    id: to_id(row.user_id)?,
                    email: row.email,
                    password_hash: row.password_hash,
                    status: db_to_domain_status(row.status),
                })
            })
            .transpose()
    }

    #[instrument(skip(self), fields(user_id = %id))]
    async fn user_exists(&self, id: UserId) -> Result<bool, PortError> {
        Ok(self.repository.user_exists(id.get()).await?)
    }

    #[instrument(skip(self, email))]
    async fn find_admin_by_email(&self, email: &str) -> Result<Option<AdminCredential>, PortError> {
        self.repository
            .find_admin(email)
            .await?
            .map(|row| -> Result<AdminCredential, PortError> {
                Ok(AdminCredential {
                    id: to_id(row.admin_id)?,
                    email: row.email,
                    key_hash: row.key_hash,
                })
            })
            .transpose()
    }

    #[instrument(skip(self, email, key_hash))]
    async fn upsert_admin(&self, email: &str, key_hash: &str) -> Result<AdminId, PortError> {
        let id = self.repository.upsert_admin(email, key_hash).await?;
        to_id(id)
    }

    #[instrument(skip(self, feedback), fields(rating = feedback.rating.get()))]
    async fn insert_feedback(&self, feedback: &NewFeedback) -> Result<FeedbackId, PortError> {
        let row = NewFeedbackRow {
            user_id: feedback.user_id.map(|id| id.get()),
            rating: feedback.rating.get(),
            comments: feedback.comments.clone(),
        };
        let id = self.repository.insert_feedback(row).await?;
        to_id(id)
    }

    #[instrument(skip(self))]
    async fn list_user_summaries(&self) -> Result<Vec<UserSummary>, PortError> {
        self.repository
            .user_summaries()
            .await?
            .into_iter()
            .map(|row| -> Result<UserSummary, PortError> {
                Ok(UserSummary {
                    id: to_id(row.user_id)?,
                    full_name: row.full_name,
                    phone_number: row.phone_number,
                    email: row.email,
                    status: db_to_domain_status(row.status),
                    created_at: row.created_at,
                })
            })
            .collect()
    }

    #[instrument(skip(self))]
    async fn list_reviews(&self) -> Result<Vec<ReviewRow>, PortError> {
        self.repository
            .reviews()
            .await?
            .into_iter()
            .map(|row| -> Result<ReviewRow, PortError> {
                Ok(ReviewRow {
                    id: to_id(row.feedback_id)?,
                    user_id: row.user_id.map(to_id::<UserId>).transpose()?,
                    author_name: row.author_name,
                    rating: Rating::new(i64::from(row.rating))
                        .map_err(|e| PortError::transformation(e.to_string()))?,
                    comments: row.comments,
                    created_at: row.created_at,
                })
            })
            .collect()
    }
}

fn to_id<T>(value: i32) -> Result<T, PortError>
where
    T: TryFrom<i32, Error = CoreError>,
{
    T::try_from(value).map_err(|e| PortError::transformation(e.to_string()))
}

fn db_to_domain_status(status: DbAccountStatus) -> AccountStatus {
    match status {
        DbAccountStatus::Active => AccountStatus::Active,
        DbAccountStatus::Inactive => AccountStatus::Inactive,
        DbAccountStatus::Suspended => AccountStatus::Suspended,
    }
}

fn domain_to_db_status(status: AccountStatus) -> DbAccountStatus {
    match status {
        AccountStatus::Active => DbAccountStatus::Active,
        AccountStatus::Inactive => DbAccountStatus::Inactive,
        AccountStatus::Suspended => DbAccountStatus::Suspended,
    }
}
