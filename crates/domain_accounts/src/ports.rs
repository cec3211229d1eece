//! Accounts Domain Ports
//!
//! The `AccountPort` trait covers users, administrator credentials and
//! feedback. Each write is a single statement, so the port has no
//! transaction handle; uniqueness and references are enforced by the store
//! and surface as `PortError::Conflict` and `PortError::NotFound`.
//!
//! - **PostgreSQL adapter**: `infra_db::adapters::PostgresAccountAdapter`
//! - **In-memory adapter**: [`mock::InMemoryAccountStore`] (feature `mock`)

use async_trait::async_trait;

use core_kernel::{AdminId, DomainPort, FeedbackId, HealthCheckable, PortError, UserId};

use crate::admin::AdminCredential;
use crate::feedback::{NewFeedback, ReviewRow};
use crate::user::{NewUser, UserCredential, UserSummary};

/// Store access for accounts and feedback
#[async_trait]
pub trait AccountPort: DomainPort + HealthCheckable {
    /// Inserts a user; a duplicate email is a `Conflict`
    async fn insert_user(&self, user: &NewUser) -> Result<UserId, PortError>;

    /// Looks up a credential by normalized email
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserCredential>, PortError>;

    async fn user_exists(&self, id: UserId) -> Result<bool, PortError>;

    async fn find_admin_by_email(&self, email: &str) -> Result<Option<AdminCredential>, PortError>;

    /// Creates the administrator or replaces the key hash of an existing one
    /// with the same email
    async fn upsert_admin(&self, email: &str, key_hash: &str) -> Result<AdminId, PortError>;

    /// Appends a feedback entry; an unknown user is `NotFound`
    async fn insert_feedback(&self, feedback: &NewFeedback) -> Result<FeedbackId, PortError>;

    async fn list_user_summaries(&self) -> Result<Vec<UserSummary>, PortError>;

    /// Feedback rows with author names, newest first
    async fn list_reviews(&self) -> Result<Vec<ReviewRow>, PortError>;
}

/// In-memory implementation of AccountPort for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use chrono::{DateTime, Utc};
    use tokio::sync::RwLock;

    use core_kernel::{AdapterHealth, CoreError, HealthCheckResult};

    use crate::feedback::Rating;
    use crate::user::AccountStatus;

    #[derive(Debug, Clone)]
    struct StoredUser {
        user: NewUser,
        created_at: DateTime<Utc>,
    }

    #[derive(Debug, Clone)]
    struct StoredFeedback {
        user_id: Option<UserId>,
        rating: Rating,
        comments: String,
        created_at: DateTime<Utc>,
    }

    #[derive(Debug, Default)]
    struct AccountState {
        users: BTreeMap<UserId, StoredUser>,
        admins: BTreeMap<AdminId, AdminCredential>,
        feedback: BTreeMap<FeedbackId, StoredFeedback>,
        last_id: i64,
    }

    impl AccountState {
        fn next_id<T>(&mut self) -> Result<T, PortError>
        where
            T: TryFrom<i64, Error = CoreError>,
        {
            self.last_id += 1;
            T::try_from(self.last_id).map_err(|e| PortError::internal(e.to_string()))
        }
    }

    /// In-memory account store
    #[derive(Debug, Clone, Default)]
    pub struct InMemoryAccountStore {
        state: Arc<RwLock<AccountState>>,
    }

    impl InMemoryAccountStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Changes a user's status, e.g. to suspend an account
        pub async fn set_status(&self, id: UserId, status: AccountStatus) -> Result<(), PortError> {
            let mut state = self.state.write().await;
            let stored = state
                .users
                .get_mut(&id)
                .ok_or_else(|| PortError::not_found("User", id))?;
            stored.user.status = status;
            Ok(())
        }
    }

    impl DomainPort for InMemoryAccountStore {}

    #[async_trait]
    impl HealthCheckable for InMemoryAccountStore {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult {
                adapter_id: "in-memory-accounts".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms: 0,
                message: None,
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl AccountPort for InMemoryAccountStore {
        async fn insert_user(&self, user: &NewUser) -> Result<UserId, PortError> {
            let mut state = self.state.write().await;
            if state.users.values().any(|u| u.user.email == user.email) {
                return Err(PortError::conflict(format!(
                    "Email {} is already registered",
                    user.email
                )));
            }
            let id = state.next_id::<UserId>()?;
            state.users.insert(
                id,
                StoredUser {
                    user: user.clone(),
                    created_at: Utc::now(),
                },
            );
            Ok(id)
        }

        async fn find_user_by_email(&self, email: &str) -> Result<Option<UserCredential>, PortError> {
            let state = self.state.read().await;
            Ok(state
                .users
                .iter()
                .find(|(_, u)| u.user.email == email)
                .map(|(id, u)| UserCredential {
                    id: *id,
                    email: u.user.email.clone(),
                    password_hash: u.user.password_hash.clone(),
                    status: u.user.status,
                }))
        }

        async fn user_exists(&self, id: UserId) -> Result<bool, PortError> {
            Ok(self.state.read().await.users.contains_key(&id))
        }

        async fn find_admin_by_email(&self, email: &str) -> Result<Option<AdminCredential>, PortError> {
            let state = self.state.read().await;
            Ok(state.admins.values().find(|a| a.email == email).cloned())
        }

        async fn upsert_admin(&self, email: &str, key_hash: &str) -> Result<AdminId, PortError> {
            let mut state = self.state.write().await;
            let email = email.to_lowercase();
            if let Some(admin) = state.admins.values_mut().find(|a| a.email == email) {
                admin.key_hash = key_hash.to_string();
                return Ok(admin.id);
            }
            let id = state.next_id::<AdminId>()?;
            state.admins.insert(
                id,
                AdminCredential {
                    id,
                    email,
                    key_hash: key_hash.to_string(),
                },
            );
            Ok(id)
        }

        async fn insert_feedback(&self, feedback: &NewFeedback) -> Result<FeedbackId, PortError> {
            let mut state = self.state.write().await;
            if let Some(user_id) = feedback.user_id {
                if !state.users.contains_key(&user_id) {
                    return Err(PortError::not_found("User", user_id));
                }
            }
            let id = state.next_id::<FeedbackId>()?;
            state.feedback.insert(
                id,
                StoredFeedback {
                    user_id: feedback.user_id,
                    rating: feedback.rating,
                    comments: feedback.comments.clone(),
                    created_at: Utc::now(),
                },
            );
            Ok(id)
        }

        async fn list_user_summaries(&self) -> Result<Vec<UserSummary>, PortError> {
            let state = self.state.read().await;
            Ok(state
                .users
                .iter()
                .map(|(id, u)| UserSummary {
                    id: *id,
                    full_name: u.user.full_name.clone(),
                    phone_number: u.user.phone_number.clone(),
                    email: u.user.email.clone(),
                    status: u.user.status,
                    created_at: u.created_at,
                })
                .collect())
        }

        async fn list_reviews(&self) -> Result<Vec<ReviewRow>, PortError> {
            let state = self.state.read().await;
            Ok(state
                .feedback
                .iter()
                .rev()
                .map(|(id, f)| ReviewRow {
                    id: *id,
                    user_id: f.user_id,
                    author_name: f
                        .user_id
                        .and_then(|uid| state.users.get(&uid))
                        .map(|u| u.user.full_name.clone()),
                    rating: f.rating,
                    comments: f.comments.clone(),
                    created_at: f.created_at,
                })
                .collect())
        }
    }
}
