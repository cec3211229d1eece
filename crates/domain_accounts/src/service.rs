//! Account service
//!
//! Signup, login, admin login and feedback. Secrets are hashed through a
//! [`CredentialHasher`] supplied by the caller, so this crate never depends
//! on a particular hashing scheme and the store never sees plaintext.

use std::sync::Arc;

use tracing::{info, instrument, warn};
use validator::Validate;

use core_kernel::{AdminId, FeedbackId, UserId};

use crate::error::AccountError;
use crate::feedback::{FeedbackAuthor, NewFeedback, Rating, ReviewRow};
use crate::ports::AccountPort;
use crate::user::{normalize_email, AccountStatus, NewUser, SignupForm, UserSummary};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// One-way hashing for passwords and admin keys
pub trait CredentialHasher: Send + Sync {
    /// Produces a PHC string with a fresh salt
    fn hash(&self, secret: &str) -> Result<String, AccountError>;

    /// Checks a secret against a stored PHC string; malformed hashes never verify
    fn verify(&self, secret: &str, hash: &str) -> bool;
}

#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn AccountPort>,
    hasher: Arc<dyn CredentialHasher>,
}

impl AccountService {
    pub fn new(store: Arc<dyn AccountPort>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { store, hasher }
    }

    pub fn store(&self) -> &Arc<dyn AccountPort> {
        &self.store
    }

    /// Registers a new active user
    ///
    /// # Errors
    ///
    /// * `InvalidArgument` - a field fails validation
    /// * `Conflict` - the email is already registered
    #[instrument(skip(self, form))]
    pub async fn signup(&self, form: SignupForm) -> Result<UserId, AccountError> {
        let form = form.normalized();
        form.validate()?;

        let user = NewUser {
            password_hash: self.hasher.hash(&form.password)?,
            full_name: form.full_name,
            phone_number: form.phone_number,
            email: form.email,
            status: AccountStatus::Active,
        };
        let user_id = self.store.insert_user(&user).await?;

        info!(%user_id, "user signed up");
        Ok(user_id)
    }

    /// Authenticates a user by email and password
    ///
    /// Unknown emails and wrong passwords give the same error.
    #[instrument(skip(self, email, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<UserId, AccountError> {
        let email = required_email(email)?;
        if password.is_empty() {
            return Err(AccountError::invalid("password is required"));
        }

        let credential = self
            .store
            .find_user_by_email(&email)
            .await?
            .filter(|c| self.hasher.verify(password, &c.password_hash))
            .ok_or_else(|| AccountError::unauthorized(INVALID_CREDENTIALS))?;

        if !credential.status.can_sign_in() {
            warn!(user_id = %credential.id, status = %credential.status, "login refused");
            return Err(AccountError::unauthorized("Account is not active"));
        }

        info!(user_id = %credential.id, "user logged in");
        Ok(credential.id)
    }

    /// Authenticates an administrator by email and admin key
    #[instrument(skip(self, email, admin_key))]
    pub async fn admin_login(&self, email: &str, admin_key: &str) -> Result<AdminId, AccountError> {
        let email = required_email(email)?;
        if admin_key.is_empty() {
            return Err(AccountError::invalid("adminkey is required"));
        }

        let admin = self
            .store
            .find_admin_by_email(&email)
            .await?
            .filter(|a| self.hasher.verify(admin_key, &a.key_hash))
            .ok_or_else(|| AccountError::unauthorized("Invalid email or admin key"))?;

        info!(admin_id = %admin.id, "admin logged in");
        Ok(admin.id)
    }

    /// Creates or re-keys an administrator from deployment configuration
    ///
    /// Running it again with the same email replaces the stored key, so a
    /// restart with a rotated key takes effect without touching the database.
    #[instrument(skip(self, email, admin_key))]
    pub async fn provision_admin(&self, email: &str, admin_key: &str) -> Result<AdminId, AccountError> {
        let email = required_email(email)?;
        if admin_key.trim().is_empty() {
            return Err(AccountError::invalid("admin key must not be blank"));
        }

        let key_hash = self.hasher.hash(admin_key)?;
        let admin_id = self.store.upsert_admin(&email, &key_hash).await?;

        info!(%admin_id, "administrator provisioned");
        Ok(admin_id)
    }

    /// Records a feedback entry
    ///
    /// # Errors
    ///
    /// * `InvalidArgument` - rating outside 1..=5 or blank comments
    /// * `NotFound` - the given user ID or email matches no user
    #[instrument(skip(self, comments))]
    pub async fn submit_feedback(
        &self,
        author: FeedbackAuthor,
        rating: i64,
        comments: &str,
    ) -> Result<FeedbackId, AccountError> {
        let rating = Rating::new(rating)?;
        let comments = comments.trim();
        if comments.is_empty() {
            return Err(AccountError::invalid("comments must be a non-empty string"));
        }

        let user_id = match author {
            FeedbackAuthor::User(id) => {
                if !self.store.user_exists(id).await? {
                    return Err(AccountError::not_found("User", id));
                }
                Some(id)
            }
            FeedbackAuthor::Email(email) => {
                let credential = self
                    .store
                    .find_user_by_email(&email)
                    .await?
                    .ok_or_else(|| AccountError::not_found("User with email", &email))?;
                Some(credential.id)
            }
            FeedbackAuthor::Anonymous => None,
        };

        let feedback_id = self
            .store
            .insert_feedback(&NewFeedback {
                user_id,
                rating,
                comments: comments.to_string(),
            })
            .await?;

        info!(%feedback_id, rating = rating.get(), "feedback recorded");
        Ok(feedback_id)
    }

    pub async fn user_summaries(&self) -> Result<Vec<UserSummary>, AccountError> {
        Ok(self.store.list_user_summaries().await?)
    }

    pub async fn reviews(&self) -> Result<Vec<ReviewRow>, AccountError> {
        Ok(self.store.list_reviews().await?)
    }
}

fn required_email(email: &str) -> Result<String, AccountError> {
    let email = normalize_email(email);
    if email.is_empty() {
        return Err(AccountError::invalid("email is required"));
    }
    Ok(email)
}

/// Test doubles for the service seams
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;

    /// Reversible stand-in for a real hasher; never use outside tests
    #[derive(Debug, Clone, Copy, Default)]
    pub struct PlaintextHasher;

    impl CredentialHasher for PlaintextHasher {
        fn hash(&self, secret: &str) -> Result<String, AccountError> {
            Ok(format!("plain${}", secret))
        }

        fn verify(&self, secret: &str, hash: &str) -> bool {
            hash.strip_prefix("plain$") == Some(secret)
        }
    }
}
