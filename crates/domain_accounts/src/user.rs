//! User accounts
//!
//! Users sign up with a name, phone number, email and password. Emails are
//! unique regardless of case, so every email is normalized to lowercase
//! before it reaches the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use core_kernel::UserId;

/// Account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountStatus {
    Active,
    Inactive,
    Suspended,
}

impl AccountStatus {
    /// Only active accounts may sign in
    pub fn can_sign_in(&self) -> bool {
        matches!(self, AccountStatus::Active)
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountStatus::Active => write!(f, "active"),
            AccountStatus::Inactive => write!(f, "inactive"),
            AccountStatus::Suspended => write!(f, "suspended"),
        }
    }
}

/// Signup payload, checked with `validator` before anything is hashed
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    #[validate(length(min = 1, message = "fullName is required"))]
    pub full_name: String,
    #[validate(length(min = 7, max = 20, message = "phoneNumber must be 7 to 20 characters"))]
    pub phone_number: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
}

impl SignupForm {
    /// Trims text fields and lowercases the email; the password is kept as typed
    pub fn normalized(self) -> Self {
        Self {
            full_name: self.full_name.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
            email: normalize_email(&self.email),
            password: self.password,
        }
    }
}

/// A user ready for insertion; `password_hash` is a PHC string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
    pub password_hash: String,
    pub status: AccountStatus,
}

/// Stored credential used to authenticate a login
#[derive(Debug, Clone)]
pub struct UserCredential {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
    pub status: AccountStatus,
}

/// User row as listed to administrators
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
