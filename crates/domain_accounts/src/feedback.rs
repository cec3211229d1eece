//! User feedback
//!
//! Feedback entries are append-only. An entry is attributed to a user when
//! the submitter gives a known user ID or email, and is anonymous otherwise.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{FeedbackId, UserId};
use crate::error::AccountError;

/// Star rating from 1 to 5 inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i16")]
pub struct Rating(i16);

impl Rating {
    pub const MIN: i16 = 1;
    pub const MAX: i16 = 5;

    pub fn new(value: i64) -> Result<Self, AccountError> {
        if !(i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            return Err(AccountError::invalid(format!(
                "rating must be between {} and {}",
                Self::MIN,
                Self::MAX
            )));
        }
        Ok(Self(value as i16))
    }

    pub fn get(&self) -> i16 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = AccountError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for i16 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// Who a feedback submission claims to come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackAuthor {
    User(UserId),
    Email(String),
    Anonymous,
}

impl FeedbackAuthor {
    /// A user ID takes precedence over an email; blank emails are ignored
    pub fn from_parts(user_id: Option<UserId>, email: Option<&str>) -> Self {
        match (user_id, email.map(str::trim).filter(|e| !e.is_empty())) {
            (Some(id), _) => FeedbackAuthor::User(id),
            (None, Some(email)) => FeedbackAuthor::Email(crate::user::normalize_email(email)),
            (None, None) => FeedbackAuthor::Anonymous,
        }
    }
}

/// A feedback entry ready for insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeedback {
    pub user_id: Option<UserId>,
    pub rating: Rating,
    pub comments: String,
}

/// Feedback row joined with its author, as listed to administrators
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRow {
    pub id: FeedbackId,
    pub user_id: Option<UserId>,
    pub author_name: Option<String>,
    pub rating: Rating,
    pub comments: String,
    pub created_at: DateTime<Utc>,
}
