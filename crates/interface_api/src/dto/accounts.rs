//! Account and feedback DTOs
//!
//! Signup bodies deserialize straight into [`domain_accounts::SignupForm`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{FeedbackId, RawId, UserId};
use domain_accounts::{FeedbackAuthor, ReviewRow, UserSummary};

use crate::error::ApiError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub success: bool,
    pub message: String,
    pub user_id: UserId,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub user_id: UserId,
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default, rename = "adminkey", alias = "adminKey")]
    pub admin_key: String,
}

#[derive(Debug, Serialize)]
pub struct AdminLoginResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
}

/// Body of `POST /api/submit-feedback`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    pub user_id: Option<RawId>,
    pub email: Option<String>,
    pub rating: Option<RawId>,
    #[serde(default)]
    pub comments: String,
}

impl FeedbackRequest {
    /// Resolves who wrote the feedback; a user ID wins over an email
    pub fn author(&self) -> Result<FeedbackAuthor, ApiError> {
        let user_id = self.user_id.as_ref().map(UserId::parse_raw).transpose()?;
        Ok(FeedbackAuthor::from_parts(user_id, self.email.as_deref()))
    }

    pub fn rating(&self) -> Result<i64, ApiError> {
        let raw = self
            .rating
            .as_ref()
            .ok_or_else(|| ApiError::BadRequest("rating is required".to_string()))?;
        Ok(raw.to_i64("rating")?)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResponse {
    pub success: bool,
    pub message: String,
    pub feedback_id: FeedbackId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummaryResponse {
    pub id: UserId,
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserSummary> for UserSummaryResponse {
    fn from(user: UserSummary) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            phone_number: user.phone_number,
            email: user.email,
            status: user.status.to_string(),
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub id: FeedbackId,
    pub user_id: Option<UserId>,
    pub author_name: Option<String>,
    pub rating: i16,
    pub comments: String,
    pub created_at: DateTime<Utc>,
}

impl From<ReviewRow> for ReviewResponse {
    fn from(row: ReviewRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            author_name: row.author_name,
            rating: row.rating.get(),
            comments: row.comments,
            created_at: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn feedback(body: serde_json::Value) -> FeedbackRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_feedback_author_prefers_user_id() {
        let request = feedback(json!({ "userId": "3", "email": "a@b.c", "rating": 4, "comments": "ok" }));
        assert!(matches!(request.author().unwrap(), FeedbackAuthor::User(id) if id.get() == 3));
    }

    #[test]
    fn test_feedback_without_author_is_anonymous() {
        let request = feedback(json!({ "rating": 5, "comments": "great" }));
        assert!(matches!(request.author().unwrap(), FeedbackAuthor::Anonymous));
    }

    #[test]
    fn test_feedback_rating_accepts_numeric_strings() {
        assert_eq!(feedback(json!({ "rating": "4" })).rating().unwrap(), 4);
        assert!(feedback(json!({})).rating().is_err());
        assert!(feedback(json!({ "userId": 0 })).author().is_err());
    }

    #[test]
    fn test_admin_login_reads_lowercase_key_field() {
        let request: AdminLoginRequest =
            serde_json::from_value(json!({ "email": "a@b.c", "adminkey": "k" })).unwrap();
        assert_eq!(request.admin_key, "k");
    }
}
