//! Feedback handlers

use axum::extract::State;

use crate::dto::accounts::{FeedbackRequest, FeedbackResponse, ReviewResponse};
use crate::error::{ApiError, Json};
use crate::AppState;

/// Records a rating and comment, optionally tied to a user
pub async fn submit_feedback(
    State(state): State<AppState>,
    Json(request): Json<FeedbackRequest>,
) -> Result<Json<FeedbackResponse>, ApiError> {
    let author = request.author()?;
    let rating = request.rating()?;
    let feedback_id = state
        .accounts
        .submit_feedback(author, rating, &request.comments)
        .await?;

    Ok(Json(FeedbackResponse {
        success: true,
        message: "Feedback submitted successfully".to_string(),
        feedback_id,
    }))
}

/// Lists feedback newest first
pub async fn reviews(
    State(state): State<AppState>,
) -> Result<Json<Vec<ReviewResponse>>, ApiError> {
    let reviews = state.accounts.reviews().await?;
    Ok(Json(reviews.into_iter().map(ReviewResponse::from).collect()))
}
