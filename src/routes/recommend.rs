use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Deserialize;
use serde_json::Value;
use smartmeal_recommend::RecommendationResponse;
use validator::Validate;

use crate::{error::AppError, routes::AppState};

fn default_top_n() -> usize {
    5
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitRequest {
    #[validate(length(min = 1, message = "Must not be empty"))]
    pub user_message: String,

    /// How many similar recipes to return
    #[serde(default = "default_top_n")]
    #[validate(range(min = 1, max = 20, message = "Must be between 1 and 20"))]
    pub top_n: usize,

    /// Constraints gathered up front (dietary flags, cuisines, ...)
    #[serde(default)]
    pub baseline_constraints: Option<Value>,
}

/// POST /submit
///
/// Free-text goals in, anchor recipe plus similar recipes and an explanation
/// out.
#[tracing::instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    payload: Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<Json<RecommendationResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;
    state.ensure_assets().await?;

    let response = state
        .recommender
        .recommend(
            &payload.user_message,
            payload.top_n,
            payload.baseline_constraints.as_ref(),
        )
        .await?;

    tracing::info!(
        candidates = response.candidate_count,
        similar = response.similar_recipes.len(),
        used_relaxation = response.used_relaxation,
        "Recommendation generated"
    );

    Ok(Json(response))
}
