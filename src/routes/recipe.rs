use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Deserialize;
use smartmeal_recipe::RecipeDetail;
use validator::Validate;

use crate::{error::AppError, routes::AppState};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecipeDetailRequest {
    /// Title or partial title to look up
    #[validate(length(min = 1, message = "Must not be empty"))]
    pub recipe_query: String,
}

/// POST /recipe_details
#[tracing::instrument(skip_all)]
pub async fn recipe_details(
    State(state): State<AppState>,
    payload: Result<Json<RecipeDetailRequest>, JsonRejection>,
) -> Result<Json<RecipeDetail>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;
    state.ensure_assets().await?;
    tracing::debug!(query = %payload.recipe_query, "Recipe detail lookup");

    state
        .recommender
        .recipe_detail(&payload.recipe_query)?
        .map(Json)
        .ok_or(AppError::RecipeNotFound)
}
