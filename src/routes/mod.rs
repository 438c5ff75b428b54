use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use smartmeal_recommend::Recommender;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::error::AppError;

mod health;
mod recipe;
mod recommend;

pub use health::{health, ready};
pub use recipe::{RecipeDetailRequest, recipe_details};
pub use recommend::{SubmitRequest, submit};

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub recommender: Arc<Recommender>,
}

impl AppState {
    /// Build the catalog and index off the async runtime if not done yet.
    pub async fn ensure_assets(&self) -> Result<(), AppError> {
        if self.recommender.is_ready() {
            return Ok(());
        }

        let recommender = self.recommender.clone();
        tokio::task::spawn_blocking(move || recommender.warm_up())
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))??;

        Ok(())
    }
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        // Health check endpoints
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/submit", post(submit))
        .route("/recipe_details", post(recipe_details))
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
