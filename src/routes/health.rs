use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::routes::AppState;

/// GET /health - Liveness probe
/// Returns 200 OK if the process is alive
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

/// GET /ready - Readiness probe
/// Returns 200 OK once the recipe catalog and similarity index are built
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    if state.recommender.is_ready() {
        return (StatusCode::OK, Json(json!({"status": "ready"})));
    }

    // with warm-up off the assets are only built by the first request
    let reason = if state.config.server.warm_up {
        "assets_not_loaded"
    } else {
        "awaiting_first_request"
    };

    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({
            "status": "not_ready",
            "reason": reason
        })),
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use http_body_util::BodyExt;
    use smartmeal_llm::FakeProvider;
    use smartmeal_recipe::{Catalog, CatalogLoader, Recipe};
    use smartmeal_recommend::{Recommender, RecommenderOptions};

    use super::*;
    use crate::config::Config;

    fn state() -> AppState {
        state_with(Config::default())
    }

    fn state_with(config: Config) -> AppState {
        let catalog = Catalog::from_recipes([Recipe {
            title: "Toast".to_string(),
            ..Default::default()
        }]);

        AppState {
            config,
            recommender: Arc::new(Recommender::new(
                CatalogLoader::preloaded(catalog),
                Arc::new(FakeProvider::default()),
                RecommenderOptions::default(),
            )),
        }
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = health().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_ready_endpoint_before_and_after_warm_up() {
        let state = state();

        let response = ready(State(state.clone())).await.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        state.ensure_assets().await.unwrap();

        let response = ready(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_ready_reason_follows_warm_up_setting() {
        let response = ready(State(state())).await.into_response();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["reason"], "assets_not_loaded");

        let mut config = Config::default();
        config.server.warm_up = false;
        let response = ready(State(state_with(config))).await.into_response();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["reason"], "awaiting_first_request");
    }
}
