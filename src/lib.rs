pub mod config;
pub mod error;
pub mod observability;
pub mod routes;

use std::sync::Arc;

use anyhow::Context;
use smartmeal_llm::create_provider;
use smartmeal_recommend::Recommender;

pub use routes::{AppState, router};

/// Wire the catalog loader, text generator and tuning knobs from config.
///
/// Nothing is loaded here; the catalog and index are built on first use or
/// by [`Recommender::warm_up`].
pub fn build_recommender(config: &config::Config) -> anyhow::Result<Arc<Recommender>> {
    let settings = config
        .llm
        .provider_settings()
        .map_err(|e| anyhow::anyhow!(e))?;
    let generator = create_provider(&settings).context("Failed to create LLM provider")?;

    Ok(Arc::new(Recommender::new(
        config.catalog.loader(),
        generator,
        config.recommender_options(),
    )))
}

/// Create app router for testing
///
/// Builds the state from config and returns the router with all routes,
/// useful for integration testing without starting the full server.
pub fn create_app(config: config::Config) -> anyhow::Result<axum::Router> {
    let recommender = build_recommender(&config)?;
    Ok(router(AppState {
        config,
        recommender,
    }))
}
