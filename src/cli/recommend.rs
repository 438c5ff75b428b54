use anyhow::{Context, Result};
use serde_json::Value;
use smartmeal::config::Config;

pub async fn recommend(
    config: Config,
    text: String,
    top_n: usize,
    baseline: Option<String>,
) -> Result<()> {
    let baseline = baseline
        .map(|raw| serde_json::from_str::<Value>(&raw))
        .transpose()
        .context("--baseline must be a JSON object")?;

    let recommender = smartmeal::build_recommender(&config)?;
    let response = recommender
        .recommend(&text, top_n, baseline.as_ref())
        .await?;

    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}

pub async fn detail(config: Config, query: String) -> Result<()> {
    let recommender = smartmeal::build_recommender(&config)?;

    match recommender.recipe_detail(&query)? {
        Some(detail) => println!("{}", serde_json::to_string_pretty(&detail)?),
        None => anyhow::bail!("No recipe matches '{query}'"),
    }

    Ok(())
}

pub async fn warm_up(config: Config) -> Result<()> {
    let recommender = smartmeal::build_recommender(&config)?;

    let index = tokio::task::spawn_blocking(move || recommender.warm_up())
        .await
        .context("Warm-up task panicked")??;

    println!(
        "Loaded {} recipes, vocabulary of {} terms",
        index.catalog().len(),
        index.features().vocabulary_size()
    );

    Ok(())
}
