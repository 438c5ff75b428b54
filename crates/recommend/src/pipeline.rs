use std::sync::Arc;

use once_cell::sync::OnceCell;
use serde_json::Value;
use smartmeal_llm::{GenerationOptions, TextGenerator};
use smartmeal_recipe::{Catalog, CatalogLoader, Recipe, RecipeDetail};
use smartmeal_similarity::{FeatureOptions, SimilarityIndex};

use crate::{
    Constraints, RecipeCard, RecommendResult, RecommendationResponse, find_candidates, normalize,
    prompts, select_anchor, similar_candidates,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommenderOptions {
    pub features: FeatureOptions,
    /// Neighbours fetched per anchor before intersecting with candidates.
    pub similar_pool: usize,
    pub extraction: GenerationOptions,
    pub explanation: GenerationOptions,
}

impl Default for RecommenderOptions {
    fn default() -> Self {
        Self {
            features: FeatureOptions::default(),
            similar_pool: crate::DEFAULT_SIMILAR_POOL,
            extraction: GenerationOptions {
                max_tokens: 400,
                temperature: 0.2,
            },
            explanation: GenerationOptions {
                max_tokens: 600,
                temperature: 0.3,
            },
        }
    }
}

/// Turns free-text goals into recipe recommendations.
///
/// The catalog and its similarity index are built on first use (or by
/// [`Recommender::warm_up`]) and shared by every request afterwards.
#[derive(Debug)]
pub struct Recommender {
    loader: CatalogLoader,
    index: OnceCell<Arc<SimilarityIndex>>,
    generator: Arc<dyn TextGenerator>,
    options: RecommenderOptions,
}

impl Recommender {
    pub fn new(
        loader: CatalogLoader,
        generator: Arc<dyn TextGenerator>,
        options: RecommenderOptions,
    ) -> Self {
        Self {
            loader,
            index: OnceCell::new(),
            generator,
            options,
        }
    }

    pub fn options(&self) -> &RecommenderOptions {
        &self.options
    }

    /// Catalog plus feature index, built once.
    pub fn assets(&self) -> RecommendResult<Arc<SimilarityIndex>> {
        self.index
            .get_or_try_init(|| {
                let catalog = self.loader.load()?;
                let index = SimilarityIndex::build(catalog, self.options.features);
                tracing::info!(
                    recipes = index.catalog().len(),
                    vocabulary = index.features().vocabulary_size(),
                    "Similarity index ready"
                );
                Ok(Arc::new(index))
            })
            .cloned()
    }

    pub fn warm_up(&self) -> RecommendResult<Arc<SimilarityIndex>> {
        self.assets()
    }

    pub fn is_ready(&self) -> bool {
        self.index.get().is_some()
    }

    /// Ask the generator for constraints. Failures give empty constraints.
    pub async fn extract_constraints(&self, user_text: &str) -> Value {
        let prompt = prompts::extraction_prompt(user_text);

        match self.generator.generate(&prompt, self.options.extraction).await {
            Ok(reply) => prompts::parse_extraction(&reply),
            Err(e) => {
                tracing::warn!(error = %e, "Constraint extraction failed, using no constraints");
                Value::Object(Default::default())
            }
        }
    }

    #[tracing::instrument(skip(self, user_text, baseline), fields(user_text_len = user_text.len()))]
    pub async fn recommend(
        &self,
        user_text: &str,
        top_n: usize,
        baseline: Option<&Value>,
    ) -> RecommendResult<RecommendationResponse> {
        let index = self.assets()?;

        let raw = self.extract_constraints(user_text).await;
        let mut constraints = Constraints::from_raw(&raw);
        if let Some(baseline) = baseline {
            constraints = constraints.merge_baseline(&Constraints::from_raw(baseline));
        }

        self.recommend_with(&index, user_text, normalize(&constraints), top_n)
            .await
    }

    /// Everything after extraction: filter, relax, anchor, rank, explain.
    pub async fn recommend_with(
        &self,
        index: &SimilarityIndex,
        user_text: &str,
        constraints: Constraints,
        top_n: usize,
    ) -> RecommendResult<RecommendationResponse> {
        let catalog = index.catalog();

        let search = find_candidates(catalog, constraints);
        let candidate_count = search.candidates.len();
        tracing::info!(
            candidates = candidate_count,
            used_relaxation = search.used_relaxation,
            "Candidates filtered"
        );

        if search.candidates.is_empty() {
            return Ok(RecommendationResponse::empty(
                search.constraints,
                0,
                false,
                prompts::NO_RESULTS_MESSAGE,
            ));
        }

        let Some(anchor_id) = select_anchor(catalog, &search.candidates) else {
            return Ok(RecommendationResponse::empty(
                search.constraints,
                candidate_count,
                search.used_relaxation,
                prompts::NO_ANCHOR_MESSAGE,
            ));
        };

        let count = search.constraints.result_count().unwrap_or(top_n);
        let similar = similar_candidates(
            index,
            anchor_id,
            &search.candidates,
            self.options.similar_pool,
            count,
        )?;

        let anchor = catalog.get(anchor_id)?;
        let mut similar_recipes = Vec::with_capacity(similar.len());
        for scored in &similar {
            similar_recipes.push((catalog.get(scored.id)?, scored.score));
        }

        let explanation = self
            .explain(user_text, &search.constraints, anchor, &similar_recipes)
            .await;

        Ok(RecommendationResponse {
            constraints: search.constraints,
            candidate_count,
            used_relaxation: search.used_relaxation,
            anchor_recipe: Some(RecipeCard::new(anchor, Some(1.0))),
            similar_recipes: similar_recipes
                .iter()
                .map(|(recipe, score)| RecipeCard::new(recipe, Some(*score)))
                .collect(),
            explanation,
        })
    }

    async fn explain(
        &self,
        user_text: &str,
        constraints: &Constraints,
        anchor: &Recipe,
        similar: &[(&Recipe, f64)],
    ) -> String {
        if similar.is_empty() {
            return prompts::NO_SIMILAR_MESSAGE.to_string();
        }

        let similar = similar.iter().map(|(recipe, _)| *recipe).collect::<Vec<_>>();
        let summaries = similar
            .iter()
            .map(|recipe| prompts::summarize(recipe))
            .collect::<Vec<_>>();
        let prompt = prompts::explanation_prompt(
            user_text,
            constraints,
            &prompts::summarize(anchor),
            &summaries,
        );

        match self.generator.generate(&prompt, self.options.explanation).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                tracing::warn!("Explanation was empty, using fallback");
                prompts::fallback_explanation(anchor, &similar)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Explanation failed, using fallback");
                prompts::fallback_explanation(anchor, &similar)
            }
        }
    }

    /// Look a recipe up by (partial) title.
    pub fn recipe_detail(&self, query: &str) -> RecommendResult<Option<RecipeDetail>> {
        let index = self.assets()?;
        let catalog: &Catalog = index.catalog();

        Ok(catalog
            .find_by_title(query)
            .map(|id| catalog.get(id).map(RecipeDetail::from))
            .transpose()?)
    }
}
