use serde::Serialize;
use smartmeal_recipe::Recipe;

use crate::Constraints;

/// Compact recipe view returned with a recommendation.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecipeCard {
    pub id: usize,
    pub title: String,
    pub cook_speed: String,
    pub difficulty: String,
    pub healthiness_score: f64,
    pub tastes: String,
    pub cuisine_list: String,
    pub main_ingredient: String,
    pub est_prep_time_min: f64,
    pub est_cook_time_min: f64,
    pub total_time_min: f64,
    /// 1.0 for the anchor, cosine similarity to the anchor otherwise.
    pub similarity_score: Option<f64>,
    pub description: String,
    pub ingredients: String,
}

impl RecipeCard {
    pub fn new(recipe: &Recipe, similarity_score: Option<f64>) -> Self {
        Self {
            id: recipe.id.index(),
            title: recipe.title.clone(),
            cook_speed: recipe.cook_speed.clone(),
            difficulty: recipe.difficulty.clone(),
            healthiness_score: recipe.healthiness_score,
            tastes: recipe.tastes.clone(),
            cuisine_list: recipe.cuisine_list.clone(),
            main_ingredient: recipe.main_ingredient.clone(),
            est_prep_time_min: recipe.est_prep_time_min,
            est_cook_time_min: recipe.est_cook_time_min,
            total_time_min: recipe.total_time_min(),
            similarity_score,
            description: recipe.description.clone(),
            ingredients: recipe.ingredients.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecommendationResponse {
    /// The constraints that produced the candidates (relaxed when relaxation
    /// was used).
    pub constraints: Constraints,
    pub candidate_count: usize,
    pub used_relaxation: bool,
    pub anchor_recipe: Option<RecipeCard>,
    pub similar_recipes: Vec<RecipeCard>,
    pub explanation: String,
}

impl RecommendationResponse {
    /// Response with no recipes, only a message.
    pub fn empty(
        constraints: Constraints,
        candidate_count: usize,
        used_relaxation: bool,
        explanation: &str,
    ) -> Self {
        Self {
            constraints,
            candidate_count,
            used_relaxation,
            anchor_recipe: None,
            similar_recipes: Vec::new(),
            explanation: explanation.to_string(),
        }
    }
}
