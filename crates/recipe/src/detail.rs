use serde::Serialize;

use crate::{Recipe, fields};

/// Full view of a single recipe, with ingredients and directions split into
/// items.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecipeDetail {
    pub id: usize,
    pub title: String,
    pub description: String,
    pub cook_speed: String,
    pub difficulty: String,
    pub total_time_min: f64,
    pub ingredients_list: Vec<String>,
    pub directions_list: Vec<String>,
}

impl From<&Recipe> for RecipeDetail {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id.index(),
            title: recipe.title.clone(),
            description: recipe.description.clone(),
            cook_speed: recipe.cook_speed.clone(),
            difficulty: recipe.difficulty.clone(),
            total_time_min: recipe.total_time_min(),
            ingredients_list: fields::list_or_lines(&recipe.ingredients),
            directions_list: fields::list_or_lines(&recipe.directions),
        }
    }
}
