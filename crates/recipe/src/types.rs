use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

use crate::fields;

/// Position of a recipe in its catalog.
///
/// Ids are assigned in file order when the catalog is loaded and double as row
/// indices into the similarity feature matrix built from the same catalog.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RecipeId(pub usize);

impl RecipeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for RecipeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DietaryFlag {
    Vegan,
    Vegetarian,
    GlutenFree,
    DairyFree,
    NutFree,
    Halal,
    Kosher,
}

impl DietaryFlag {
    pub const ALL: [DietaryFlag; 7] = [
        DietaryFlag::Vegan,
        DietaryFlag::Vegetarian,
        DietaryFlag::GlutenFree,
        DietaryFlag::DairyFree,
        DietaryFlag::NutFree,
        DietaryFlag::Halal,
        DietaryFlag::Kosher,
    ];

    /// Column name in the dataset and key in constraint objects.
    pub fn key(self) -> &'static str {
        match self {
            DietaryFlag::Vegan => "is_vegan",
            DietaryFlag::Vegetarian => "is_vegetarian",
            DietaryFlag::GlutenFree => "is_gluten_free",
            DietaryFlag::DairyFree => "is_dairy_free",
            DietaryFlag::NutFree => "is_nut_free",
            DietaryFlag::Halal => "is_halal",
            DietaryFlag::Kosher => "is_kosher",
        }
    }
}

/// One row of the recipe dataset.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Recipe {
    #[serde(skip)]
    pub id: RecipeId,

    #[serde(rename = "recipe_title")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ingredients: String,
    #[serde(default)]
    pub directions: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
    #[serde(default)]
    pub combined_text: String,
    #[serde(default)]
    pub main_ingredient: String,

    #[serde(default)]
    pub cook_speed: String,
    #[serde(default)]
    pub difficulty: String,

    #[serde(default)]
    pub tastes: String,
    #[serde(default)]
    pub cuisine_list: String,
    #[serde(default)]
    pub dietary_profile: String,
    #[serde(default)]
    pub health_flags: String,

    #[serde(default, deserialize_with = "fields::number")]
    pub num_ingredients: f64,
    #[serde(default, deserialize_with = "fields::number")]
    pub est_prep_time_min: f64,
    #[serde(default, deserialize_with = "fields::number")]
    pub est_cook_time_min: f64,
    #[serde(default, deserialize_with = "fields::number")]
    pub healthiness_score: f64,

    #[serde(rename = "is_vegan", default, deserialize_with = "fields::flag")]
    pub vegan: bool,
    #[serde(rename = "is_vegetarian", default, deserialize_with = "fields::flag")]
    pub vegetarian: bool,
    #[serde(rename = "is_gluten_free", default, deserialize_with = "fields::flag")]
    pub gluten_free: bool,
    #[serde(rename = "is_dairy_free", default, deserialize_with = "fields::flag")]
    pub dairy_free: bool,
    #[serde(rename = "is_nut_free", default, deserialize_with = "fields::flag")]
    pub nut_free: bool,
    #[serde(rename = "is_halal", default, deserialize_with = "fields::flag")]
    pub halal: bool,
    #[serde(rename = "is_kosher", default, deserialize_with = "fields::flag")]
    pub kosher: bool,
}

impl Recipe {
    pub fn total_time_min(&self) -> f64 {
        self.est_prep_time_min + self.est_cook_time_min
    }

    /// `None` when the dataset value is not one of easy/medium/hard.
    pub fn difficulty_level(&self) -> Option<Difficulty> {
        self.difficulty.trim().parse().ok()
    }

    pub fn has_flag(&self, flag: DietaryFlag) -> bool {
        match flag {
            DietaryFlag::Vegan => self.vegan,
            DietaryFlag::Vegetarian => self.vegetarian,
            DietaryFlag::GlutenFree => self.gluten_free,
            DietaryFlag::DairyFree => self.dairy_free,
            DietaryFlag::NutFree => self.nut_free,
            DietaryFlag::Halal => self.halal,
            DietaryFlag::Kosher => self.kosher,
        }
    }

    /// Free text used for content similarity.
    pub fn content(&self) -> String {
        let tastes = fields::flatten_list(&self.tastes);
        let cuisines = fields::flatten_list(&self.cuisine_list);
        let dietary_profile = fields::flatten_list(&self.dietary_profile);
        let health_flags = fields::flatten_list(&self.health_flags);

        [
            self.title.as_str(),
            self.category.as_str(),
            self.subcategory.as_str(),
            self.description.as_str(),
            self.ingredients.as_str(),
            self.combined_text.as_str(),
            tastes.as_str(),
            cuisines.as_str(),
            dietary_profile.as_str(),
            health_flags.as_str(),
            self.cook_speed.as_str(),
            self.difficulty.as_str(),
        ]
        .join(" ")
    }
}
