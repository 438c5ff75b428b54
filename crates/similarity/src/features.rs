use smartmeal_recipe::{Catalog, Recipe, RecipeId};

use crate::{SimilarityError, SimilarityResult, SparseVector, StandardScaler, TfidfVectorizer};

pub const DEFAULT_NUMERIC_WEIGHT: f64 = 1.5;

/// num_ingredients, total time, healthiness_score.
pub const NUMERIC_FEATURES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureOptions {
    /// Multiplier applied to the standardized numeric columns.
    pub numeric_weight: f64,
    /// Vocabulary cap for the text columns.
    pub max_features: usize,
}

impl Default for FeatureOptions {
    fn default() -> Self {
        Self {
            numeric_weight: DEFAULT_NUMERIC_WEIGHT,
            max_features: crate::tfidf::DEFAULT_MAX_FEATURES,
        }
    }
}

/// One recipe's row in the feature matrix: TF-IDF text columns followed by
/// the weighted numeric columns.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    pub text: SparseVector,
    pub numeric: [f64; NUMERIC_FEATURES],
}

impl FeatureVector {
    pub fn dot(&self, other: &FeatureVector) -> f64 {
        let numeric = self
            .numeric
            .iter()
            .zip(other.numeric.iter())
            .map(|(a, b)| a * b)
            .sum::<f64>();

        self.text.dot(&other.text) + numeric
    }

    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }
}

fn numeric_row(recipe: &Recipe) -> [f64; NUMERIC_FEATURES] {
    [
        recipe.num_ingredients,
        recipe.total_time_min(),
        recipe.healthiness_score,
    ]
}

/// Feature matrix over a whole catalog, fit once.
///
/// Row `i` belongs to the recipe with id `i`.
#[derive(Debug, Clone)]
pub struct FeatureIndex {
    rows: Vec<FeatureVector>,
    norms: Vec<f64>,
    vocabulary_size: usize,
}

impl FeatureIndex {
    pub fn build(catalog: &Catalog, options: FeatureOptions) -> Self {
        let documents = catalog.iter().map(Recipe::content).collect::<Vec<_>>();

        let mut vectorizer = TfidfVectorizer::new().with_max_features(options.max_features);
        let text_rows = vectorizer.fit_transform(&documents);

        let numeric_rows = catalog.iter().map(numeric_row).collect::<Vec<_>>();
        let scaler = StandardScaler::fit(&numeric_rows);

        let rows = text_rows
            .into_iter()
            .zip(numeric_rows.iter())
            .map(|(text, numeric)| {
                let scaled = scaler.transform(numeric).map(|v| v * options.numeric_weight);
                FeatureVector {
                    text,
                    numeric: scaled,
                }
            })
            .collect::<Vec<_>>();

        let norms = rows.iter().map(FeatureVector::norm).collect();

        tracing::debug!(
            rows = rows.len(),
            vocabulary = vectorizer.vocabulary_size(),
            numeric_weight = options.numeric_weight,
            "Feature index built"
        );

        Self {
            rows,
            norms,
            vocabulary_size: vectorizer.vocabulary_size(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary_size
    }

    pub fn row(&self, id: RecipeId) -> SimilarityResult<&FeatureVector> {
        self.rows.get(id.index()).ok_or(SimilarityError::OutOfRange {
            id: id.index(),
            len: self.rows.len(),
        })
    }

    /// Cosine similarity of `anchor` against every row, in row order.
    ///
    /// Rows with a zero norm score 0.
    pub fn cosine_all(&self, anchor: RecipeId) -> SimilarityResult<Vec<f64>> {
        let anchor_row = self.row(anchor)?;
        let anchor_norm = self.norms[anchor.index()];

        Ok(self
            .rows
            .iter()
            .zip(self.norms.iter())
            .map(|(row, &norm)| {
                let denom = anchor_norm * norm;
                if denom > 0.0 {
                    anchor_row.dot(row) / denom
                } else {
                    0.0
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(title: &str, ingredients: &str, n: f64, time: f64, health: f64) -> Recipe {
        Recipe {
            title: title.to_string(),
            ingredients: ingredients.to_string(),
            num_ingredients: n,
            est_cook_time_min: time,
            healthiness_score: health,
            ..Default::default()
        }
    }

    fn catalog() -> Catalog {
        Catalog::from_recipes([
            recipe("Tomato Soup", "tomato basil cream", 3.0, 20.0, 70.0),
            recipe("Tomato Salad", "tomato basil olive", 3.0, 5.0, 90.0),
            recipe("Chocolate Cake", "flour sugar cocoa", 8.0, 60.0, 20.0),
        ])
    }

    #[test]
    fn test_one_row_per_recipe() {
        let index = FeatureIndex::build(&catalog(), FeatureOptions::default());

        assert_eq!(index.len(), 3);
        assert!(index.vocabulary_size() > 0);
        assert!(index.row(RecipeId(2)).is_ok());
        assert_eq!(
            index.row(RecipeId(3)).unwrap_err(),
            SimilarityError::OutOfRange { id: 3, len: 3 }
        );
    }

    #[test]
    fn test_numeric_columns_are_standardized_and_weighted() {
        let options = FeatureOptions {
            numeric_weight: 2.0,
            ..Default::default()
        };
        let index = FeatureIndex::build(&catalog(), options);

        for col in 0..NUMERIC_FEATURES {
            let mean = (0..3)
                .map(|i| index.row(RecipeId(i)).unwrap().numeric[col])
                .sum::<f64>()
                / 3.0;
            assert!(mean.abs() < 1e-9);
        }

        let unweighted = FeatureIndex::build(
            &catalog(),
            FeatureOptions {
                numeric_weight: 1.0,
                ..Default::default()
            },
        );
        let a = index.row(RecipeId(2)).unwrap().numeric[1];
        let b = unweighted.row(RecipeId(2)).unwrap().numeric[1];
        assert!((a - 2.0 * b).abs() < 1e-9);
    }

    #[test]
    fn test_self_similarity_is_maximal() {
        let index = FeatureIndex::build(&catalog(), FeatureOptions::default());

        for anchor in 0..3 {
            let scores = index.cosine_all(RecipeId(anchor)).unwrap();
            let own = scores[anchor];
            assert!((own - 1.0).abs() < 1e-9);
            assert!(scores.iter().all(|&s| s <= own + 1e-9));
        }
    }

    #[test]
    fn test_text_overlap_ranks_higher() {
        let options = FeatureOptions {
            numeric_weight: 0.0,
            ..Default::default()
        };
        let index = FeatureIndex::build(&catalog(), options);

        let scores = index.cosine_all(RecipeId(0)).unwrap();
        assert!(scores[1] > scores[2]);
    }

    #[test]
    fn test_empty_catalog() {
        let index = FeatureIndex::build(&Catalog::default(), FeatureOptions::default());
        assert!(index.is_empty());
        assert!(index.cosine_all(RecipeId(0)).is_err());
    }
}
