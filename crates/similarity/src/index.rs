use std::{collections::HashSet, sync::Arc};

use smartmeal_recipe::{Catalog, RecipeId};

use crate::{FeatureIndex, FeatureOptions, SimilarityError, SimilarityResult};

/// A recipe with its cosine similarity to an anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredRecipe {
    pub id: RecipeId,
    pub score: f64,
}

/// A catalog together with the feature matrix fit on it.
///
/// Both come from the same ordered pass over the catalog, so a [`RecipeId`]
/// from the catalog is always a valid row of the matrix.
#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    catalog: Arc<Catalog>,
    features: FeatureIndex,
}

impl SimilarityIndex {
    pub fn build(catalog: Arc<Catalog>, options: FeatureOptions) -> Self {
        let features = FeatureIndex::build(&catalog, options);
        Self { catalog, features }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn features(&self) -> &FeatureIndex {
        &self.features
    }

    /// Most similar recipes to `anchor`, best first.
    ///
    /// Scores are sorted descending with ties kept in catalog order. Recipes
    /// whose title repeats a better ranked one are dropped, then the anchor
    /// itself is dropped, then the list is cut to `limit`. An empty catalog
    /// yields an empty list for any anchor.
    pub fn top_similar(
        &self,
        anchor: RecipeId,
        limit: usize,
    ) -> SimilarityResult<Vec<ScoredRecipe>> {
        if self.features.is_empty() {
            return Ok(Vec::new());
        }

        if anchor.index() >= self.features.len() {
            return Err(SimilarityError::OutOfRange {
                id: anchor.index(),
                len: self.features.len(),
            });
        }

        if limit == 0 {
            return Ok(Vec::new());
        }

        let mut ranked = self
            .features
            .cosine_all(anchor)?
            .into_iter()
            .enumerate()
            .map(|(idx, score)| ScoredRecipe {
                id: RecipeId(idx),
                score,
            })
            .collect::<Vec<_>>();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));

        let recipes = self.catalog.recipes();
        let mut seen_titles = HashSet::new();

        Ok(ranked
            .into_iter()
            .filter(|scored| seen_titles.insert(recipes[scored.id.index()].title.as_str()))
            .filter(|scored| scored.id != anchor)
            .take(limit)
            .collect())
    }
}
