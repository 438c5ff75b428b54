use smartmeal_recipe::{Catalog, RecipeId};
use smartmeal_similarity::{ScoredRecipe, SimilarityIndex, SimilarityResult};

use crate::CandidateSet;

/// How many neighbours are fetched before intersecting with the candidates.
pub const DEFAULT_SIMILAR_POOL: usize = 50;

/// Healthiest candidate; ties go to the first one in catalog order.
pub fn select_anchor(catalog: &Catalog, candidates: &CandidateSet) -> Option<RecipeId> {
    let mut best: Option<(RecipeId, f64)> = None;

    for id in candidates.iter() {
        let Ok(recipe) = catalog.get(id) else {
            tracing::warn!(%id, "Candidate missing from catalog");
            continue;
        };

        match best {
            Some((_, score)) if recipe.healthiness_score <= score => {}
            _ => best = Some((id, recipe.healthiness_score)),
        }
    }

    best.map(|(id, _)| id)
}

/// Neighbours of `anchor` that are also candidates, best first.
///
/// The top `pool` neighbours are fetched and then narrowed to the candidate
/// set, so fewer than `count` may come back even when more candidates exist.
pub fn similar_candidates(
    index: &SimilarityIndex,
    anchor: RecipeId,
    candidates: &CandidateSet,
    pool: usize,
    count: usize,
) -> SimilarityResult<Vec<ScoredRecipe>> {
    Ok(index
        .top_similar(anchor, pool)?
        .into_iter()
        .filter(|scored| candidates.contains(scored.id))
        .take(count)
        .collect())
}
