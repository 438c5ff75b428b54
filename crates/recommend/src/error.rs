use smartmeal_recipe::RecipeError;
use smartmeal_similarity::SimilarityError;
use thiserror::Error;

pub type RecommendResult<T> = Result<T, RecommendError>;

#[derive(Error, Debug)]
pub enum RecommendError {
    #[error(transparent)]
    Catalog(#[from] RecipeError),

    #[error(transparent)]
    Similarity(#[from] SimilarityError),
}
