use thiserror::Error;

pub type SimilarityResult<T> = Result<T, SimilarityError>;

#[derive(Error, Debug, PartialEq)]
pub enum SimilarityError {
    #[error("Recipe id {id} out of range for a feature index of {len} rows")]
    OutOfRange { id: usize, len: usize },
}
