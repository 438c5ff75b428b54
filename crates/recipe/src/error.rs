use std::path::PathBuf;

use thiserror::Error;

pub type RecipeResult<T> = Result<T, RecipeError>;

#[derive(Error, Debug)]
pub enum RecipeError {
    #[error("Recipe dataset not found, searched: {searched}")]
    DatasetNotFound { searched: String },

    #[error("Recipe id {id} out of range for a catalog of {len} recipes")]
    OutOfRange { id: usize, len: usize },

    #[error("Failed to read recipe dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed recipe dataset: {0}")]
    Csv(#[from] csv::Error),
}

impl RecipeError {
    pub(crate) fn dataset_not_found(searched: &[PathBuf]) -> Self {
        let searched = searched
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");

        RecipeError::DatasetNotFound { searched }
    }
}
