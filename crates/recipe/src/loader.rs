use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use once_cell::sync::OnceCell;

use crate::{Catalog, RecipeError, RecipeResult};

pub const DATASET_FILE_NAME: &str = "recipes_extended.csv";

/// Locations searched, in order, when no explicit dataset path is configured.
pub fn default_search_paths() -> Vec<PathBuf> {
    vec![
        Path::new("data").join(DATASET_FILE_NAME),
        Path::new("backend").join("data").join(DATASET_FILE_NAME),
        Path::new("filtering").join(DATASET_FILE_NAME),
        PathBuf::from(DATASET_FILE_NAME),
    ]
}

/// Finds the recipe dataset and loads it at most once.
///
/// Concurrent first callers block on the same load instead of reading the
/// file twice. A failed load is not cached, so a later call retries.
#[derive(Debug)]
pub struct CatalogLoader {
    search_paths: Vec<PathBuf>,
    catalog: OnceCell<Arc<Catalog>>,
}

impl CatalogLoader {
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self {
            search_paths,
            catalog: OnceCell::new(),
        }
    }

    /// Loader whose search path is a single file.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(vec![path.into()])
    }

    /// Loader that serves an already built catalog.
    pub fn preloaded(catalog: Catalog) -> Self {
        Self {
            search_paths: Vec::new(),
            catalog: OnceCell::with_value(Arc::new(catalog)),
        }
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    pub fn locate(&self) -> RecipeResult<&Path> {
        self.search_paths
            .iter()
            .find(|path| path.is_file())
            .map(PathBuf::as_path)
            .ok_or_else(|| RecipeError::dataset_not_found(&self.search_paths))
    }

    pub fn load(&self) -> RecipeResult<Arc<Catalog>> {
        self.catalog
            .get_or_try_init(|| {
                let path = self.locate()?;
                tracing::info!(path = %path.display(), "Loading recipe dataset");

                let catalog = Catalog::from_path(path)?;
                tracing::info!(recipes = catalog.len(), "Recipe dataset loaded");

                Ok(Arc::new(catalog))
            })
            .cloned()
    }

    pub fn is_loaded(&self) -> bool {
        self.catalog.get().is_some()
    }
}

impl Default for CatalogLoader {
    fn default() -> Self {
        Self::new(default_search_paths())
    }
}
