use std::{io, path::Path};

use crate::{Recipe, RecipeError, RecipeId, RecipeResult};

/// Immutable, id-indexed recipe table.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    recipes: Vec<Recipe>,
}

impl Catalog {
    /// Build a catalog from recipes in order; ids are reassigned to positions.
    pub fn from_recipes(recipes: impl IntoIterator<Item = Recipe>) -> Self {
        let recipes = recipes
            .into_iter()
            .enumerate()
            .map(|(idx, mut recipe)| {
                recipe.id = RecipeId(idx);
                recipe
            })
            .collect();

        Self { recipes }
    }

    pub fn from_reader<R: io::Read>(reader: R) -> RecipeResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let recipes = reader
            .deserialize::<Recipe>()
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::from_recipes(recipes))
    }

    pub fn from_path(path: &Path) -> RecipeResult<Self> {
        let file = std::fs::File::open(path).map_err(|source| RecipeError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_reader(io::BufReader::new(file))
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn get(&self, id: RecipeId) -> RecipeResult<&Recipe> {
        self.recipes.get(id.index()).ok_or(RecipeError::OutOfRange {
            id: id.index(),
            len: self.recipes.len(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Case-insensitive title lookup: an exact match wins, otherwise the first
    /// recipe in catalog order whose title contains the query.
    pub fn find_by_title(&self, query: &str) -> Option<RecipeId> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return None;
        }

        let titles = self
            .recipes
            .iter()
            .map(|r| (r.id, r.title.trim().to_lowercase()))
            .collect::<Vec<_>>();

        titles
            .iter()
            .find(|(_, title)| *title == query)
            .or_else(|| titles.iter().find(|(_, title)| title.contains(&query)))
            .map(|(id, _)| *id)
    }
}
