mod catalog;
mod detail;
mod error;
pub mod fields;
mod loader;
mod types;

pub use catalog::*;
pub use detail::*;
pub use error::{RecipeError, RecipeResult};
pub use loader::*;
pub use types::*;
