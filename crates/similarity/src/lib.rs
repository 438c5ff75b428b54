//! Content similarity over the recipe catalog.
//!
//! Every recipe is turned into a TF-IDF vector of its text fields joined with
//! a few standardized numeric metrics, and recipes are compared by cosine
//! similarity.

mod error;
mod features;
mod index;
mod scaler;
mod sparse;
pub mod stopwords;
mod tfidf;

pub use error::{SimilarityError, SimilarityResult};
pub use features::*;
pub use index::*;
pub use scaler::StandardScaler;
pub use sparse::SparseVector;
pub use tfidf::TfidfVectorizer;
