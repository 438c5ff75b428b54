//! Constraint filtering and similarity-based recommendation.
//!
//! A request flows through [`normalize`], [`find_candidates`] (with its
//! single relaxation), [`select_anchor`] and [`similar_candidates`];
//! [`Recommender`] wires these to the catalog and the text generator.

mod constraints;
mod error;
mod filter;
mod normalize;
mod pipeline;
pub mod prompts;
mod response;
mod select;

pub use constraints::{Constraints, CookSpeed};
pub use error::{RecommendError, RecommendResult};
pub use filter::{CandidateSearch, CandidateSet, filter, find_candidates, matches};
pub use normalize::{TASTE_VOCAB, is_taste, normalize};
pub use pipeline::{Recommender, RecommenderOptions};
pub use response::{RecipeCard, RecommendationResponse};
pub use select::{DEFAULT_SIMILAR_POOL, select_anchor, similar_candidates};
