//! Weighted composition similarity and catalog ranking.
//!
//! Similarity compares two [`CompositionVector`](crate::composition::CompositionVector)s
//! element by element. Chromium, nickel and molybdenum carry the most weight;
//! phosphorus and sulfur the least.

mod engine;
mod types;

pub use engine::{cache_key, compare_elements, find_similar, similarity};
pub use types::{ElementDifference, ElementMatch, SimilarityResult};
