//! Application-driven grade recommendation.
//!
//! Every application in the rule table carries a curated list of candidate
//! grades and a set of suitability bonuses. A candidate is only recommended
//! if the catalog actually holds it; its suitability is the base score plus
//! the bonuses that fire, adjusted for the caller's requirements.

mod engine;
mod types;

pub use engine::{assess, cache_key, estimate_cost, recommend};
pub use types::{CostEstimate, CostTier, Recommendation, Requirements, StrengthLevel};
