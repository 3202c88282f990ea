//! Similarity, performance prediction, validation and recommendation for
//! stainless-steel grades.
//!
//! Start from [`Analyzer`]: load a [`Catalog`], optionally a rule table, and
//! ask it questions about individual records.

pub mod analyzer;
pub mod cache;
pub mod catalog;
pub mod composition;
mod error;
pub mod prediction;
pub mod recommendation;
pub mod rules;
pub mod similarity;
pub mod validation;

pub use analyzer::{Analyzer, CachedResult};
pub use catalog::Catalog;
pub use composition::{normalize, parse_element_value, CompositionVector, Element, MaterialRecord};
pub use error::AnalysisError;
pub use recommendation::{Requirements, StrengthLevel};
