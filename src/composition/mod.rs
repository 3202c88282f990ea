//! Composition normalization.
//!
//! Catalog records name their elements inconsistently (`Cr`, `cr`, `铬`) and
//! encode contents as numbers, ranges, bounds or placeholders. This module
//! reduces every record to a [`CompositionVector`] over a fixed element set
//! so that records can be compared, scored and validated.
//!
//! Normalization never fails: unreadable data becomes 0.

mod normalize;
mod parse;
mod record;
mod types;

pub use normalize::{normalize, vector_of};
pub use parse::parse_element_value;
pub use record::MaterialRecord;
pub use types::*;
