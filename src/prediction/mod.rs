//! Qualitative performance prediction from composition and category.
//!
//! Both predictors are driven by the rule tables in [`crate::rules`]:
//! corrosion resistance is a clamped point total mapped onto level bands,
//! the mechanical profile is a category base plus linear element terms.

mod corrosion;
mod mechanical;
mod types;

pub use corrosion::{corrosion_score, predict_corrosion};
pub use mechanical::{mechanical_scores, predict_mechanical};
pub use types::{CorrosionPrediction, MechanicalPrediction};
