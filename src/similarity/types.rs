use serde::{Deserialize, Serialize};

use crate::composition::{Element, MaterialRecord};

/// A catalog record ranked against a target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityResult {
    pub material: MaterialRecord,
    /// Weighted composition similarity in [0, 1], two decimals
    pub similarity: f64,
    /// Elements differing by more than the significance threshold,
    /// largest difference first
    pub differences: Vec<ElementDifference>,
    /// Close elements present in at least one of the two materials,
    /// most similar first
    pub matching_elements: Vec<ElementMatch>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementDifference {
    pub element: Element,
    pub native_name: String,
    pub target_value: f64,
    pub candidate_value: f64,
    /// Absolute difference in percentage points
    pub difference: f64,
    /// Difference relative to the larger value (floor 1), as a whole percent
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementMatch {
    pub element: Element,
    pub native_name: String,
    pub target_value: f64,
    pub candidate_value: f64,
    /// Per-element similarity as a whole percent
    pub similarity: f64,
}
