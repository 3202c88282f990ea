use serde::{Deserialize, Serialize};

use crate::rules::CorrosionLevel;

/// Predicted corrosion resistance of one material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrosionPrediction {
    /// Clamped point total in [0, 100]
    pub score: f64,
    pub level: CorrosionLevel,
    /// Display color of the level (hex)
    pub color: String,
    pub description: String,
    /// Why the score came out as it did, one line per fired rule
    pub factors: Vec<String>,
    /// Typical applications for this level
    pub applications: Vec<String>,
    /// How the composition could be improved
    pub recommendations: Vec<String>,
}

/// Predicted mechanical profile, each score in [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MechanicalPrediction {
    pub strength: f64,
    pub hardness: f64,
    pub ductility: f64,
    pub toughness: f64,
    /// Mean of the four scores
    pub overall: f64,
    pub details: Vec<String>,
}
