use serde::{Deserialize, Serialize};

use crate::composition::MaterialRecord;

/// Caller requirements that shift suitability regardless of application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Requirements {
    /// Service temperature in °C
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength: Option<StrengthLevel>,
}

impl Requirements {
    /// Stable text form, used to key cached recommendations.
    pub fn signature(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthLevel {
    Standard,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostTier {
    Low,
    Medium,
    High,
}

/// Relative material cost from alloy content.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub tier: CostTier,
    /// 1.0 for an unalloyed grade, rising with nickel, molybdenum and friends
    pub index: f64,
}

/// A catalog grade recommended for an application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub material: MaterialRecord,
    pub reason: String,
    /// Fit for the application in [0, 100]
    pub suitability: f64,
    pub advantages: Vec<String>,
    pub disadvantages: Vec<String>,
    pub cost: CostEstimate,
}
