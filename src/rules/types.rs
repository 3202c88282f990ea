//! Type definitions for the scoring rule tables.
//!
//! Everything here is deserialized from `config/analysis_rules.toml`. Output
//! enums shared with the predictors (`CorrosionLevel`, `MechanicalProperty`)
//! also serialize so they can travel in results.

use std::collections::BTreeMap;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::composition::{Category, Element};

// =============================================================================
// ROOT
// =============================================================================

/// Root configuration loaded from analysis_rules.toml.
#[derive(Debug, Clone, Deserialize)]
pub struct RulesConfig {
    pub engine: EngineSettings,
    pub corrosion: CorrosionRules,
    pub mechanical: MechanicalRules,
    pub requirements: RequirementRules,
    pub cost: CostModel,
    pub recommendation: RecommendationRules,
    pub applications: Vec<ApplicationProfile>,
}

/// Tunables for ranking and caching.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineSettings {
    /// Default minimum similarity for `find_similar_materials`
    pub similarity_threshold: f64,
    /// Cap on similarity and recommendation result lists
    pub max_suggestions: usize,
    /// Lifetime of cached results, in seconds
    pub cache_ttl_secs: i64,
    /// Absolute difference above which an element counts as a significant difference
    pub significant_difference: f64,
    /// Per-element similarity above which an element counts as matching
    pub match_similarity: f64,
    /// Candidates scoring below this are not recommended
    pub min_suitability: f64,
}

impl EngineSettings {
    pub fn cache_ttl(&self) -> Duration {
        Duration::seconds(self.cache_ttl_secs)
    }
}

// =============================================================================
// RULES AND CONDITIONS
// =============================================================================

/// One scoring or advice rule: `{condition, points, explanation}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Rule {
    /// Rules sharing a group form a ladder where only the first match fires
    #[serde(default)]
    pub group: Option<String>,
    /// Points added when the rule fires (advice rules leave this at 0)
    #[serde(default)]
    pub points: f64,
    /// All of these must hold
    #[serde(default)]
    pub when: Vec<Condition>,
    /// At least one of these must hold (ignored when empty)
    #[serde(default)]
    pub when_any: Vec<Condition>,
    /// Human-readable text reported when the rule fires
    #[serde(default)]
    pub explanation: String,
}

/// A single test against the material being scored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Condition {
    Element {
        element: Element,
        op: Comparison,
        value: f64,
    },
    Category {
        category: Category,
    },
    CorrosionScore {
        op: Comparison,
        value: f64,
    },
    Mechanical {
        property: MechanicalProperty,
        op: Comparison,
        value: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Comparison {
    Gt,
    Gte,
    Lt,
    Lte,
}

impl Comparison {
    pub fn compare(self, lhs: f64, rhs: f64) -> bool {
        match self {
            Comparison::Gt => lhs > rhs,
            Comparison::Gte => lhs >= rhs,
            Comparison::Lt => lhs < rhs,
            Comparison::Lte => lhs <= rhs,
        }
    }
}

// =============================================================================
// CORROSION
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CorrosionRules {
    /// Point rules; the clamped sum is the corrosion score
    pub rules: Vec<Rule>,
    /// Level bands, highest `min_score` first
    pub levels: Vec<LevelBand>,
    /// Improvement advice, may test the corrosion score
    #[serde(default)]
    pub advice: Vec<Rule>,
}

/// Discrete corrosion-resistance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrosionLevel {
    Excellent,
    Good,
    Fair,
    Poor,
    Bad,
}

impl std::fmt::Display for CorrosionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CorrosionLevel::Excellent => write!(f, "Excellent"),
            CorrosionLevel::Good => write!(f, "Good"),
            CorrosionLevel::Fair => write!(f, "Fair"),
            CorrosionLevel::Poor => write!(f, "Poor"),
            CorrosionLevel::Bad => write!(f, "Bad"),
        }
    }
}

/// A score band with its display info and the applications it suits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelBand {
    pub level: CorrosionLevel,
    pub min_score: f64,
    pub color: String,
    pub description: String,
    #[serde(default)]
    pub applications: Vec<String>,
}

// =============================================================================
// MECHANICAL
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MechanicalProperty {
    Strength,
    Hardness,
    Ductility,
    Toughness,
}

impl MechanicalProperty {
    pub const ALL: [MechanicalProperty; 4] = [
        MechanicalProperty::Strength,
        MechanicalProperty::Hardness,
        MechanicalProperty::Ductility,
        MechanicalProperty::Toughness,
    ];
}

/// The four mechanical scores.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PropertyScores {
    pub strength: f64,
    pub hardness: f64,
    pub ductility: f64,
    pub toughness: f64,
}

impl PropertyScores {
    pub fn get(&self, property: MechanicalProperty) -> f64 {
        match property {
            MechanicalProperty::Strength => self.strength,
            MechanicalProperty::Hardness => self.hardness,
            MechanicalProperty::Ductility => self.ductility,
            MechanicalProperty::Toughness => self.toughness,
        }
    }

    pub fn add(&mut self, property: MechanicalProperty, delta: f64) {
        let slot = match property {
            MechanicalProperty::Strength => &mut self.strength,
            MechanicalProperty::Hardness => &mut self.hardness,
            MechanicalProperty::Ductility => &mut self.ductility,
            MechanicalProperty::Toughness => &mut self.toughness,
        };
        *slot += delta;
    }

    /// Every score clamped to [0, 100].
    pub fn clamped(&self) -> PropertyScores {
        PropertyScores {
            strength: self.strength.clamp(0.0, 100.0),
            hardness: self.hardness.clamp(0.0, 100.0),
            ductility: self.ductility.clamp(0.0, 100.0),
            toughness: self.toughness.clamp(0.0, 100.0),
        }
    }

    pub fn mean(&self) -> f64 {
        (self.strength + self.hardness + self.ductility + self.toughness) / 4.0
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MechanicalRules {
    /// Starting scores per category; unknown categories start at zero
    pub base: BTreeMap<Category, PropertyScores>,
    /// Points per percent of each element, per property
    pub coefficients: BTreeMap<MechanicalProperty, BTreeMap<Element, f64>>,
    #[serde(default)]
    pub bonuses: Vec<MechanicalBonus>,
    #[serde(default)]
    pub details: Vec<Rule>,
}

/// A conditional shift applied to one or more properties.
#[derive(Debug, Clone, Deserialize)]
pub struct MechanicalBonus {
    #[serde(default)]
    pub when: Vec<Condition>,
    #[serde(default)]
    pub when_any: Vec<Condition>,
    pub effects: BTreeMap<MechanicalProperty, f64>,
}

// =============================================================================
// RECOMMENDATION
// =============================================================================

/// Adjustments driven by caller requirements rather than the application.
#[derive(Debug, Clone, Deserialize)]
pub struct RequirementRules {
    /// Service temperatures above this (°C) count as high-temperature
    pub high_temperature_above: f64,
    /// Chromium needed to earn the high-temperature bonus
    pub high_temperature_chromium: f64,
    pub high_temperature_bonus: f64,
    /// Applied instead of the bonus when chromium falls short
    pub high_temperature_penalty: f64,
    /// Fraction of predicted strength added when high strength is required
    pub high_strength_factor: f64,
}

/// Linear alloy-content cost index with tier cut-offs.
#[derive(Debug, Clone, Deserialize)]
pub struct CostModel {
    pub base: f64,
    pub weights: BTreeMap<Element, f64>,
    pub low_max: f64,
    pub medium_max: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationRules {
    /// Suitability before application bonuses and requirement adjustments
    pub base_suitability: f64,
    /// Reason used when an application has none of its own
    pub default_reason: String,
    #[serde(default)]
    pub advantages: Vec<Rule>,
    #[serde(default)]
    pub disadvantages: Vec<Rule>,
}

/// A supported application and its curated candidate grades.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationProfile {
    /// Stable identifier, also used in cache keys
    pub id: String,
    /// Labels callers may use, in any language
    pub labels: Vec<String>,
    /// Candidate grade identifiers
    pub candidates: Vec<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub bonuses: Vec<Rule>,
}

impl ApplicationProfile {
    /// True if `label` is this application's id or one of its labels,
    /// ignoring case and surrounding whitespace.
    pub fn answers_to(&self, label: &str) -> bool {
        let wanted = label.trim().to_lowercase();
        !wanted.is_empty()
            && (self.id.to_lowercase() == wanted
                || self.labels.iter().any(|l| l.to_lowercase() == wanted))
    }
}
