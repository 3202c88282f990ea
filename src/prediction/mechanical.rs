use crate::composition::{Category, CompositionVector};
use crate::rules::{explanations, fire, triggered, MechanicalRules, PropertyScores, RuleContext};

use super::types::MechanicalPrediction;

/// Mechanical scores, each clamped to [0, 100].
///
/// Starts from the category base (zero when the category is unknown), adds
/// the per-element linear terms, then any triggered bonuses.
pub fn mechanical_scores(
    composition: &CompositionVector,
    category: Option<Category>,
    rules: &MechanicalRules,
) -> PropertyScores {
    let mut scores = category
        .and_then(|c| rules.base.get(&c))
        .copied()
        .unwrap_or_default();

    for (&property, coefficients) in &rules.coefficients {
        for (&element, &per_percent) in coefficients {
            scores.add(property, per_percent * composition.get(element));
        }
    }

    let ctx = RuleContext::new(composition, category);
    for bonus in &rules.bonuses {
        if triggered(&bonus.when, &bonus.when_any, &ctx) {
            for (&property, &delta) in &bonus.effects {
                scores.add(property, delta);
            }
        }
    }

    scores.clamped()
}

pub fn predict_mechanical(
    composition: &CompositionVector,
    category: Option<Category>,
    rules: &MechanicalRules,
) -> MechanicalPrediction {
    let scores = mechanical_scores(composition, category, rules);
    let ctx = RuleContext::new(composition, category);

    MechanicalPrediction {
        strength: scores.strength,
        hardness: scores.hardness,
        ductility: scores.ductility,
        toughness: scores.toughness,
        overall: scores.mean(),
        details: explanations(&fire(&rules.details, &ctx)),
    }
}
