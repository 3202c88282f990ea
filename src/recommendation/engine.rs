use std::collections::HashSet;

use tracing::debug;

use crate::composition::{normalize, CompositionVector, Element, MaterialRecord};
use crate::prediction::{corrosion_score, mechanical_scores};
use crate::rules::{
    explanations, fire, total_points, ApplicationProfile, CostModel, RuleContext, RulesConfig,
};

use super::types::{CostEstimate, CostTier, Recommendation, Requirements, StrengthLevel};

/// Recommend catalog grades for an application.
///
/// Candidates are the application's curated grades that exist in the
/// catalog. Each record is scored at most once, even when it answers to
/// several candidate names. Results below the minimum suitability are
/// dropped, the rest are returned best first, at most `max_suggestions`.
pub fn recommend(
    catalog: &[MaterialRecord],
    application: &ApplicationProfile,
    requirements: &Requirements,
    rules: &RulesConfig,
) -> Vec<Recommendation> {
    let mut seen = HashSet::new();
    let mut recommendations = Vec::new();

    for grade in &application.candidates {
        for (index, record) in catalog.iter().enumerate() {
            if !record.answers_to(grade) || !seen.insert(index) {
                continue;
            }

            let recommendation = assess(record, application, requirements, rules);
            if recommendation.suitability >= rules.engine.min_suitability {
                recommendations.push(recommendation);
            } else {
                debug!(
                    "{} scored {} for {}, below the cut",
                    record.label(),
                    recommendation.suitability,
                    application.id
                );
            }
        }
    }

    recommendations.sort_by(|a, b| b.suitability.total_cmp(&a.suitability));
    recommendations.truncate(rules.engine.max_suggestions);

    debug!(
        "{} recommendations for {} from {} matching records",
        recommendations.len(),
        application.id,
        seen.len()
    );
    recommendations
}

/// Score one record for an application and explain the result.
pub fn assess(
    record: &MaterialRecord,
    application: &ApplicationProfile,
    requirements: &Requirements,
    rules: &RulesConfig,
) -> Recommendation {
    let composition = normalize(record);
    let category = record.category();
    let corrosion = corrosion_score(&composition, category, &rules.corrosion);
    let mechanical = mechanical_scores(&composition, category, &rules.mechanical);
    let ctx = RuleContext::new(&composition, category)
        .with_corrosion_score(corrosion)
        .with_mechanical(&mechanical);

    let mut suitability =
        rules.recommendation.base_suitability + total_points(&fire(&application.bonuses, &ctx));

    let adjust = &rules.requirements;
    if let Some(temperature) = requirements.temperature {
        if temperature > adjust.high_temperature_above {
            suitability += if composition.get(Element::Cr) >= adjust.high_temperature_chromium {
                adjust.high_temperature_bonus
            } else {
                adjust.high_temperature_penalty
            };
        }
    }
    if requirements.strength == Some(StrengthLevel::High) {
        suitability += adjust.high_strength_factor * mechanical.strength;
    }

    Recommendation {
        material: record.clone(),
        reason: application
            .reason
            .clone()
            .unwrap_or_else(|| rules.recommendation.default_reason.clone()),
        suitability: suitability.clamp(0.0, 100.0),
        advantages: explanations(&fire(&rules.recommendation.advantages, &ctx)),
        disadvantages: explanations(&fire(&rules.recommendation.disadvantages, &ctx)),
        cost: estimate_cost(&composition, &rules.cost),
    }
}

/// Cost index from alloy content, with its tier.
pub fn estimate_cost(composition: &CompositionVector, model: &CostModel) -> CostEstimate {
    let index = model.base
        + model
            .weights
            .iter()
            .map(|(&element, &weight)| weight * composition.get(element))
            .sum::<f64>();

    let tier = if index <= model.low_max {
        CostTier::Low
    } else if index <= model.medium_max {
        CostTier::Medium
    } else {
        CostTier::High
    };

    CostEstimate {
        tier,
        index: (index * 100.0).round() / 100.0,
    }
}

/// Cache key for a recommendation query.
pub fn cache_key(application: &ApplicationProfile, requirements: &Requirements) -> String {
    format!("recommendation:{}:{}", application.id, requirements.signature())
}
