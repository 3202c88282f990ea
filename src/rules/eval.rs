//! Rule evaluation against a single material.

use std::collections::HashSet;

use crate::composition::{Category, CompositionVector};

use super::types::{Condition, PropertyScores, Rule};

/// What a rule can look at. Scores that have not been computed yet are
/// `None`, and conditions on them simply do not hold.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub composition: &'a CompositionVector,
    pub category: Option<Category>,
    pub corrosion_score: Option<f64>,
    pub mechanical: Option<&'a PropertyScores>,
}

impl<'a> RuleContext<'a> {
    pub fn new(composition: &'a CompositionVector, category: Option<Category>) -> Self {
        Self {
            composition,
            category,
            corrosion_score: None,
            mechanical: None,
        }
    }

    pub fn with_corrosion_score(mut self, score: f64) -> Self {
        self.corrosion_score = Some(score);
        self
    }

    pub fn with_mechanical(mut self, scores: &'a PropertyScores) -> Self {
        self.mechanical = Some(scores);
        self
    }
}

impl Condition {
    pub fn holds(&self, ctx: &RuleContext<'_>) -> bool {
        match *self {
            Condition::Element { element, op, value } => {
                op.compare(ctx.composition.get(element), value)
            }
            Condition::Category { category } => ctx.category == Some(category),
            Condition::CorrosionScore { op, value } => ctx
                .corrosion_score
                .map_or(false, |score| op.compare(score, value)),
            Condition::Mechanical { property, op, value } => ctx
                .mechanical
                .map_or(false, |scores| op.compare(scores.get(property), value)),
        }
    }
}

/// `when` must all hold; `when_any`, if non-empty, needs one match.
pub fn triggered(when: &[Condition], when_any: &[Condition], ctx: &RuleContext<'_>) -> bool {
    when.iter().all(|c| c.holds(ctx))
        && (when_any.is_empty() || when_any.iter().any(|c| c.holds(ctx)))
}

impl Rule {
    pub fn applies(&self, ctx: &RuleContext<'_>) -> bool {
        triggered(&self.when, &self.when_any, ctx)
    }
}

/// Evaluate rules in order and return the ones that fire.
///
/// Ungrouped rules fire whenever they apply. Within a group only the first
/// applying rule fires.
pub fn fire<'r>(rules: &'r [Rule], ctx: &RuleContext<'_>) -> Vec<&'r Rule> {
    let mut settled: HashSet<&str> = HashSet::new();
    let mut fired = Vec::new();

    for rule in rules {
        if let Some(group) = rule.group.as_deref() {
            if settled.contains(group) {
                continue;
            }
            if rule.applies(ctx) {
                settled.insert(group);
                fired.push(rule);
            }
        } else if rule.applies(ctx) {
            fired.push(rule);
        }
    }

    fired
}

/// Sum of points over fired rules.
pub fn total_points(fired: &[&Rule]) -> f64 {
    fired.iter().map(|r| r.points).sum()
}

/// Explanations of fired rules, skipping empty ones.
pub fn explanations(fired: &[&Rule]) -> Vec<String> {
    fired
        .iter()
        .filter(|r| !r.explanation.is_empty())
        .map(|r| r.explanation.clone())
        .collect()
}
