use tracing::debug;

use crate::composition::{Category, CompositionVector};
use crate::rules::{explanations, fire, total_points, CorrosionLevel, CorrosionRules, LevelBand, RuleContext};

use super::types::CorrosionPrediction;

/// Corrosion score alone, in [0, 100].
pub fn corrosion_score(
    composition: &CompositionVector,
    category: Option<Category>,
    rules: &CorrosionRules,
) -> f64 {
    let ctx = RuleContext::new(composition, category);
    total_points(&fire(&rules.rules, &ctx)).clamp(0.0, 100.0)
}

/// Score a composition against the corrosion rules and describe the result.
pub fn predict_corrosion(
    composition: &CompositionVector,
    category: Option<Category>,
    rules: &CorrosionRules,
) -> CorrosionPrediction {
    let ctx = RuleContext::new(composition, category);
    let fired = fire(&rules.rules, &ctx);
    let score = total_points(&fired).clamp(0.0, 100.0);

    let advice_ctx = ctx.with_corrosion_score(score);
    let recommendations = explanations(&fire(&rules.advice, &advice_ctx));

    let (level, color, description, applications) = match band_for(score, &rules.levels) {
        Some(band) => (
            band.level,
            band.color.clone(),
            band.description.clone(),
            band.applications.clone(),
        ),
        None => (CorrosionLevel::Bad, String::new(), String::new(), Vec::new()),
    };
    debug!("Corrosion score {} ({})", score, level);

    CorrosionPrediction {
        score,
        level,
        color,
        description,
        factors: explanations(&fired),
        applications,
        recommendations,
    }
}

/// The highest band whose minimum the score reaches. Scores below every
/// band fall into the last one.
fn band_for(score: f64, levels: &[LevelBand]) -> Option<&LevelBand> {
    levels
        .iter()
        .find(|band| score >= band.min_score)
        .or_else(|| levels.last())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::{vector_of, Element};
    use crate::rules::default_rules;

    fn predict(pairs: &[(Element, f64)]) -> CorrosionPrediction {
        predict_corrosion(&vector_of(pairs), None, &default_rules().corrosion)
    }

    #[test]
    fn test_304_is_good() {
        let p = predict(&[(Element::Cr, 18.0), (Element::Ni, 9.0), (Element::C, 0.05)]);
        assert_eq!(p.score, 70.0);
        assert_eq!(p.level, CorrosionLevel::Good);
        assert!(p.factors.iter().any(|f| f.contains("chromium")));
        assert_eq!(p.color, "#3B82F6");
    }

    #[test]
    fn test_low_chromium_is_bad() {
        let p = predict(&[(Element::Cr, 8.0)]);
        assert_eq!(p.score, 10.0, "only the extra-low carbon bonus applies");
        assert_eq!(p.level, CorrosionLevel::Bad);
        assert!(p.factors.iter().any(|f| f.contains("below 10.5%")));
        assert!(p.recommendations.iter().any(|r| r.contains("not suited")));
    }

    #[test]
    fn test_superaustenitic_is_excellent_and_clamped() {
        let p = predict(&[
            (Element::Cr, 20.0),
            (Element::Ni, 18.0),
            (Element::Mo, 6.0),
            (Element::C, 0.02),
            (Element::N, 0.2),
            (Element::Cu, 1.0),
        ]);
        assert_eq!(p.score, 100.0);
        assert_eq!(p.level, CorrosionLevel::Excellent);
        assert!(p.recommendations.is_empty());
    }

    #[test]
    fn test_high_carbon_penalty_never_goes_negative() {
        let p = predict(&[(Element::C, 0.5)]);
        assert_eq!(p.score, 0.0);
        assert!(p.recommendations.iter().any(|r| r.contains("low or extra-low carbon")));
    }

    #[test]
    fn test_molybdenum_advice_depends_on_score() {
        // 40 + 25 + 10 = 75: no molybdenum advice.
        let good = predict(&[(Element::Cr, 18.0), (Element::Ni, 10.0), (Element::C, 0.02)]);
        assert!(!good.recommendations.iter().any(|r| r.contains("molybdenum")));

        // 25 + 10 = 35: advice given.
        let weak = predict(&[(Element::Cr, 13.0), (Element::C, 0.02)]);
        assert!(weak.recommendations.iter().any(|r| r.contains("molybdenum")));
    }

    #[test]
    fn test_score_matches_prediction() {
        let v = vector_of(&[(Element::Cr, 17.0), (Element::Ni, 5.0), (Element::Mo, 1.2)]);
        let rules = default_rules().corrosion;
        assert_eq!(corrosion_score(&v, None, &rules), predict_corrosion(&v, None, &rules).score);
    }

    #[test]
    fn test_band_for_falls_back_to_last() {
        let rules = default_rules().corrosion;
        assert_eq!(band_for(-1.0, &rules.levels).map(|b| b.level), Some(CorrosionLevel::Bad));
        assert_eq!(band_for(85.0, &rules.levels).map(|b| b.level), Some(CorrosionLevel::Excellent));
        assert!(band_for(50.0, &[]).is_none());
    }
}
