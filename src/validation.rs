use serde::{Deserialize, Serialize};

use crate::composition::{CompositionVector, Element};

/// Outcome of checking one composition for integrity and plausibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// False if there is at least one error
    pub is_valid: bool,
    /// Data-integrity violations
    pub errors: Vec<String>,
    /// Plausibility concerns
    pub warnings: Vec<String>,
    /// Plausibility rating in [0, 100]
    pub quality_score: f64,
    pub suggestions: Vec<String>,
    /// Sum of all element percentages
    pub composition_total: f64,
}

/// Ideal composition bands and the quality allowance each one is worth.
const IDEAL_BANDS: [(Element, f64, f64, f64); 4] = [
    (Element::Cr, 16.0, 20.0, 5.0),
    (Element::Ni, 8.0, 12.0, 5.0),
    (Element::C, 0.0, 0.08, 5.0),
    (Element::Mo, 2.0, 3.0, 3.0),
];

/// Check a composition for integrity errors and plausibility warnings.
pub fn validate(composition: &CompositionVector) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let get = |e: Element| composition.get(e);

    // Integrity: percentages cannot add up to more than the whole
    let total = composition.total();
    if total > 100.0 {
        errors.push(format!("Composition total exceeds 100% ({:.2}%)", total));
    }

    // Key elements
    if get(Element::Cr) < 10.5 {
        warnings.push("Chromium below 10.5% may not meet the stainless-steel definition".to_string());
    }
    if get(Element::C) > 1.2 {
        warnings.push("Carbon is very high and may hurt corrosion resistance and workability".to_string());
    }
    if get(Element::S) > 0.03 {
        warnings.push("Sulfur is high and may hurt hot workability".to_string());
    }
    if get(Element::P) > 0.045 {
        warnings.push("Phosphorus is high and may lower toughness".to_string());
    }

    // Element balance
    if get(Element::Ni) > 0.0 && get(Element::Cr) / get(Element::Ni) < 1.5 {
        warnings.push("Chromium/nickel ratio may not keep the austenite stable".to_string());
    }
    if get(Element::Mo) > 0.0 && get(Element::Cr) < 16.0 {
        warnings.push("Molybdenum-bearing grades usually need more chromium".to_string());
    }

    let quality_score = quality_score(composition, errors.len(), warnings.len());
    let suggestions = suggestions(composition, !errors.is_empty());

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
        warnings,
        quality_score,
        suggestions,
        composition_total: total,
    }
}

/// 100, less 20 per error, 5 per warning and the allowance of every ideal
/// band the composition misses. Clamped to [0, 100].
///
/// Ideal bands are scored as deductions rather than as a bonus on top of the
/// penalties. A bonus would push near-ideal compositions past the 100 cap,
/// where an extra error or warning no longer lowers the score. The cost is
/// that grades outside the bands (ferritic 430, for one) score up to 18
/// points lower than a bonus scheme would rate them.
pub fn quality_score(composition: &CompositionVector, errors: usize, warnings: usize) -> f64 {
    let missed: f64 = IDEAL_BANDS
        .iter()
        .filter(|(element, low, high, _)| {
            let value = composition.get(*element);
            value < *low || value > *high
        })
        .map(|(_, _, _, allowance)| allowance)
        .sum();

    (100.0 - 20.0 * errors as f64 - 5.0 * warnings as f64 - missed).clamp(0.0, 100.0)
}

fn suggestions(composition: &CompositionVector, has_errors: bool) -> Vec<String> {
    let get = |e: Element| composition.get(e);
    let mut suggestions = Vec::new();

    if has_errors {
        suggestions.push("Check the accuracy of the composition data".to_string());
    }
    if get(Element::Cr) < 12.0 {
        suggestions.push("Choose a grade with at least 12% chromium to ensure stainless behaviour".to_string());
    }
    if get(Element::C) > 0.08 && get(Element::Ti) == 0.0 && get(Element::Nb) == 0.0 {
        suggestions.push("High-carbon grades benefit from titanium or niobium stabilization".to_string());
    }
    if get(Element::Mo) > 0.0 && get(Element::Cr) < 16.0 {
        suggestions.push("Raise chromium to at least 16% to support the molybdenum addition".to_string());
    }
    if get(Element::S) > 0.03 {
        suggestions.push("Lower sulfur to improve hot workability".to_string());
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::vector_of;

    fn ideal_316l() -> CompositionVector {
        vector_of(&[
            (Element::Cr, 17.0),
            (Element::Ni, 10.0),
            (Element::Mo, 2.5),
            (Element::C, 0.03),
            (Element::Mn, 2.0),
            (Element::Si, 0.75),
        ])
    }

    #[test]
    fn test_clean_composition() {
        let result = validate(&ideal_316l());
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
        assert_eq!(result.quality_score, 100.0);
        assert!(result.suggestions.is_empty());
        assert!((result.composition_total - 32.28).abs() < 1e-9);
    }

    #[test]
    fn test_total_over_100_is_an_error() {
        let v = vector_of(&[(Element::Cr, 60.0), (Element::Ni, 45.0)]);
        let result = validate(&v);
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("105.00%"));
        assert!(result.suggestions[0].contains("accuracy"));
    }

    #[test]
    fn test_total_of_exactly_100_is_valid() {
        let v = vector_of(&[(Element::Cr, 60.0), (Element::Ni, 40.0)]);
        assert!(validate(&v).is_valid);
    }

    #[test]
    fn test_warnings() {
        let v = vector_of(&[
            (Element::Cr, 9.0),
            (Element::C, 1.5),
            (Element::S, 0.2),
            (Element::P, 0.06),
            (Element::Ni, 8.0),
            (Element::Mo, 1.0),
        ]);
        let result = validate(&v);
        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 6);
        assert_eq!(result.suggestions.len(), 4);
    }

    #[test]
    fn test_cr_ni_ratio_ignored_without_nickel() {
        let v = vector_of(&[(Element::Cr, 17.0)]);
        assert!(validate(&v).warnings.is_empty());
    }

    #[test]
    fn test_stabilized_high_carbon_needs_no_suggestion() {
        let v = vector_of(&[(Element::Cr, 18.0), (Element::C, 0.1), (Element::Ti, 0.5)]);
        assert!(!validate(&v).suggestions.iter().any(|s| s.contains("stabilization")));
    }

    #[test]
    fn test_quality_score_monotonic() {
        let v = ideal_316l();
        let base = quality_score(&v, 0, 0);
        assert!(base - quality_score(&v, 1, 0) >= 20.0);
        assert!(base - quality_score(&v, 0, 1) >= 5.0);

        let plain = vector_of(&[(Element::Cr, 13.0), (Element::C, 0.2)]);
        let base = quality_score(&plain, 0, 0);
        assert_eq!(base, 82.0);
        assert!(base - quality_score(&plain, 1, 0) >= 20.0);
    }

    #[test]
    fn test_quality_score_is_bounded() {
        let v = vector_of(&[(Element::Cr, 5.0)]);
        assert_eq!(quality_score(&v, 10, 10), 0.0);
        assert!(quality_score(&ideal_316l(), 0, 0) <= 100.0);
    }
}
