use tracing::debug;

use crate::composition::{normalize, CompositionVector, Element, MaterialRecord};
use crate::rules::EngineSettings;

use super::types::{ElementDifference, ElementMatch, SimilarityResult};

/// Weighted composition similarity in [0, 1], rounded to two decimals.
///
/// Each element contributes `|a - b| / max(a, b, 1)` scaled by its weight.
/// The floor of 1 keeps trace elements from dominating the score.
pub fn similarity(a: &CompositionVector, b: &CompositionVector) -> f64 {
    let mut weighted = 0.0;
    let mut total_weight = 0.0;

    for element in Element::ALL {
        let weight = element.weight();
        weighted += relative_difference(a.get(element), b.get(element)) * weight;
        total_weight += weight;
    }

    if total_weight == 0.0 {
        return 1.0;
    }
    round_to(1.0 - weighted / total_weight, 2).clamp(0.0, 1.0)
}

fn relative_difference(a: f64, b: f64) -> f64 {
    (a - b).abs() / a.max(b).max(1.0)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Split the elements of two materials into significant differences and
/// matches. An element is never both.
pub fn compare_elements(
    target: &CompositionVector,
    candidate: &CompositionVector,
    settings: &EngineSettings,
) -> (Vec<ElementDifference>, Vec<ElementMatch>) {
    let mut differences = Vec::new();
    let mut matches = Vec::new();

    for element in Element::ALL {
        let (t, c) = (target.get(element), candidate.get(element));
        let difference = (t - c).abs();

        if difference > settings.significant_difference {
            differences.push(ElementDifference {
                element,
                native_name: element.native_name().to_string(),
                target_value: t,
                candidate_value: c,
                difference: round_to(difference, 3),
                percentage: (relative_difference(t, c) * 100.0).round(),
            });
            continue;
        }

        let element_similarity = 1.0 - relative_difference(t, c);
        if element_similarity > settings.match_similarity && (t > 0.0 || c > 0.0) {
            matches.push(ElementMatch {
                element,
                native_name: element.native_name().to_string(),
                target_value: t,
                candidate_value: c,
                similarity: (element_similarity * 100.0).round(),
            });
        }
    }

    differences.sort_by(|a, b| b.difference.total_cmp(&a.difference));
    matches.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    (differences, matches)
}

/// Rank catalog records by similarity to `target`.
///
/// The target itself (same name or registry code) is skipped. Results at or
/// above `threshold` are returned best first, at most `max_suggestions`.
/// Equal scores keep catalog order.
pub fn find_similar<'a, I>(
    catalog: I,
    target: &MaterialRecord,
    threshold: f64,
    settings: &EngineSettings,
) -> Vec<SimilarityResult>
where
    I: IntoIterator<Item = &'a MaterialRecord>,
{
    let target_vector = normalize(target);
    let mut results = Vec::new();
    let mut considered = 0usize;

    for record in catalog {
        if record.is_same_material(target) {
            continue;
        }
        considered += 1;

        let candidate = normalize(record);
        let score = similarity(&target_vector, &candidate);
        if score < threshold {
            continue;
        }

        let (differences, matching_elements) = compare_elements(&target_vector, &candidate, settings);
        results.push(SimilarityResult {
            material: record.clone(),
            similarity: score,
            differences,
            matching_elements,
        });
    }

    results.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    results.truncate(settings.max_suggestions);

    debug!(
        "{} of {} records within {} of '{}'",
        results.len(),
        considered,
        threshold,
        target.label()
    );
    results
}

/// Cache key for a similarity query, or None if the target has no identity.
pub fn cache_key(target: &MaterialRecord, threshold: f64) -> Option<String> {
    target
        .identity()
        .map(|id| format!("similarity:{}:{}", id, threshold))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::vector_of;
    use crate::rules::default_rules;

    fn settings() -> EngineSettings {
        default_rules().engine
    }

    fn steel(name: &str, cr: f64, ni: f64, c: f64) -> MaterialRecord {
        MaterialRecord::named(name)
            .with_field("Cr", cr)
            .with_field("Ni", ni)
            .with_field("C", c)
    }

    #[test]
    fn test_self_similarity_is_one() {
        let v = vector_of(&[(Element::Cr, 18.0), (Element::Ni, 9.0), (Element::C, 0.05)]);
        assert_eq!(similarity(&v, &v), 1.0);
        assert_eq!(similarity(&CompositionVector::new(), &CompositionVector::new()), 1.0);
    }

    #[test]
    fn test_similarity_is_symmetric_and_bounded() {
        let a = vector_of(&[(Element::Cr, 18.0), (Element::Ni, 9.0)]);
        let b = vector_of(&[(Element::Cr, 11.0), (Element::Mo, 2.5), (Element::Mn, 1.0)]);
        let ab = similarity(&a, &b);
        assert_eq!(ab, similarity(&b, &a));
        assert!((0.0..=1.0).contains(&ab));
        assert!(ab < 1.0);
    }

    #[test]
    fn test_chromium_outweighs_phosphorus() {
        let base = vector_of(&[(Element::Cr, 18.0), (Element::P, 2.0)]);
        let cr_shift = vector_of(&[(Element::Cr, 16.0), (Element::P, 2.0)]);
        let p_shift = vector_of(&[(Element::Cr, 18.0), (Element::P, 0.0)]);
        // Both shifts are a 2-point change but chromium's relative change is smaller.
        assert!(similarity(&base, &cr_shift) > similarity(&base, &p_shift));
    }

    #[test]
    fn test_differences_and_matches_are_disjoint() {
        let target = vector_of(&[(Element::Cr, 18.0), (Element::Ni, 9.0), (Element::Mo, 0.0)]);
        let candidate = vector_of(&[(Element::Cr, 18.4), (Element::Ni, 12.0), (Element::Mo, 2.5)]);
        let (differences, matches) = compare_elements(&target, &candidate, &settings());

        let diff_elements: Vec<_> = differences.iter().map(|d| d.element).collect();
        assert_eq!(diff_elements, vec![Element::Ni, Element::Mo]);
        assert_eq!(differences[0].difference, 3.0);
        assert_eq!(differences[0].percentage, 25.0);

        assert!(matches.iter().any(|m| m.element == Element::Cr && m.similarity == 98.0));
        for m in &matches {
            assert!(!diff_elements.contains(&m.element));
        }
        // Absent from both materials: neither a difference nor a match.
        assert!(!matches.iter().any(|m| m.element == Element::W));
    }

    #[test]
    fn test_find_similar_skips_target_and_sorts() {
        let catalog = vec![
            steel("304", 18.0, 8.0, 0.08),
            steel("304-like", 18.4, 8.0, 0.08),
            steel("316", 17.0, 12.0, 0.08),
            steel("430", 16.0, 0.0, 0.12),
        ];
        let results = find_similar(&catalog, &catalog[0], 0.0, &settings());

        assert!(results.iter().all(|r| r.material.name.as_deref() != Some("304")));
        assert_eq!(results[0].material.name.as_deref(), Some("304-like"));
        for pair in results.windows(2) {
            assert!(pair[0].similarity >= pair[1].similarity);
        }
    }

    #[test]
    fn test_find_similar_threshold_and_cap() {
        let catalog: Vec<_> = (0..25)
            .map(|i| steel(&format!("grade-{}", i), 18.0 + i as f64 * 0.01, 8.0, 0.05))
            .collect();
        let target = steel("probe", 18.0, 8.0, 0.05);

        let results = find_similar(&catalog, &target, 0.9, &settings());
        assert_eq!(results.len(), 10);

        let results = find_similar(&catalog, &steel("far", 0.0, 30.0, 2.0), 0.99, &settings());
        assert!(results.is_empty());
    }

    #[test]
    fn test_find_similar_empty_catalog() {
        let catalog: Vec<MaterialRecord> = vec![];
        assert!(find_similar(&catalog, &steel("304", 18.0, 8.0, 0.08), 0.0, &settings()).is_empty());
    }

    #[test]
    fn test_registry_code_match_is_skipped() {
        let target = MaterialRecord::default().with_usn("S30400").with_field("Cr", 18.0);
        let catalog = vec![MaterialRecord::named("304").with_usn("S30400").with_field("Cr", 18.0)];
        assert!(find_similar(&catalog, &target, 0.0, &settings()).is_empty());
    }

    #[test]
    fn test_cache_key() {
        assert_eq!(
            cache_key(&MaterialRecord::named("304"), 0.8).as_deref(),
            Some("similarity:304:0.8")
        );
        assert_eq!(
            cache_key(&MaterialRecord::default().with_usn("S31603"), 0.5).as_deref(),
            Some("similarity:S31603:0.5")
        );
        assert!(cache_key(&MaterialRecord::default(), 0.8).is_none());
    }
}
