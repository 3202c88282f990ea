//! Entry point tying the catalog, the rule tables and the result cache
//! together.

use tracing::{debug, warn};

use crate::cache::{ResultCache, TtlCache};
use crate::catalog::Catalog;
use crate::composition::{normalize, CompositionVector, MaterialRecord};
use crate::prediction::{predict_corrosion, predict_mechanical, CorrosionPrediction, MechanicalPrediction};
use crate::recommendation::{self, Recommendation, Requirements};
use crate::rules::{default_rules, RulesConfig};
use crate::similarity::{self, SimilarityResult};
use crate::validation::{validate, ValidationResult};

/// Values the analyzer memoizes.
#[derive(Debug, Clone)]
pub enum CachedResult {
    Similar(Vec<SimilarityResult>),
    Recommended(Vec<Recommendation>),
}

/// Materials analysis over a fixed catalog.
///
/// Every operation takes `&self`. The only mutable state is the result
/// cache, which is internally synchronized.
pub struct Analyzer {
    catalog: Catalog,
    rules: RulesConfig,
    cache: Box<dyn ResultCache<CachedResult>>,
}

impl Analyzer {
    /// Analyzer with the embedded rule tables and an in-memory TTL cache.
    pub fn new(catalog: Catalog) -> Self {
        Self::with_rules(catalog, default_rules())
    }

    pub fn with_rules(catalog: Catalog, rules: RulesConfig) -> Self {
        Self {
            catalog,
            rules,
            cache: Box::new(TtlCache::new()),
        }
    }

    /// Replace the result cache.
    pub fn with_cache(mut self, cache: impl ResultCache<CachedResult> + 'static) -> Self {
        self.cache = Box::new(cache);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    pub fn normalize(&self, record: &MaterialRecord) -> CompositionVector {
        normalize(record)
    }

    /// Weighted composition similarity of two records, in [0, 1].
    pub fn similarity(&self, a: &MaterialRecord, b: &MaterialRecord) -> f64 {
        similarity::similarity(&normalize(a), &normalize(b))
    }

    /// Catalog records at least `threshold` similar to `target`, best first.
    pub fn find_similar_materials(&self, target: &MaterialRecord, threshold: f64) -> Vec<SimilarityResult> {
        let key = similarity::cache_key(target, threshold);

        if let Some(key) = key.as_deref() {
            if let Some(CachedResult::Similar(results)) = self.cache.get(key) {
                return results;
            }
        }

        let results = similarity::find_similar(&self.catalog, target, threshold, &self.rules.engine);

        match key {
            Some(key) => self.cache.set(
                &key,
                CachedResult::Similar(results.clone()),
                self.rules.engine.cache_ttl(),
            ),
            None => debug!("Target has no name or registry code, result not cached"),
        }
        results
    }

    /// [`Self::find_similar_materials`] at the configured default threshold.
    pub fn find_similar_materials_default(&self, target: &MaterialRecord) -> Vec<SimilarityResult> {
        self.find_similar_materials(target, self.rules.engine.similarity_threshold)
    }

    pub fn predict_corrosion_resistance(&self, record: &MaterialRecord) -> CorrosionPrediction {
        predict_corrosion(&normalize(record), record.category(), &self.rules.corrosion)
    }

    pub fn predict_mechanical_properties(&self, record: &MaterialRecord) -> MechanicalPrediction {
        predict_mechanical(&normalize(record), record.category(), &self.rules.mechanical)
    }

    pub fn validate_composition(&self, record: &MaterialRecord) -> ValidationResult {
        validate(&normalize(record))
    }

    /// Grades from the catalog suited to `application`, best first.
    ///
    /// `application` may be an application id or any of its labels. Unknown
    /// applications yield an empty list.
    pub fn recommend_by_application(&self, application: &str, requirements: &Requirements) -> Vec<Recommendation> {
        let Some(profile) = self.rules.application(application) else {
            warn!("Unknown application '{}'", application);
            return Vec::new();
        };

        let key = recommendation::cache_key(profile, requirements);
        if let Some(CachedResult::Recommended(results)) = self.cache.get(&key) {
            return results;
        }

        let results = recommendation::recommend(self.catalog.records(), profile, requirements, &self.rules);
        self.cache.set(
            &key,
            CachedResult::Recommended(results.clone()),
            self.rules.engine.cache_ttl(),
        );
        results
    }

    /// Forget every memoized result.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Drop expired memoized results, returning how many were removed.
    pub fn purge_expired_cache(&self) -> usize {
        self.cache.purge_expired()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::NoopCache;

    fn sample() -> Catalog {
        Catalog::new(vec![
            MaterialRecord::named("304").with_field("Cr", 18.0).with_field("Ni", 8.0),
            MaterialRecord::named("304-like").with_field("Cr", 18.4).with_field("Ni", 8.0),
        ])
    }

    #[test]
    fn test_similar_results_are_cached() {
        let analyzer = Analyzer::new(sample());
        let target = analyzer.catalog().find("304").cloned().unwrap();
        let first = analyzer.find_similar_materials(&target, 0.8);
        assert_eq!(first.len(), 1);

        // A record with the same identity hits the cached entry.
        let changed = MaterialRecord::named("304");
        let second = analyzer.find_similar_materials(&changed, 0.8);
        assert_eq!(second.len(), 1);

        analyzer.clear_cache();
        let recomputed = analyzer.find_similar_materials(&changed, 0.8);
        assert!(recomputed.is_empty());
    }

    #[test]
    fn test_names_differing_in_case_are_cached_apart() {
        let analyzer = Analyzer::new(sample());
        let upper = MaterialRecord::named("A").with_field("Cr", 18.0).with_field("Ni", 8.0);
        assert_eq!(analyzer.find_similar_materials(&upper, 0.8).len(), 2);
        assert!(analyzer.find_similar_materials(&MaterialRecord::named("a"), 0.8).is_empty());
    }

    #[test]
    fn test_default_threshold_comes_from_rules() {
        let analyzer = Analyzer::new(sample());
        let target = analyzer.catalog().find("304").cloned().unwrap();
        assert_eq!(analyzer.rules().engine.similarity_threshold, 0.8);
        assert_eq!(
            analyzer.find_similar_materials_default(&target).len(),
            analyzer.find_similar_materials(&target, 0.8).len()
        );

        // Chromium and nickel both missing: 0.77 against either sample grade.
        let bare = MaterialRecord::named("bare");
        assert!(analyzer.find_similar_materials_default(&bare).is_empty());

        let mut rules = default_rules();
        rules.engine.similarity_threshold = 0.5;
        let lenient = Analyzer::with_rules(sample(), rules);
        assert_eq!(lenient.find_similar_materials_default(&bare).len(), 2);
    }

    #[test]
    fn test_anonymous_target_is_not_cached() {
        let analyzer = Analyzer::new(sample());
        let anonymous = MaterialRecord::default().with_field("Cr", 18.0).with_field("Ni", 8.0);
        assert_eq!(analyzer.find_similar_materials(&anonymous, 0.9).len(), 2);
        assert_eq!(analyzer.purge_expired_cache(), 0);
    }

    #[test]
    fn test_noop_cache_always_recomputes() {
        let analyzer = Analyzer::new(sample()).with_cache(NoopCache);
        let target = MaterialRecord::named("304").with_field("Cr", 18.0).with_field("Ni", 8.0);
        assert_eq!(analyzer.find_similar_materials(&target, 0.8).len(), 1);
        assert!(analyzer.find_similar_materials(&MaterialRecord::named("304"), 0.8).is_empty());
    }

    #[test]
    fn test_unknown_application() {
        let analyzer = Analyzer::new(sample());
        assert!(analyzer
            .recommend_by_application("underwater basket weaving", &Requirements::default())
            .is_empty());
    }
}
