//! TOML loading for the scoring rule tables.
//!
//! Provides two loading methods:
//! - `default_rules()` - Loads embedded rules compiled into the binary
//! - `load_rules(path)` - Loads custom rules from a file path

use std::collections::HashSet;
use std::path::Path;

use tracing::info;

use super::types::{ApplicationProfile, RulesConfig};
use crate::error::AnalysisError;

/// Longest accepted result lifetime: one day.
const MAX_CACHE_TTL_SECS: i64 = 24 * 60 * 60;

/// Default rules embedded in the binary at compile time.
/// These are loaded from `config/analysis_rules.toml`.
const DEFAULT_RULES: &str = include_str!("../../config/analysis_rules.toml");

/// Parse and check a rule table from TOML text.
pub fn parse_rules(content: &str) -> Result<RulesConfig, AnalysisError> {
    let config: RulesConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load rules from a TOML file at the given path.
///
/// # Returns
/// * `Ok(RulesConfig)` - Parsed and checked rules
/// * `Err` - If the file cannot be read, the TOML is invalid, or the table is unusable
pub fn load_rules(path: &Path) -> Result<RulesConfig, AnalysisError> {
    let content = std::fs::read_to_string(path).map_err(|source| AnalysisError::RulesIo {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_rules(&content)?;
    info!(
        "Loaded rules from {:?} ({} applications)",
        path,
        config.applications.len()
    );
    Ok(config)
}

/// Get the default rules embedded in the binary.
///
/// # Panics
/// Panics if the embedded TOML is invalid (this would be a compile-time bug).
pub fn default_rules() -> RulesConfig {
    parse_rules(DEFAULT_RULES).expect("embedded analysis_rules.toml must be valid")
}

impl RulesConfig {
    /// Reject tables the engine cannot work with.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let mut problems = Vec::new();

        if self.engine.max_suggestions == 0 {
            problems.push("engine.max_suggestions must be at least 1".to_string());
        }
        if !(0..=MAX_CACHE_TTL_SECS).contains(&self.engine.cache_ttl_secs) {
            problems.push(format!(
                "engine.cache_ttl_secs must be between 0 and {}",
                MAX_CACHE_TTL_SECS
            ));
        }

        let levels = &self.corrosion.levels;
        if levels.is_empty() {
            problems.push("corrosion.levels must not be empty".to_string());
        } else {
            if levels.windows(2).any(|w| w[0].min_score <= w[1].min_score) {
                problems.push("corrosion.levels must be ordered by descending min_score".to_string());
            }
            if levels.last().map_or(false, |l| l.min_score > 0.0) {
                problems.push("the lowest corrosion level must start at 0".to_string());
            }
        }

        let mut seen_labels = HashSet::new();
        for app in &self.applications {
            if app.candidates.is_empty() {
                problems.push(format!("application '{}' has no candidates", app.id));
            }
            if app.labels.is_empty() {
                problems.push(format!("application '{}' has no labels", app.id));
            }
            let keys: HashSet<String> = std::iter::once(&app.id)
                .chain(&app.labels)
                .map(|l| l.trim().to_lowercase())
                .collect();
            for key in keys {
                if !seen_labels.insert(key.clone()) {
                    problems.push(format!("label '{}' is used by more than one application", key));
                }
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(AnalysisError::InvalidRules(problems))
        }
    }

    /// Find the application answering to `label` (id or any label).
    pub fn application(&self, label: &str) -> Option<&ApplicationProfile> {
        self.applications.iter().find(|a| a.answers_to(label))
    }
}
