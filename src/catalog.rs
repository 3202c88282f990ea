//! Read-only snapshot of the material records the engine ranks.
//!
//! Catalog files are JSON: either a bare array of records or an object
//! holding the array under `data`.

use std::path::Path;

use serde_json::Value;
use tracing::{info, warn};

use crate::composition::MaterialRecord;
use crate::error::AnalysisError;

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<MaterialRecord>,
}

impl Catalog {
    pub fn new(records: Vec<MaterialRecord>) -> Self {
        Self { records }
    }

    /// Parse a catalog from JSON text.
    ///
    /// Entries that are not record objects are skipped with a warning.
    pub fn from_json(content: &str) -> Result<Self, AnalysisError> {
        let root: Value = serde_json::from_str(content)
            .map_err(|e| AnalysisError::CatalogFormat(e.to_string()))?;

        let entries = match root {
            Value::Array(entries) => entries,
            Value::Object(mut map) => match map.remove("data") {
                Some(Value::Array(entries)) => entries,
                _ => {
                    return Err(AnalysisError::CatalogFormat(
                        "expected an array of records or an object with a `data` array".to_string(),
                    ))
                }
            },
            _ => {
                return Err(AnalysisError::CatalogFormat(
                    "expected an array of records or an object with a `data` array".to_string(),
                ))
            }
        };

        let total = entries.len();
        let records: Vec<MaterialRecord> = entries
            .into_iter()
            .enumerate()
            .filter_map(|(i, entry)| match serde_json::from_value(entry) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("Skipping catalog entry {}: {}", i, e);
                    None
                }
            })
            .collect();

        if records.len() < total {
            warn!("Loaded {} of {} catalog entries", records.len(), total);
        }
        Ok(Self { records })
    }

    /// Load a catalog file.
    pub fn load(path: &Path) -> Result<Self, AnalysisError> {
        let content = std::fs::read_to_string(path).map_err(|source| AnalysisError::CatalogIo {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&content)?;
        info!("Loaded {} materials from {:?}", catalog.len(), path);
        Ok(catalog)
    }

    pub fn records(&self) -> &[MaterialRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MaterialRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record known under `grade` (name, registry code or a
    /// cross-standard equivalent).
    pub fn find(&self, grade: &str) -> Option<&MaterialRecord> {
        let grade = grade.trim();
        self.records
            .iter()
            .find(|r| r.name.as_deref() == Some(grade))
            .or_else(|| self.records.iter().find(|r| r.answers_to(grade)))
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a MaterialRecord;
    type IntoIter = std::slice::Iter<'a, MaterialRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
