use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::types::Category;

/// A material as it appears in the catalog.
///
/// Only identity and classification fields are typed. Element contents stay
/// in `fields` under whatever key and encoding the data source used; the
/// normalizer makes sense of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Registry code (UNS-style).
    #[serde(default, rename = "USN", alias = "usn", skip_serializing_if = "Option::is_none")]
    pub usn: Option<String>,
    /// Free-text category label, e.g. "Austenitic" or "奥氏体".
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Equivalent grade names keyed by standard (e.g. "AISI" -> "316L").
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub global: BTreeMap<String, String>,
    /// Every other field, including element contents.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl MaterialRecord {
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::default()
        }
    }

    /// Builder-style helper for setting a raw field.
    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn with_category(mut self, label: &str) -> Self {
        self.category = Some(label.to_string());
        self
    }

    pub fn with_usn(mut self, usn: &str) -> Self {
        self.usn = Some(usn.to_string());
        self
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Parsed category, if the label is recognised.
    pub fn category(&self) -> Option<Category> {
        self.category.as_deref().and_then(Category::from_label)
    }

    /// Name, falling back to the registry code.
    pub fn identity(&self) -> Option<&str> {
        let present = |s: &&str| !s.trim().is_empty();
        self.name
            .as_deref()
            .filter(present)
            .or_else(|| self.usn.as_deref().filter(present))
    }

    /// Display label for logs and CLI output.
    pub fn label(&self) -> &str {
        self.identity().unwrap_or("<unnamed>")
    }

    /// True if both records share a name or a registry code.
    pub fn is_same_material(&self, other: &MaterialRecord) -> bool {
        let same = |a: &Option<String>, b: &Option<String>| match (a, b) {
            (Some(a), Some(b)) => !a.trim().is_empty() && a == b,
            _ => false,
        };
        same(&self.name, &other.name) || same(&self.usn, &other.usn)
    }

    /// True if this record is known under `grade`: its name, its registry
    /// code or any of its cross-standard equivalents.
    pub fn answers_to(&self, grade: &str) -> bool {
        self.name.as_deref() == Some(grade)
            || self.usn.as_deref() == Some(grade)
            || self.global.values().any(|g| g == grade)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_mixed_record() {
        let json = r#"{
            "name": "316L",
            "USN": "S31603",
            "type": "奥氏体",
            "global": { "JIS": "SUS316L", "EN": "1.4404" },
            "C": "≤0.03",
            "铬": "16.0-18.0",
            "ni": 12
        }"#;
        let record: MaterialRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.name.as_deref(), Some("316L"));
        assert_eq!(record.usn.as_deref(), Some("S31603"));
        assert_eq!(record.category(), Some(Category::Austenitic));
        assert_eq!(record.global.len(), 2);
        assert_eq!(record.field("铬"), Some(&Value::from("16.0-18.0")));
        assert_eq!(record.field("ni"), Some(&Value::from(12)));
        assert!(record.field("name").is_none(), "typed fields are not duplicated");
    }

    #[test]
    fn test_lowercase_usn_alias() {
        let record: MaterialRecord = serde_json::from_str(r#"{"usn": "S30400"}"#).unwrap();
        assert_eq!(record.usn.as_deref(), Some("S30400"));
        assert_eq!(record.identity(), Some("S30400"));
    }

    #[test]
    fn test_same_material_by_name_or_code() {
        let a = MaterialRecord::named("304").with_usn("S30400");
        let b = MaterialRecord::named("304 copy").with_usn("S30400");
        let c = MaterialRecord::named("304");
        let d = MaterialRecord::named("316");
        assert!(a.is_same_material(&b));
        assert!(a.is_same_material(&c));
        assert!(!a.is_same_material(&d));
    }

    #[test]
    fn test_unnamed_records_are_never_the_same() {
        let a = MaterialRecord::default().with_field("Cr", 18);
        let b = MaterialRecord::default().with_field("Cr", 17);
        assert!(!a.is_same_material(&b));
        assert_eq!(a.identity(), None);
        assert_eq!(a.label(), "<unnamed>");
    }

    #[test]
    fn test_answers_to_global_equivalent() {
        let mut record = MaterialRecord::named("06Cr19Ni10").with_usn("S30408");
        record.global.insert("AISI".to_string(), "304".to_string());
        assert!(record.answers_to("304"));
        assert!(record.answers_to("S30408"));
        assert!(record.answers_to("06Cr19Ni10"));
        assert!(!record.answers_to("316"));
    }
}
