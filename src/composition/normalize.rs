use serde_json::{Map, Value};

use super::parse::parse_element_value;
use super::record::MaterialRecord;
use super::types::{CompositionVector, Element, ELEMENT_TABLE};

/// Turn a raw record into a composition vector.
///
/// For each element the alias keys are tried in order and the first value
/// that parses wins. Anything missing or unreadable is 0.
pub fn normalize(record: &MaterialRecord) -> CompositionVector {
    let mut vector = CompositionVector::new();
    for spec in &ELEMENT_TABLE {
        let value = spec
            .aliases
            .iter()
            .filter_map(|key| record.field(key))
            .find_map(value_to_percent)
            .unwrap_or(0.0);
        vector.set(spec.element, value);
    }
    vector
}

fn value_to_percent(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().map(|v| v.max(0.0)),
        Value::String(s) => parse_element_value(s),
        _ => None,
    }
}

impl CompositionVector {
    /// Write the vector back out as a record keyed by element symbol.
    /// Normalizing the result gives the same vector back.
    pub fn to_record(&self) -> MaterialRecord {
        let fields: Map<String, Value> = self
            .iter()
            .map(|(element, value)| (element.symbol().to_string(), Value::from(value)))
            .collect();
        MaterialRecord {
            fields,
            ..MaterialRecord::default()
        }
    }
}

/// Convenience for tests and callers building vectors by hand.
pub fn vector_of(pairs: &[(Element, f64)]) -> CompositionVector {
    CompositionVector::from_pairs(pairs.iter().copied())
}
