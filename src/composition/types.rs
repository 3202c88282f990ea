//! Canonical element set, composition vectors and grade categories.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

// =============================================================================
// ELEMENTS
// =============================================================================

/// A canonical alloying element. Variant order is the vector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Element {
    C,
    Si,
    Mn,
    P,
    S,
    Cr,
    Ni,
    Mo,
    Cu,
    Al,
    Ti,
    Nb,
    N,
    W,
    B,
    V,
}

/// Number of canonical elements.
pub const ELEMENT_COUNT: usize = 16;

/// Static facts about one element: how it is keyed in raw records and how
/// much it matters when comparing grades.
#[derive(Debug, Clone, Copy)]
pub struct ElementSpec {
    pub element: Element,
    pub symbol: &'static str,
    /// Lookup keys tried in order when reading a raw record.
    pub aliases: &'static [&'static str],
    /// Native-language name shown next to differences and matches.
    pub native_name: &'static str,
    /// Similarity weight. Chromium and nickel dominate, trace elements barely count.
    pub weight: f64,
}

/// Alias and weight table, in canonical order.
pub const ELEMENT_TABLE: [ElementSpec; ELEMENT_COUNT] = [
    ElementSpec { element: Element::C, symbol: "C", aliases: &["C", "c", "碳"], native_name: "碳", weight: 1.8 },
    ElementSpec { element: Element::Si, symbol: "Si", aliases: &["Si", "si", "硅"], native_name: "硅", weight: 1.0 },
    ElementSpec { element: Element::Mn, symbol: "Mn", aliases: &["Mn", "mn", "锰"], native_name: "锰", weight: 1.2 },
    ElementSpec { element: Element::P, symbol: "P", aliases: &["P", "p", "磷"], native_name: "磷", weight: 0.8 },
    ElementSpec { element: Element::S, symbol: "S", aliases: &["S", "s", "硫"], native_name: "硫", weight: 0.8 },
    ElementSpec { element: Element::Cr, symbol: "Cr", aliases: &["Cr", "cr", "铬"], native_name: "铬", weight: 3.0 },
    ElementSpec { element: Element::Ni, symbol: "Ni", aliases: &["Ni", "ni", "镍"], native_name: "镍", weight: 2.5 },
    ElementSpec { element: Element::Mo, symbol: "Mo", aliases: &["Mo", "mo", "钼"], native_name: "钼", weight: 2.0 },
    ElementSpec { element: Element::Cu, symbol: "Cu", aliases: &["Cu", "cu", "铜"], native_name: "铜", weight: 1.5 },
    ElementSpec { element: Element::Al, symbol: "Al", aliases: &["Al", "al", "铝"], native_name: "铝", weight: 1.0 },
    ElementSpec { element: Element::Ti, symbol: "Ti", aliases: &["Ti", "ti", "钛"], native_name: "钛", weight: 1.3 },
    ElementSpec { element: Element::Nb, symbol: "Nb", aliases: &["Nb", "nb", "铌"], native_name: "铌", weight: 1.3 },
    ElementSpec { element: Element::N, symbol: "N", aliases: &["N", "n", "氮"], native_name: "氮", weight: 1.8 },
    ElementSpec { element: Element::W, symbol: "W", aliases: &["W", "w", "钨"], native_name: "钨", weight: 1.5 },
    ElementSpec { element: Element::B, symbol: "B", aliases: &["B", "b", "硼"], native_name: "硼", weight: 1.0 },
    ElementSpec { element: Element::V, symbol: "V", aliases: &["V", "v", "钒"], native_name: "钒", weight: 1.0 },
];

impl Element {
    /// All elements in canonical order.
    pub const ALL: [Element; ELEMENT_COUNT] = [
        Element::C,
        Element::Si,
        Element::Mn,
        Element::P,
        Element::S,
        Element::Cr,
        Element::Ni,
        Element::Mo,
        Element::Cu,
        Element::Al,
        Element::Ti,
        Element::Nb,
        Element::N,
        Element::W,
        Element::B,
        Element::V,
    ];

    fn index(self) -> usize {
        self as usize
    }

    pub fn spec(self) -> &'static ElementSpec {
        &ELEMENT_TABLE[self.index()]
    }

    pub fn symbol(self) -> &'static str {
        self.spec().symbol
    }

    pub fn native_name(self) -> &'static str {
        self.spec().native_name
    }

    pub fn weight(self) -> f64 {
        self.spec().weight
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

// =============================================================================
// COMPOSITION VECTOR
// =============================================================================

/// Percentages for every canonical element. Absent elements are 0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CompositionVector {
    values: [f64; ELEMENT_COUNT],
}

impl CompositionVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a vector from (element, percentage) pairs; negatives become 0.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Element, f64)>,
    {
        let mut vector = Self::default();
        for (element, value) in pairs {
            vector.set(element, value);
        }
        vector
    }

    pub fn get(&self, element: Element) -> f64 {
        self.values[element.index()]
    }

    pub fn set(&mut self, element: Element, value: f64) {
        self.values[element.index()] = if value.is_finite() { value.max(0.0) } else { 0.0 };
    }

    /// (element, percentage) in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Element, f64)> + '_ {
        Element::ALL.iter().map(move |&e| (e, self.get(e)))
    }

    /// Sum of all element percentages.
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
}

impl Serialize for CompositionVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(ELEMENT_COUNT))?;
        for (element, value) in self.iter() {
            map.serialize_entry(element.symbol(), &value)?;
        }
        map.end()
    }
}

// =============================================================================
// CATEGORY
// =============================================================================

/// Metallurgical family of a stainless grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Martensitic,
    Austenitic,
    Ferritic,
    Duplex,
    PrecipitationHardening,
}

impl Category {
    /// Parse a free-text category label using case-insensitive substring
    /// matching. Duplex is checked before austenitic and ferritic because the
    /// native duplex label is literally "austenitic-ferritic".
    pub fn from_label(label: &str) -> Option<Category> {
        let lower = label.to_lowercase();
        let has = |needles: &[&str]| needles.iter().any(|n| lower.contains(n));

        if has(&["duplex", "双相", "奥氏体-铁素体", "austenitic-ferritic"]) {
            Some(Category::Duplex)
        } else if has(&["martensitic", "马氏体"]) {
            Some(Category::Martensitic)
        } else if has(&["precipitation", "沉淀硬化"]) {
            Some(Category::PrecipitationHardening)
        } else if has(&["austenitic", "奥氏体"]) {
            Some(Category::Austenitic)
        } else if has(&["ferritic", "铁素体"]) {
            Some(Category::Ferritic)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_canonical_order() {
        for (i, element) in Element::ALL.iter().enumerate() {
            assert_eq!(ELEMENT_TABLE[i].element, *element);
            assert_eq!(ELEMENT_TABLE[i].aliases[0], ELEMENT_TABLE[i].symbol);
        }
    }

    #[test]
    fn test_chromium_and_nickel_weigh_most() {
        let mut weights: Vec<_> = Element::ALL.iter().map(|e| (e.weight(), *e)).collect();
        weights.sort_by(|a, b| b.0.total_cmp(&a.0));
        assert_eq!(weights[0].1, Element::Cr);
        assert_eq!(weights[1].1, Element::Ni);
        assert!(Element::P.weight() < Element::Si.weight());
    }

    #[test]
    fn test_vector_defaults_to_zero() {
        let v = CompositionVector::new();
        assert_eq!(v.iter().count(), ELEMENT_COUNT);
        assert!(v.iter().all(|(_, value)| value == 0.0));
        assert_eq!(v.total(), 0.0);
    }

    #[test]
    fn test_vector_rejects_negative_and_nan() {
        let mut v = CompositionVector::new();
        v.set(Element::Cr, -3.0);
        v.set(Element::Ni, f64::NAN);
        v.set(Element::Mo, 2.5);
        assert_eq!(v.get(Element::Cr), 0.0);
        assert_eq!(v.get(Element::Ni), 0.0);
        assert_eq!(v.get(Element::Mo), 2.5);
    }

    #[test]
    fn test_vector_serializes_as_symbol_map() {
        let v = CompositionVector::from_pairs([(Element::Cr, 18.0), (Element::Ni, 8.0)]);
        let json = serde_json::to_value(v).unwrap();
        assert_eq!(json["Cr"], 18.0);
        assert_eq!(json["Ni"], 8.0);
        assert_eq!(json["V"], 0.0);
    }

    #[test]
    fn test_category_from_label() {
        assert_eq!(Category::from_label("Austenitic"), Some(Category::Austenitic));
        assert_eq!(Category::from_label("奥氏体型"), Some(Category::Austenitic));
        assert_eq!(Category::from_label("马氏体"), Some(Category::Martensitic));
        assert_eq!(Category::from_label("Ferritic stainless"), Some(Category::Ferritic));
        assert_eq!(
            Category::from_label("Precipitation hardening"),
            Some(Category::PrecipitationHardening)
        );
        assert_eq!(Category::from_label("unknown"), None);
    }

    #[test]
    fn test_native_duplex_label_is_not_austenitic() {
        assert_eq!(Category::from_label("奥氏体-铁素体"), Some(Category::Duplex));
        assert_eq!(Category::from_label("双相不锈钢"), Some(Category::Duplex));
        assert_eq!(Category::from_label("Duplex"), Some(Category::Duplex));
    }
}
