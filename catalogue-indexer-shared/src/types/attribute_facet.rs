//! Attribute facet types.

use serde::{Deserialize, Serialize};

/// An aggregated attribute with every distinct value observed for it.
///
/// Values keep the order in which they were first seen. The document ID in
/// the attributes index is the attribute name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttributeFacet {
    pub attribute: String,
    pub values: Vec<String>,
}

impl AttributeFacet {
    pub fn new(attribute: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            attribute: attribute.into(),
            values,
        }
    }

    pub fn document_id(&self) -> &str {
        &self.attribute
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization() {
        let facet = AttributeFacet::new("color", vec!["red".to_string(), "blue".to_string()]);

        let json = serde_json::to_value(&facet).unwrap();
        assert_eq!(json, serde_json::json!({ "attribute": "color", "values": ["red", "blue"] }));
        assert_eq!(facet.document_id(), "color");
    }
}
