//! Aggregation of variant attributes into facets.

use catalogue_indexer_shared::{AttributeFacet, CatalogueNode, VariantAttribute};
use indexmap::{IndexMap, IndexSet};
use tracing::{debug, instrument};

/// Ordered attribute name to ordered value set, built up during traversal.
///
/// Both levels keep insertion order, so the facets come out in the order the
/// attributes and values were first seen.
#[derive(Debug, Default)]
pub struct FacetAccumulator {
    facets: IndexMap<String, IndexSet<String>>,
}

impl FacetAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one attribute value; repeats are ignored.
    pub fn observe(&mut self, attribute: &VariantAttribute) {
        match self.facets.get_mut(&attribute.attribute) {
            Some(values) => {
                values.insert(attribute.value.clone());
            }
            None => {
                let mut values = IndexSet::new();
                values.insert(attribute.value.clone());
                self.facets.insert(attribute.attribute.clone(), values);
            }
        }
    }

    /// Record every attribute of every variant in `node` and its descendants.
    pub fn visit(&mut self, node: &CatalogueNode) {
        if let Some(product) = node.as_product() {
            for variant in &product.variants {
                for attribute in &variant.attributes {
                    self.observe(attribute);
                }
            }
        }

        for child in node.children() {
            self.visit(child);
        }
    }

    pub fn len(&self) -> usize {
        self.facets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }

    pub fn into_facets(self) -> Vec<AttributeFacet> {
        self.facets
            .into_iter()
            .map(|(attribute, values)| AttributeFacet::new(attribute, values.into_iter().collect()))
            .collect()
    }
}

/// Collect the distinct values of every variant attribute in the forest.
#[instrument(skip(roots), fields(root_count = roots.len()))]
pub fn aggregate(roots: &[CatalogueNode]) -> Vec<AttributeFacet> {
    let mut accumulator = FacetAccumulator::new();
    for root in roots {
        accumulator.visit(root);
    }
    debug!(facet_count = accumulator.len(), "Aggregated attributes");
    accumulator.into_facets()
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalogue_indexer_shared::{ItemNode, NodeType, ProductNode, ProductVariant};

    fn variant(attributes: &[(&str, &str)]) -> ProductVariant {
        ProductVariant {
            attributes: attributes
                .iter()
                .map(|(attribute, value)| VariantAttribute::new(*attribute, *value))
                .collect(),
            ..Default::default()
        }
    }

    fn product(variants: Vec<ProductVariant>, children: Vec<CatalogueNode>) -> CatalogueNode {
        CatalogueNode::Product(ProductNode {
            variants,
            children,
            ..Default::default()
        })
    }

    fn folder(children: Vec<CatalogueNode>) -> CatalogueNode {
        CatalogueNode::Item(ItemNode {
            node_type: NodeType::Folder,
            children,
            ..Default::default()
        })
    }

    #[test]
    fn test_union_in_first_seen_order() {
        let roots = vec![product(
            vec![
                variant(&[("color", "red")]),
                variant(&[("color", "blue")]),
                variant(&[("size", "M")]),
            ],
            vec![],
        )];

        assert_eq!(
            aggregate(&roots),
            vec![
                AttributeFacet::new("color", vec!["red".to_string(), "blue".to_string()]),
                AttributeFacet::new("size", vec!["M".to_string()]),
            ]
        );
    }

    #[test]
    fn test_duplicates_collapse() {
        let roots = vec![
            product(vec![variant(&[("color", "red"), ("color", "red")])], vec![]),
            folder(vec![product(vec![variant(&[("color", "red")])], vec![])]),
        ];

        let facets = aggregate(&roots);
        assert_eq!(facets.len(), 1);
        assert_eq!(facets[0].values, vec!["red".to_string()]);
    }

    #[test]
    fn test_nested_products_and_items_contribute() {
        let roots = vec![folder(vec![
            product(
                vec![variant(&[("material", "wool")])],
                vec![product(vec![variant(&[("size", "L"), ("material", "silk")])], vec![])],
            ),
            folder(vec![product(vec![variant(&[("size", "S")])], vec![])]),
        ])];

        let facets = aggregate(&roots);
        let names: Vec<&str> = facets.iter().map(|f| f.document_id()).collect();
        assert_eq!(names, vec!["material", "size"]);
        assert_eq!(facets[0].values, vec!["wool", "silk"]);
        assert_eq!(facets[1].values, vec!["L", "S"]);
    }

    #[test]
    fn test_no_attributes() {
        let roots = vec![folder(vec![product(vec![variant(&[])], vec![])])];
        assert!(aggregate(&roots).is_empty());
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn test_accumulator_observe() {
        let mut accumulator = FacetAccumulator::new();
        assert!(accumulator.is_empty());

        accumulator.observe(&VariantAttribute::new("color", "red"));
        accumulator.observe(&VariantAttribute::new("color", "red"));
        accumulator.observe(&VariantAttribute::new("color", "green"));

        assert_eq!(accumulator.len(), 1);
        assert_eq!(
            accumulator.into_facets(),
            vec![AttributeFacet::new(
                "color",
                vec!["red".to_string(), "green".to_string()]
            )]
        );
    }
}
