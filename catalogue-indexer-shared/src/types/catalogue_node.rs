//! Catalogue tree types.
//!
//! This module defines the in-memory representation of a catalogue tree as
//! returned by the catalogue API. Nodes are decoded exactly once at the
//! boundary into a tagged union: products carry variants, every other node
//! type is an item.

use serde::{Deserialize, Deserializer, Serialize};

/// The declared type of a catalogue node.
///
/// Unknown type strings decode as [`NodeType::Other`] so that new node kinds
/// in the catalogue never break decoding.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// A purchasable product with variants.
    Product,
    /// A folder grouping other nodes.
    Folder,
    /// A content document.
    Document,
    /// Any other (or missing) node type.
    #[default]
    #[serde(other)]
    Other,
}

/// A topic a catalogue node is tagged with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

/// A single resized rendition of an image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ImageVariant {
    #[serde(default, deserialize_with = "null_as_default")]
    pub key: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub width: u32,
}

/// A source image together with its renditions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Image {
    #[serde(default, deserialize_with = "null_as_default")]
    pub key: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub variants: Vec<ImageVariant>,
}

/// An `(attribute, value)` pair attached to a product variant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct VariantAttribute {
    #[serde(default, deserialize_with = "null_as_default")]
    pub attribute: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
}

impl VariantAttribute {
    pub fn new(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            value: value.into(),
        }
    }
}

/// A purchasable configuration of a product.
///
/// `is_default` is a hint from the catalogue; nothing in the indexer relies on
/// exactly one variant per product being flagged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sku: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_default: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes: Vec<VariantAttribute>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<Image>>,
}

/// A catalogue node of type `product`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductNode {
    pub id: String,
    pub name: String,
    pub path: String,
    pub topics: Vec<Topic>,
    pub variants: Vec<ProductVariant>,
    pub children: Vec<CatalogueNode>,
}

/// Any catalogue node that is not a product (folders, documents, ...).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemNode {
    pub id: String,
    pub name: String,
    pub path: String,
    pub node_type: NodeType,
    pub topics: Vec<Topic>,
    pub children: Vec<CatalogueNode>,
}

/// A node of the catalogue tree.
///
/// Children are owned exclusively by their parent, so the structure is a
/// tree with no sharing and no cycles.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "NodeRepr")]
pub enum CatalogueNode {
    Product(ProductNode),
    Item(ItemNode),
}

impl CatalogueNode {
    /// Decode the `children` array of a catalogue API response into a forest.
    ///
    /// Fails if any node's payload disagrees with its declared type, for
    /// example a `product` without a `variants` field.
    pub fn decode_forest(value: serde_json::Value) -> Result<Vec<Self>, serde_json::Error> {
        serde_json::from_value(value)
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Product(product) => &product.id,
            Self::Item(item) => &item.id,
        }
    }

    pub fn node_type(&self) -> NodeType {
        match self {
            Self::Product(_) => NodeType::Product,
            Self::Item(item) => item.node_type,
        }
    }

    pub fn children(&self) -> &[CatalogueNode] {
        match self {
            Self::Product(product) => &product.children,
            Self::Item(item) => &item.children,
        }
    }

    pub fn as_product(&self) -> Option<&ProductNode> {
        match self {
            Self::Product(product) => Some(product),
            Self::Item(_) => None,
        }
    }
}

/// Wire representation of a node, shared by every node type.
#[derive(Deserialize)]
struct NodeRepr {
    #[serde(default, deserialize_with = "null_as_default")]
    id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    path: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    node_type: NodeType,
    #[serde(default, deserialize_with = "null_as_default")]
    topics: Vec<Topic>,
    #[serde(default, deserialize_with = "null_as_default")]
    children: Vec<CatalogueNode>,
    #[serde(default)]
    variants: Option<Vec<ProductVariant>>,
}

impl TryFrom<NodeRepr> for CatalogueNode {
    type Error = String;

    fn try_from(repr: NodeRepr) -> Result<Self, Self::Error> {
        match repr.node_type {
            NodeType::Product => {
                let variants = repr.variants.ok_or_else(|| {
                    format!("product node '{}' has no variants field", repr.id)
                })?;
                Ok(Self::Product(ProductNode {
                    id: repr.id,
                    name: repr.name,
                    path: repr.path,
                    topics: repr.topics,
                    variants,
                    children: repr.children,
                }))
            }
            node_type => Ok(Self::Item(ItemNode {
                id: repr.id,
                name: repr.name,
                path: repr.path,
                node_type,
                topics: repr.topics,
                children: repr.children,
            })),
        }
    }
}

/// A bare catalogue item as accepted by the single-item index endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CatalogueItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub item_type: String,
}

/// GraphQL returns `null` for unset fields; treat it the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
