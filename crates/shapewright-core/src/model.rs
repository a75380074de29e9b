//! Shape model handed over by the extractor
//!
//! The model is read-only input for every serializer. Missing required values
//! (`iri`, `path`, `target_class`) are represented as empty strings so that a
//! partially broken snapshot can still be loaded and reported by
//! [`crate::validate::can_format`].

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::vocabulary::{LEGACY_NODE_KIND, UNDEFINED};

/// Node kind token attached to a property shape or OR-list item
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    Iri,
    Literal,
    BNode,
    NonLiteral,
    /// `"NodeKind"` written by older extractors where `IRI` was meant
    Legacy,
    Other(String),
}

impl NodeKind {
    pub fn from_token(token: &str) -> Self {
        match token.trim() {
            "IRI" => NodeKind::Iri,
            "Literal" => NodeKind::Literal,
            "BNode" | "BlankNode" => NodeKind::BNode,
            "NonLiteral" => NodeKind::NonLiteral,
            LEGACY_NODE_KIND => NodeKind::Legacy,
            other => NodeKind::Other(other.to_string()),
        }
    }

    pub fn as_token(&self) -> &str {
        match self {
            NodeKind::Iri => "IRI",
            NodeKind::Literal => "Literal",
            NodeKind::BNode => "BNode",
            NodeKind::NonLiteral => "NonLiteral",
            NodeKind::Legacy => LEGACY_NODE_KIND,
            NodeKind::Other(token) => token,
        }
    }

    /// Applies the legacy correction: `NodeKind` becomes `IRI`, everything
    /// else is returned as is.
    pub fn corrected(&self) -> NodeKind {
        match self {
            NodeKind::Legacy => NodeKind::Iri,
            other => other.clone(),
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, NodeKind::Legacy)
    }
}

impl From<String> for NodeKind {
    fn from(token: String) -> Self {
        NodeKind::from_token(&token)
    }
}

impl From<&str> for NodeKind {
    fn from(token: &str) -> Self {
        NodeKind::from_token(token)
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        kind.as_token().to_string()
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

/// One alternative of a property shape's disjunctive constraint
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrListItem {
    #[serde(default)]
    pub data_type_or_class: Option<String>,
    #[serde(default)]
    pub node_kind: Option<NodeKind>,
    #[serde(default)]
    pub support: Option<u64>,
    #[serde(default)]
    pub confidence: Option<f64>,
    /// Set by the extractor when the item's support is below its cutoff
    #[serde(default, deserialize_with = "null_as_default")]
    pub support_prune_flag: bool,
    /// Set by the extractor when the item's confidence is below its cutoff
    #[serde(default, deserialize_with = "null_as_default")]
    pub confidence_prune_flag: bool,
}

impl OrListItem {
    pub fn new(data_type_or_class: impl Into<String>, node_kind: impl Into<NodeKind>) -> Self {
        Self {
            data_type_or_class: Some(data_type_or_class.into()),
            node_kind: Some(node_kind.into()),
            ..Self::default()
        }
    }

    pub fn with_statistics(mut self, support: u64, confidence: f64) -> Self {
        self.support = Some(support);
        self.confidence = Some(confidence);
        self
    }

    pub fn with_prune_flags(mut self, support_pruned: bool, confidence_pruned: bool) -> Self {
        self.support_prune_flag = support_pruned;
        self.confidence_prune_flag = confidence_pruned;
        self
    }

    /// Datatype or class, unless absent or the `Undefined` sentinel
    pub fn defined_type(&self) -> Option<&str> {
        defined(self.data_type_or_class.as_deref())
    }

    /// Neither prune flag is set
    pub fn is_reliable(&self) -> bool {
        !self.support_prune_flag && !self.confidence_prune_flag
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyShape {
    #[serde(default, deserialize_with = "null_as_default")]
    pub iri: String,
    /// Path IRI; an inverse path carries a leading `^`
    #[serde(default, deserialize_with = "null_as_default")]
    pub path: String,
    #[serde(default)]
    pub node_kind: Option<NodeKind>,
    #[serde(default)]
    pub data_type_or_class: Option<String>,
    #[serde(default)]
    pub support: Option<u64>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_or_list: bool,
    #[serde(default, rename = "orItems", deserialize_with = "null_as_default")]
    pub or_list_items: Vec<OrListItem>,
    /// Finite set of allowed values, when the extractor observed one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_values: Option<Vec<String>>,
}

impl PropertyShape {
    pub fn new(iri: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            iri: iri.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_node_kind(mut self, node_kind: impl Into<NodeKind>) -> Self {
        self.node_kind = Some(node_kind.into());
        self
    }

    pub fn with_type(mut self, data_type_or_class: impl Into<String>) -> Self {
        self.data_type_or_class = Some(data_type_or_class.into());
        self
    }

    pub fn with_statistics(mut self, support: u64, confidence: f64) -> Self {
        self.support = Some(support);
        self.confidence = Some(confidence);
        self
    }

    pub fn with_or_items(mut self, items: Vec<OrListItem>) -> Self {
        self.has_or_list = true;
        self.or_list_items = items;
        self
    }

    pub fn with_in_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.in_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Datatype or class, unless absent or the `Undefined` sentinel
    pub fn defined_type(&self) -> Option<&str> {
        defined(self.data_type_or_class.as_deref())
    }

    pub fn is_inverse(&self) -> bool {
        self.path.starts_with('^')
    }

    /// Non-empty enumeration, if any
    pub fn enumeration(&self) -> Option<&[String]> {
        self.in_values.as_deref().filter(|values| !values.is_empty())
    }

    /// OR-list items whose datatype or class is usable
    pub fn defined_or_items(&self) -> impl Iterator<Item = &OrListItem> {
        self.or_list_items
            .iter()
            .filter(|item| item.defined_type().is_some())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeShape {
    #[serde(default, deserialize_with = "null_as_default")]
    pub iri: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub target_class: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub support: u64,
    /// Set by the extractor when the shape falls below the node-level support cutoff
    #[serde(default, deserialize_with = "null_as_default")]
    pub prune_flag: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub property_shapes: Vec<PropertyShape>,
}

impl NodeShape {
    pub fn new(iri: impl Into<String>, target_class: impl Into<String>, support: u64) -> Self {
        Self {
            iri: iri.into(),
            target_class: target_class.into(),
            support,
            ..Self::default()
        }
    }

    pub fn with_property(mut self, property: PropertyShape) -> Self {
        self.property_shapes.push(property);
        self
    }

    pub fn pruned(mut self) -> Self {
        self.prune_flag = true;
        self
    }
}

fn defined(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != UNDEFINED)
}

/// Accepts an explicit JSON `null` wherever the field would default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
