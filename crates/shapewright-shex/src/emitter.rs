//! ShEx emitter
//!
//! Writes ShExC directly from the shape model. Node shapes are emitted in IRI
//! order; each body lists `rdf:type` (synthesized from the target class when
//! the model has no usable one) and the remaining properties sorted by path.
//! Classes referenced through `IRI AND @<Helper>` get a helper shape after
//! the primary shapes.

use itertools::Itertools;
use shapewright_core::model::{NodeKind, NodeShape, PropertyShape};
use shapewright_core::validate;
use shapewright_core::vocabulary::is_xsd;
use std::collections::BTreeSet;
use tracing::{debug, info};

use crate::curie::{shape_label, shape_stem, to_curie};
use crate::helpers::HelperShapeRegistry;
use crate::syntax::{disjunction, value_set, ANY, PREFIX_BLOCK};

const RDF_TYPE: &str = "rdf:type";

/// Cardinality of `rdf:type` constraints
const TYPE_CARDINALITY: &str = "+";
/// Cardinality of every other constraint
const PROPERTY_CARDINALITY: &str = "*";

/// Stateless ShExC serializer; per-call state lives in [`EmitContext`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ShexEmitter;

impl ShexEmitter {
    pub fn new() -> Self {
        Self
    }

    pub fn can_format(&self, node_shapes: &[NodeShape]) -> bool {
        validate::can_format(node_shapes)
    }

    pub fn format_shapes(&self, node_shapes: &[NodeShape]) -> String {
        let mut ordered: Vec<&NodeShape> = node_shapes.iter().collect();
        ordered.sort_by(|a, b| a.iri.cmp(&b.iri));

        let labels = assign_labels(&ordered);
        let mut context = EmitContext::new(labels.iter().cloned());

        let mut out = String::from(PREFIX_BLOCK);
        if !ordered.is_empty() {
            out.push('\n');
        }
        for (node_shape, label) in ordered.iter().zip(&labels) {
            out.push_str(&context.node_shape(node_shape, label));
        }
        out.push_str(&context.helpers.render());

        info!(
            node_shapes = ordered.len(),
            helper_shapes = context.helpers.len(),
            bytes = out.len(),
            "formatted shapes as ShEx"
        );
        out
    }
}

/// Primary shape labels, suffixed with a counter when two node shapes share a
/// target class
fn assign_labels(ordered: &[&NodeShape]) -> Vec<String> {
    let mut used = BTreeSet::new();
    ordered
        .iter()
        .map(|ns| {
            let base = shape_label(&ns.target_class);
            let mut label = base.clone();
            let mut n = 2;
            while used.contains(&label) {
                label = format!("{}{}Shape", shape_stem(&base), n);
                n += 1;
            }
            used.insert(label.clone());
            label
        })
        .collect()
}

/// State scoped to one `format_shapes` call
struct EmitContext {
    helpers: HelperShapeRegistry,
}

impl EmitContext {
    fn new<I: IntoIterator<Item = String>>(primary_labels: I) -> Self {
        Self {
            helpers: HelperShapeRegistry::new(primary_labels),
        }
    }

    fn node_shape(&mut self, node_shape: &NodeShape, label: &str) -> String {
        let mut properties: Vec<(String, &PropertyShape)> = node_shape
            .property_shapes
            .iter()
            .filter(|ps| !ps.path.trim().is_empty())
            .map(|ps| (to_curie(&ps.path), ps))
            .collect();
        properties.sort_by(|a, b| a.0.cmp(&b.0));

        let mut lines = Vec::with_capacity(properties.len() + 1);
        let mut has_type = false;

        for (path, property) in properties {
            if path == RDF_TYPE {
                match type_constraint(property) {
                    Some(term) => {
                        has_type = true;
                        lines.push(format!("  {} {} {}", path, term, TYPE_CARDINALITY));
                    }
                    None => debug!(shape = %label, "dropping rdf:type property without a usable class"),
                }
            } else {
                let term = self.constraint(property);
                lines.push(format!("  {} {} {}", path, term, PROPERTY_CARDINALITY));
            }
        }

        if !has_type && !node_shape.target_class.trim().is_empty() {
            lines.insert(
                0,
                format!(
                    "  {} [{}] {}",
                    RDF_TYPE,
                    to_curie(&node_shape.target_class),
                    TYPE_CARDINALITY
                ),
            );
        }

        if lines.is_empty() {
            format!("{} {{\n}}\n\n", label)
        } else {
            format!("{} {{\n{}\n}}\n\n", label, lines.join(" ;\n"))
        }
    }

    fn constraint(&mut self, property: &PropertyShape) -> String {
        if let Some(values) = property.enumeration() {
            return value_set(values);
        }
        if property.has_or_list {
            let terms: Vec<String> = property
                .defined_or_items()
                .map(|item| self.term(item.defined_type(), item.node_kind.as_ref()))
                .collect();
            return disjunction(terms);
        }
        self.term(property.defined_type(), property.node_kind.as_ref())
    }

    /// Node constraint for one datatype/class and node kind
    fn term(&mut self, ty: Option<&str>, kind: Option<&NodeKind>) -> String {
        if let Some(kind) = kind.filter(|k| k.is_legacy()) {
            debug!(token = %kind, "correcting legacy node kind token to IRI");
        }

        match kind.map(NodeKind::corrected) {
            Some(NodeKind::Iri) => match ty {
                Some(class) if !is_xsd(class) => self.class_reference(class),
                _ => "IRI".to_string(),
            },
            Some(NodeKind::Literal) => match ty {
                Some(datatype) if is_xsd(datatype) => to_curie(datatype),
                _ => "Literal".to_string(),
            },
            Some(NodeKind::BNode) => NodeKind::BNode.as_token().to_string(),
            Some(NodeKind::NonLiteral) => NodeKind::NonLiteral.as_token().to_string(),
            _ => match ty {
                Some(datatype) if is_xsd(datatype) => to_curie(datatype),
                Some(class) => self.class_reference(class),
                None => ANY.to_string(),
            },
        }
    }

    fn class_reference(&mut self, class: &str) -> String {
        let label = self.helpers.register(&to_curie(class));
        format!("IRI AND @{}", label)
    }
}

/// Value set for an `rdf:type` property, or `None` when it names no class
fn type_constraint(property: &PropertyShape) -> Option<String> {
    if let Some(values) = property.enumeration() {
        return Some(value_set(values));
    }

    if property.has_or_list {
        let classes: Vec<String> = property
            .defined_or_items()
            .filter_map(|item| item.defined_type())
            .filter(|ty| !is_xsd(ty))
            .map(to_curie)
            .sorted()
            .dedup()
            .collect();
        if !classes.is_empty() {
            return Some(format!("[{}]", classes.join(" ")));
        }
    }

    property
        .defined_type()
        .filter(|ty| !is_xsd(ty))
        .map(|class| format!("[{}]", to_curie(class)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapewright_core::model::OrListItem;

    #[test]
    fn test_type_constraint_from_or_list() {
        let ps = PropertyShape::new("ps", "http://www.w3.org/1999/02/22-rdf-syntax-ns#type")
            .with_or_items(vec![
                OrListItem::new("http://shaclshapes.org/B", "IRI"),
                OrListItem::new("http://shaclshapes.org/A", "IRI"),
                OrListItem::new("http://www.w3.org/2001/XMLSchema#string", "Literal"),
                OrListItem::new("Undefined", "IRI"),
            ]);
        assert_eq!(type_constraint(&ps).as_deref(), Some("[qse:A qse:B]"));
    }

    #[test]
    fn test_type_constraint_without_class() {
        let ps = PropertyShape::new("ps", "rdf:type")
            .with_type("http://www.w3.org/2001/XMLSchema#string");
        assert_eq!(type_constraint(&ps), None);

        let ps = PropertyShape::new("ps", "rdf:type").with_type("Undefined");
        assert_eq!(type_constraint(&ps), None);
    }

    #[test]
    fn test_term_table() {
        let mut ctx = EmitContext::new(Vec::new());
        let iri = NodeKind::Iri;
        let literal = NodeKind::Literal;
        let xsd = Some("http://www.w3.org/2001/XMLSchema#string");
        let class = Some("http://example.org/Person");

        assert_eq!(ctx.term(class, Some(&iri)), "IRI AND @ex:PersonShape");
        assert_eq!(ctx.term(None, Some(&iri)), "IRI");
        assert_eq!(ctx.term(xsd, Some(&iri)), "IRI");
        assert_eq!(ctx.term(xsd, Some(&literal)), "xsd:string");
        assert_eq!(ctx.term(None, Some(&literal)), "Literal");
        assert_eq!(ctx.term(class, Some(&literal)), "Literal");
        assert_eq!(ctx.term(None, Some(&NodeKind::BNode)), "BNode");
        assert_eq!(ctx.term(class, Some(&NodeKind::NonLiteral)), "NonLiteral");
        assert_eq!(ctx.term(class, None), "IRI AND @ex:PersonShape");
        assert_eq!(ctx.term(xsd, None), "xsd:string");
        assert_eq!(ctx.term(None, None), ".");
        assert_eq!(ctx.term(class, Some(&NodeKind::Legacy)), "IRI AND @ex:PersonShape");
        assert_eq!(ctx.helpers.len(), 1);
    }

    #[test]
    fn test_duplicate_target_classes_get_distinct_labels() {
        let a = NodeShape::new("http://shaclshapes.org/A1", "http://example.org/Person", 1);
        let b = NodeShape::new("http://shaclshapes.org/A2", "http://example.org/Person", 1);
        assert_eq!(
            assign_labels(&[&a, &b]),
            vec!["ex:PersonShape".to_string(), "ex:Person2Shape".to_string()]
        );
    }

    #[test]
    fn test_duplicate_labels_keep_inner_shape_words() {
        let a = NodeShape::new("http://shaclshapes.org/S1", "http://example.org/ShapeShape", 1);
        let b = NodeShape::new("http://shaclshapes.org/S2", "http://example.org/ShapeShape", 1);
        assert_eq!(
            assign_labels(&[&a, &b]),
            vec!["ex:ShapeShape".to_string(), "ex:Shape2Shape".to_string()]
        );
    }
}
