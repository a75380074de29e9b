//! SHACL emitter
//!
//! Builds an RDF graph for the shape model and serializes it as pretty
//! Turtle. Node shapes are emitted in IRI order so the output does not depend
//! on the order the extractor produced them in.

use shapewright_core::model::{NodeKind, NodeShape, OrListItem, PropertyShape};
use shapewright_core::vocabulary::{self, qse, shacl};
use shapewright_core::validate;
use sophia::api::graph::MutableGraph;
use sophia::api::prefix::Prefix;
use sophia::api::serializer::{Stringifier, TripleSerializer};
use sophia::api::term::{BnodeId, IriRef, SimpleTerm};
use sophia::inmem::graph::LightGraph;
use sophia::iri::Iri;
use sophia::turtle::serializer::turtle::{TurtleConfig, TurtleSerializer};
use tracing::{debug, info};

use crate::{Result, ShaclError};

/// Prefixes declared in every SHACL document, in declaration order
pub const PREFIXES: [(&str, &str); 4] = [
    ("sh", vocabulary::SH),
    ("qse", vocabulary::QSE),
    ("rdf", vocabulary::RDF),
    ("xsd", vocabulary::XSD),
];

type Term = SimpleTerm<'static>;

/// SHACL emitter options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShaclOptions {
    /// Attach `qse:support` / `qse:confidence` to the emitted shapes
    pub annotate_statistics: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ShaclEmitter {
    options: ShaclOptions,
}

impl ShaclEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ShaclOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ShaclOptions {
        &self.options
    }

    pub fn can_format(&self, node_shapes: &[NodeShape]) -> bool {
        validate::can_format(node_shapes)
    }

    /// Builds the SHACL graph for `node_shapes`
    pub fn build_graph(&self, node_shapes: &[NodeShape]) -> Result<LightGraph> {
        let mut builder = GraphBuilder::new(self.options);

        let mut ordered: Vec<&NodeShape> = node_shapes.iter().collect();
        ordered.sort_by(|a, b| a.iri.cmp(&b.iri));

        for node_shape in ordered {
            builder.add_node_shape(node_shape)?;
        }

        Ok(builder.graph)
    }

    /// Serializes `node_shapes` as Turtle
    pub fn format_shapes(&self, node_shapes: &[NodeShape]) -> Result<String> {
        let graph = self.build_graph(node_shapes)?;

        let config = TurtleConfig::new()
            .with_pretty(true)
            .with_own_prefix_map(prefix_map());
        let mut stringifier = TurtleSerializer::new_stringifier_with_config(config);
        stringifier
            .serialize_graph(&graph)
            .map_err(|e| ShaclError::Serialization(e.to_string()))?;

        let turtle = stringifier.as_str().to_string();
        info!(
            node_shapes = node_shapes.len(),
            bytes = turtle.len(),
            "formatted shapes as SHACL"
        );
        Ok(turtle)
    }
}

fn prefix_map() -> Vec<(Prefix<Box<str>>, Iri<Box<str>>)> {
    PREFIXES
        .iter()
        .map(|(prefix, ns)| {
            (
                Prefix::new_unchecked(Box::from(*prefix)),
                Iri::new_unchecked(Box::from(*ns)),
            )
        })
        .collect()
}

/// Maps a node kind onto `sh:IRI` / `sh:Literal`, correcting the legacy
/// `NodeKind` token on the way. Other kinds have no SHACL counterpart here.
pub fn node_kind_iri(kind: Option<&NodeKind>) -> Option<&'static str> {
    let kind = kind?;
    if kind.is_legacy() {
        debug!("correcting legacy node kind token to IRI");
    }
    match kind.corrected() {
        NodeKind::Iri => Some(shacl::IRI),
        NodeKind::Literal => Some(shacl::LITERAL),
        _ => None,
    }
}

fn is_iri_kind(kind: Option<&NodeKind>) -> bool {
    matches!(kind.map(NodeKind::corrected), Some(NodeKind::Iri))
}

struct GraphBuilder {
    graph: LightGraph,
    options: ShaclOptions,
    next_bnode: usize,
}

impl GraphBuilder {
    fn new(options: ShaclOptions) -> Self {
        Self {
            graph: LightGraph::new(),
            options,
            next_bnode: 0,
        }
    }

    fn add(&mut self, s: Term, p: &str, o: Term) -> Result<()> {
        self.graph
            .insert(s, iri_term(p)?, o)
            .map_err(|e| ShaclError::Graph(e.to_string()))?;
        Ok(())
    }

    fn bnode(&mut self) -> Term {
        self.next_bnode += 1;
        SimpleTerm::BlankNode(BnodeId::new_unchecked(format!("b{}", self.next_bnode).into()))
    }

    fn add_node_shape(&mut self, node_shape: &NodeShape) -> Result<()> {
        let Some(ns) = resource(&node_shape.iri, "node shape") else {
            return Ok(());
        };

        self.add(ns.clone(), vocabulary::RDF_TYPE, iri_term(shacl::NODE_SHAPE)?)?;
        if let Some(target_class) = resource(&node_shape.target_class, "target class") {
            self.add(ns.clone(), shacl::TARGET_CLASS, target_class)?;
        }
        if self.options.annotate_statistics {
            self.add(
                ns.clone(),
                qse::SUPPORT,
                typed_literal(node_shape.support.to_string(), vocabulary::XSD_INT)?,
            )?;
        }

        for property in &node_shape.property_shapes {
            self.add_property_shape(&ns, property)?;
        }
        Ok(())
    }

    fn add_property_shape(&mut self, ns: &Term, property: &PropertyShape) -> Result<()> {
        let Some(ps) = resource(&property.iri, "property shape") else {
            return Ok(());
        };

        self.add(ns.clone(), shacl::PROPERTY, ps.clone())?;
        self.add(ps.clone(), vocabulary::RDF_TYPE, iri_term(shacl::PROPERTY_SHAPE)?)?;
        self.add_path(&ps, &property.path)?;

        if property.has_or_list {
            let constraints: Vec<Constraint> = property
                .defined_or_items()
                .filter_map(Constraint::from_item)
                .collect();
            match constraints.as_slice() {
                [] => {}
                [single] => self.add_constraint(&ps, single)?,
                many => self.add_or_list(&ps, many)?,
            }
        } else {
            if let Some(ty) = property.defined_type().and_then(|ty| resource(ty, "constraint")) {
                let predicate = if is_iri_kind(property.node_kind.as_ref()) {
                    shacl::CLASS
                } else {
                    shacl::DATATYPE
                };
                self.add(ps.clone(), predicate, ty)?;
            }
            self.add_node_kind(&ps, property.node_kind.as_ref())?;
        }

        if self.options.annotate_statistics {
            if let Some(support) = property.support {
                self.add(
                    ps.clone(),
                    qse::SUPPORT,
                    typed_literal(support.to_string(), vocabulary::XSD_INT)?,
                )?;
            }
            if let Some(confidence) = property.confidence {
                self.add(
                    ps,
                    qse::CONFIDENCE,
                    typed_literal(format!("{:E}", confidence), vocabulary::XSD_DOUBLE)?,
                )?;
            }
        }
        Ok(())
    }

    fn add_path(&mut self, ps: &Term, path: &str) -> Result<()> {
        let path = path.trim();
        match path.strip_prefix('^') {
            Some(inverse) => {
                let Some(predicate) = resource(inverse, "inverse path") else {
                    return Ok(());
                };
                let node = self.bnode();
                self.add(node.clone(), shacl::INVERSE_PATH, predicate)?;
                self.add(ps.clone(), shacl::PATH, node)
            }
            None => match resource(path, "path") {
                Some(predicate) => self.add(ps.clone(), shacl::PATH, predicate),
                None => Ok(()),
            },
        }
    }

    fn add_node_kind(&mut self, subject: &Term, kind: Option<&NodeKind>) -> Result<()> {
        match node_kind_iri(kind) {
            Some(kind) => self.add(subject.clone(), shacl::NODE_KIND, iri_term(kind)?),
            None => Ok(()),
        }
    }

    /// A lone OR-list alternative constrains the property directly
    fn add_constraint(&mut self, ps: &Term, constraint: &Constraint) -> Result<()> {
        let predicate = if constraint.is_class { shacl::CLASS } else { shacl::DATATYPE };
        self.add(ps.clone(), predicate, constraint.target.clone())?;
        self.add_node_kind(ps, constraint.node_kind.as_ref())
    }

    /// `sh:or ( [ sh:nodeKind ...; sh:class|sh:datatype ... ] ... )`
    fn add_or_list(&mut self, ps: &Term, constraints: &[Constraint]) -> Result<()> {
        let mut nodes = Vec::with_capacity(constraints.len());
        for constraint in constraints {
            let node = self.bnode();
            if constraint.is_class {
                self.add(node.clone(), shacl::NODE_KIND, iri_term(shacl::IRI)?)?;
                self.add(node.clone(), shacl::CLASS, constraint.target.clone())?;
            } else {
                self.add(node.clone(), shacl::NODE_KIND, iri_term(shacl::LITERAL)?)?;
                self.add(node.clone(), shacl::DATATYPE, constraint.target.clone())?;
            }
            nodes.push(node);
        }

        let mut cells = Vec::with_capacity(nodes.len());
        for _ in 0..nodes.len() {
            cells.push(self.bnode());
        }
        for (index, node) in nodes.into_iter().enumerate() {
            let rest = match cells.get(index + 1) {
                Some(next) => next.clone(),
                None => iri_term(vocabulary::RDF_NIL)?,
            };
            self.add(cells[index].clone(), vocabulary::RDF_FIRST, node)?;
            self.add(cells[index].clone(), vocabulary::RDF_REST, rest)?;
        }

        match cells.first() {
            Some(head) => self.add(ps.clone(), shacl::OR, head.clone()),
            None => Ok(()),
        }
    }
}

/// One usable OR-list alternative
struct Constraint {
    is_class: bool,
    node_kind: Option<NodeKind>,
    target: Term,
}

impl Constraint {
    fn from_item(item: &OrListItem) -> Option<Self> {
        let target = resource(item.defined_type()?, "or-list constraint")?;
        Some(Self {
            is_class: is_iri_kind(item.node_kind.as_ref()),
            node_kind: item.node_kind.clone(),
            target,
        })
    }
}

/// Resolves a model value (full IRI or known-prefix CURIE) to an IRI term.
/// Values that are not absolute IRIs yield `None` and are left out of the
/// graph.
fn resource(value: &str, role: &str) -> Option<Term> {
    let expanded = vocabulary::expand_curie(value);
    if expanded.is_empty() {
        debug!(role, "skipping empty value");
        return None;
    }
    if Iri::new(&*expanded).is_err() {
        debug!(role, value = %value, "skipping value that is not an IRI");
        return None;
    }
    Some(SimpleTerm::Iri(IriRef::new_unchecked(expanded.into_owned().into())))
}

fn iri_term(value: &str) -> Result<Term> {
    let iri = IriRef::new(value.trim().to_string().into())
        .map_err(|_| ShaclError::InvalidIri(value.to_string()))?;
    Ok(SimpleTerm::Iri(iri))
}

fn typed_literal(lexical: String, datatype: &str) -> Result<Term> {
    let datatype = IriRef::new(datatype.to_string().into())
        .map_err(|_| ShaclError::InvalidIri(datatype.to_string()))?;
    Ok(SimpleTerm::LiteralDatatype(lexical.into(), datatype))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sophia::api::graph::Graph;
    use sophia::api::term::matcher::Any;

    fn triple_count(graph: &LightGraph) -> usize {
        graph.triples().count()
    }

    fn has_triple(graph: &LightGraph, p: &str, o: &str) -> bool {
        let p = iri_term(p).unwrap();
        let o = iri_term(o).unwrap();
        graph.triples_matching(Any, [p], [o]).next().is_some()
    }

    #[test]
    fn test_node_kind_mapping() {
        assert_eq!(node_kind_iri(Some(&NodeKind::Iri)), Some(shacl::IRI));
        assert_eq!(node_kind_iri(Some(&NodeKind::Legacy)), Some(shacl::IRI));
        assert_eq!(node_kind_iri(Some(&NodeKind::Literal)), Some(shacl::LITERAL));
        assert_eq!(node_kind_iri(Some(&NodeKind::BNode)), None);
        assert_eq!(node_kind_iri(None), None);
    }

    #[test]
    fn test_empty_model_builds_empty_graph() {
        let graph = ShaclEmitter::new().build_graph(&[]).unwrap();
        assert_eq!(triple_count(&graph), 0);
    }

    #[test]
    fn test_node_shape_triples() {
        let ns = NodeShape::new("http://shaclshapes.org/PersonShape", "http://example.org/Person", 3);
        let graph = ShaclEmitter::new().build_graph(&[ns]).unwrap();
        assert_eq!(triple_count(&graph), 2);
        assert!(has_triple(&graph, vocabulary::RDF_TYPE, shacl::NODE_SHAPE));
        assert!(has_triple(&graph, shacl::TARGET_CLASS, "http://example.org/Person"));
    }

    #[test]
    fn test_single_or_item_applied_directly() {
        let ps = PropertyShape::new("http://shaclshapes.org/knowsProperty", "http://example.org/knows")
            .with_or_items(vec![
                OrListItem::new("http://example.org/Person", "IRI"),
                OrListItem::new("Undefined", "IRI"),
            ]);
        let ns = NodeShape::new("http://shaclshapes.org/PersonShape", "http://example.org/Person", 3)
            .with_property(ps);
        let graph = ShaclEmitter::new().build_graph(&[ns]).unwrap();

        assert!(has_triple(&graph, shacl::CLASS, "http://example.org/Person"));
        assert!(has_triple(&graph, shacl::NODE_KIND, shacl::IRI));
        let or = iri_term(shacl::OR).unwrap();
        assert!(graph.triples_matching(Any, [or], Any).next().is_none());
    }

    #[test]
    fn test_or_list_is_well_formed() {
        let ps = PropertyShape::new("http://shaclshapes.org/valueProperty", "http://example.org/value")
            .with_or_items(vec![
                OrListItem::new("http://www.w3.org/2001/XMLSchema#string", "Literal"),
                OrListItem::new("http://example.org/Thing", "NodeKind"),
            ]);
        let ns = NodeShape::new("http://shaclshapes.org/ThingShape", "http://example.org/Thing", 3)
            .with_property(ps);
        let graph = ShaclEmitter::new().build_graph(&[ns]).unwrap();

        let first = iri_term(vocabulary::RDF_FIRST).unwrap();
        let rest = iri_term(vocabulary::RDF_REST).unwrap();
        assert_eq!(graph.triples_matching(Any, [first], Any).count(), 2);
        assert_eq!(graph.triples_matching(Any, [rest], Any).count(), 2);
        assert!(has_triple(&graph, vocabulary::RDF_REST, vocabulary::RDF_NIL));
        assert!(has_triple(&graph, shacl::CLASS, "http://example.org/Thing"));
        assert!(has_triple(&graph, shacl::DATATYPE, "http://www.w3.org/2001/XMLSchema#string"));
    }

    #[test]
    fn test_inverse_path_uses_blank_node() {
        let ps = PropertyShape::new("http://shaclshapes.org/knowsProperty", "^http://example.org/knows");
        let ns = NodeShape::new("http://shaclshapes.org/PersonShape", "http://example.org/Person", 3)
            .with_property(ps);
        let graph = ShaclEmitter::new().build_graph(&[ns]).unwrap();
        assert!(has_triple(&graph, shacl::INVERSE_PATH, "http://example.org/knows"));
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let mut ns = NodeShape::new("", "http://example.org/Person", 3);
        ns.property_shapes.push(PropertyShape::new("http://shaclshapes.org/p", "http://example.org/p"));
        let graph = ShaclEmitter::new().build_graph(&[ns]).unwrap();
        assert_eq!(triple_count(&graph), 0);
    }

    #[test]
    fn test_known_prefix_curies_are_expanded() {
        let ps = PropertyShape::new("http://shaclshapes.org/nameProperty", "ub:name")
            .with_node_kind("Literal")
            .with_type("xsd:string");
        let ns = NodeShape::new("qse:PersonShape", "qse:Person", 3).with_property(ps);
        let graph = ShaclEmitter::new().build_graph(&[ns]).unwrap();

        assert!(has_triple(&graph, shacl::TARGET_CLASS, "http://shaclshapes.org/Person"));
        assert!(has_triple(&graph, shacl::PATH, "http://swat.cse.lehigh.edu/onto/univ-bench.owl#name"));
        assert!(has_triple(&graph, shacl::DATATYPE, "http://www.w3.org/2001/XMLSchema#string"));
    }

    #[test]
    fn test_values_that_are_not_iris_are_left_out() {
        let ps = PropertyShape::new("http://shaclshapes.org/kindProperty", "http://example.org/kind")
            .with_node_kind("IRI")
            .with_or_items(vec![
                OrListItem::new("qse:A", "IRI"),
                OrListItem::new("not a class", "IRI"),
            ]);
        let ns = NodeShape::new("http://shaclshapes.org/ThingShape", "Some Class", 3).with_property(ps);
        let graph = ShaclEmitter::new().build_graph(&[ns]).unwrap();

        let target_class = iri_term(shacl::TARGET_CLASS).unwrap();
        assert!(graph.triples_matching(Any, [target_class], Any).next().is_none());
        assert!(has_triple(&graph, shacl::CLASS, "http://shaclshapes.org/A"));
        let or = iri_term(shacl::OR).unwrap();
        assert!(graph.triples_matching(Any, [or], Any).next().is_none());
    }
}
