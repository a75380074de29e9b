//! Namespaces and terms shared by both serializers

use std::borrow::Cow;

/// SHACL namespace
pub const SH: &str = "http://www.w3.org/ns/shacl#";
/// Namespace used by the shape extractor for generated shapes and statistics
pub const QSE: &str = "http://shaclshapes.org/";
/// Fallback namespace for IRIs without a known prefix
pub const EX: &str = "http://example.org/shapes/";
/// LUBM university benchmark ontology
pub const UB: &str = "http://swat.cse.lehigh.edu/onto/univ-bench.owl#";
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const RDF_FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";
pub const RDF_REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";
pub const RDF_NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";

pub const XSD_INT: &str = "http://www.w3.org/2001/XMLSchema#int";
pub const XSD_DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";

/// Sentinel the extractor writes when no datatype or class could be inferred
pub const UNDEFINED: &str = "Undefined";

/// Node-kind token written by older extractor versions in place of `IRI`
pub const LEGACY_NODE_KIND: &str = "NodeKind";

pub mod shacl {
    pub const NODE_SHAPE: &str = "http://www.w3.org/ns/shacl#NodeShape";
    pub const PROPERTY_SHAPE: &str = "http://www.w3.org/ns/shacl#PropertyShape";
    pub const TARGET_CLASS: &str = "http://www.w3.org/ns/shacl#targetClass";
    pub const PROPERTY: &str = "http://www.w3.org/ns/shacl#property";
    pub const PATH: &str = "http://www.w3.org/ns/shacl#path";
    pub const INVERSE_PATH: &str = "http://www.w3.org/ns/shacl#inversePath";
    pub const CLASS: &str = "http://www.w3.org/ns/shacl#class";
    pub const DATATYPE: &str = "http://www.w3.org/ns/shacl#datatype";
    pub const NODE_KIND: &str = "http://www.w3.org/ns/shacl#nodeKind";
    pub const OR: &str = "http://www.w3.org/ns/shacl#or";
    pub const IRI: &str = "http://www.w3.org/ns/shacl#IRI";
    pub const LITERAL: &str = "http://www.w3.org/ns/shacl#Literal";
}

pub mod qse {
    pub const SUPPORT: &str = "http://shaclshapes.org/support";
    pub const CONFIDENCE: &str = "http://shaclshapes.org/confidence";
}

/// Prefixes the extractor may use in place of full IRIs
pub const KNOWN_NAMESPACES: [(&str, &str); 6] = [
    ("sh", SH),
    ("qse", QSE),
    ("ex", EX),
    ("ub", UB),
    ("xsd", XSD),
    ("rdf", RDF),
];

/// Expands a `prefix:local` CURIE over [`KNOWN_NAMESPACES`]. Anything else,
/// full IRIs included, is returned unchanged.
pub fn expand_curie(value: &str) -> Cow<'_, str> {
    let value = value.trim();
    if let Some((prefix, local)) = value.split_once(':') {
        if !local.is_empty() && !local.starts_with("//") {
            if let Some((_, namespace)) = KNOWN_NAMESPACES.iter().find(|(p, _)| *p == prefix) {
                return Cow::Owned(format!("{}{}", namespace, local));
            }
        }
    }
    Cow::Borrowed(value)
}

/// Returns true when `value` names an XML Schema datatype, either as a full
/// IRI or as an `xsd:` CURIE.
pub fn is_xsd(value: &str) -> bool {
    value.starts_with(XSD) || value.starts_with("xsd:")
}
