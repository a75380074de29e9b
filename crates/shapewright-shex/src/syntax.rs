//! ShExC building blocks

use itertools::Itertools;

use crate::curie::{is_known_curie, to_curie};

/// Five `PREFIX` lines every document starts with
pub const PREFIX_BLOCK: &str = "PREFIX ex: <http://example.org/shapes/>\n\
PREFIX qse: <http://shaclshapes.org/>\n\
PREFIX ub: <http://swat.cse.lehigh.edu/onto/univ-bench.owl#>\n\
PREFIX xsd: <http://www.w3.org/2001/XMLSchema#>\n\
PREFIX rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#>\n";

/// Wildcard node constraint
pub const ANY: &str = ".";

/// `[v1 v2 ...]`
pub fn value_set<I, S>(values: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    format!(
        "[{}]",
        values.into_iter().map(|v| value_term(v.as_ref())).join(" ")
    )
}

/// A value-set member: known CURIEs as is, IRIs compacted, anything else as
/// a string literal.
pub fn value_term(value: &str) -> String {
    let value = value.trim();
    if is_known_curie(value) {
        value.to_string()
    } else if value.contains("://") {
        to_curie(value)
    } else {
        quote_literal(value)
    }
}

pub fn quote_literal(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// `( t1 OR t2 ... )` over the sorted, deduplicated terms. A single term is
/// returned bare, no terms at all yield the wildcard.
pub fn disjunction<I>(terms: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let terms: Vec<String> = terms.into_iter().sorted().dedup().collect();
    match terms.len() {
        0 => ANY.to_string(),
        1 => terms.into_iter().next().unwrap_or_else(|| ANY.to_string()),
        _ => format!("( {} )", terms.join(" OR ")),
    }
}
