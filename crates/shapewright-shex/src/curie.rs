//! IRI → CURIE compaction and shape labels

use shapewright_core::vocabulary::{EX, QSE, RDF, UB, XSD};

/// Prefixes the ShExC output declares, in declaration order
pub const KNOWN_PREFIXES: [(&str, &str); 5] = [
    ("ex", EX),
    ("qse", QSE),
    ("ub", UB),
    ("xsd", XSD),
    ("rdf", RDF),
];

/// Compacts an IRI (or inverse path `^iri`) into a CURIE over the known
/// prefixes. Unknown namespaces fall back to `ex:` plus the local name; an IRI
/// without any usable local name is written in angle brackets. `ex:type` is
/// read as `rdf:type`.
pub fn to_curie(value: &str) -> String {
    let value = value.trim();
    if let Some(inner) = value.strip_prefix('^') {
        return format!("^{}", to_curie(inner));
    }

    let curie = compact(value);
    if curie == "ex:type" {
        "rdf:type".to_string()
    } else {
        curie
    }
}

fn compact(value: &str) -> String {
    if is_known_curie(value) {
        return value.to_string();
    }

    for (prefix, namespace) in KNOWN_PREFIXES {
        if let Some(local) = value.strip_prefix(namespace) {
            let local = sanitize_local(local);
            return if local.is_empty() {
                format!("<{}>", value)
            } else {
                format!("{}:{}", prefix, local)
            };
        }
    }

    if value.contains(':') {
        match local_name(value).map(sanitize_local) {
            Some(local) if !local.is_empty() => format!("ex:{}", local),
            _ => format!("<{}>", value),
        }
    } else {
        format!("ex:{}", sanitize_local(value))
    }
}

/// `prefix:local` over one of the declared prefixes
pub fn is_known_curie(value: &str) -> bool {
    match value.split_once(':') {
        Some((prefix, local)) => {
            !local.starts_with("//")
                && !local.is_empty()
                && KNOWN_PREFIXES.iter().any(|(known, _)| *known == prefix)
        }
        None => false,
    }
}

/// Fragment, last path segment, or the part after the last colon
pub fn local_name(iri: &str) -> Option<&str> {
    let start = iri
        .rfind('#')
        .or_else(|| iri.rfind('/'))
        .or_else(|| iri.rfind(':'))?;
    let local = &iri[start + 1..];
    if local.is_empty() {
        None
    } else {
        Some(local)
    }
}

/// Shape label for a target class: `qse:` for extractor IRIs, `ex:`
/// otherwise, always ending in `Shape`.
pub fn shape_label(target_class: &str) -> String {
    let target_class = target_class.trim();
    let base = match target_class
        .strip_prefix(QSE)
        .or_else(|| target_class.strip_prefix("qse:"))
    {
        Some(local) => format!("qse:{}", sanitize_label(local)),
        None => {
            let local = local_name(target_class).unwrap_or(target_class);
            format!("ex:{}", sanitize_label(local))
        }
    };
    with_shape_suffix(base)
}

/// Label for the helper shape describing `class_curie`
pub fn helper_label(class_curie: &str) -> String {
    let base = match class_curie.split_once(':') {
        Some((prefix, local)) if is_known_curie(class_curie) => {
            format!("{}:{}", prefix, sanitize_label(local))
        }
        _ => {
            let iri = class_curie.trim_start_matches('<').trim_end_matches('>');
            let local = local_name(iri).unwrap_or(iri);
            format!("ex:{}", sanitize_label(local))
        }
    };
    with_shape_suffix(base)
}

/// `label` without one trailing `Shape`
pub fn shape_stem(label: &str) -> &str {
    label.strip_suffix("Shape").unwrap_or(label)
}

pub fn with_shape_suffix(label: String) -> String {
    if label.ends_with("Shape") {
        label
    } else {
        format!("{}Shape", label)
    }
}

fn sanitize_label(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Local part of a prefixed name; `-` is allowed except up front
fn sanitize_local(value: &str) -> String {
    value
        .chars()
        .enumerate()
        .map(|(i, c)| {
            if c.is_ascii_alphanumeric() || c == '_' || (c == '-' && i > 0) {
                c
            } else {
                '_'
            }
        })
        .collect()
}
