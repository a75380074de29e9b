//! Structural checks run before formatting

use crate::model::NodeShape;

/// Returns true when every node shape has an IRI and a target class and every
/// property shape has an IRI and a path. An empty model is formattable.
pub fn can_format(node_shapes: &[NodeShape]) -> bool {
    node_shapes.iter().all(|ns| {
        !is_blank(&ns.iri)
            && !is_blank(&ns.target_class)
            && ns
                .property_shapes
                .iter()
                .all(|ps| !is_blank(&ps.iri) && !is_blank(&ps.path))
    })
}

/// Lists every structural defect found in the model
pub fn find_defects(node_shapes: &[NodeShape]) -> Vec<String> {
    let mut defects = Vec::new();

    for (index, ns) in node_shapes.iter().enumerate() {
        let label = if is_blank(&ns.iri) {
            format!("node shape #{}", index)
        } else {
            ns.iri.clone()
        };

        if is_blank(&ns.iri) {
            defects.push(format!("{}: missing iri", label));
        }
        if is_blank(&ns.target_class) {
            defects.push(format!("{}: missing target class", label));
        }
        for (ps_index, ps) in ns.property_shapes.iter().enumerate() {
            if is_blank(&ps.iri) {
                defects.push(format!("{}: property shape #{} missing iri", label, ps_index));
            }
            if is_blank(&ps.path) {
                defects.push(format!("{}: property shape #{} missing path", label, ps_index));
            }
        }
    }

    defects
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
