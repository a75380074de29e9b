use shapewright_core::snapshot::{self, ShapeSnapshot};
use shapewright_core::{CoreError, NodeKind, NodeShape, OrListItem, PropertyShape};
use tempfile::TempDir;

fn sample_model() -> Vec<NodeShape> {
    vec![NodeShape::new("http://shaclshapes.org/StudentShape", "http://swat.cse.lehigh.edu/onto/univ-bench.owl#Student", 42)
        .with_property(
            PropertyShape::new("http://shaclshapes.org/memberOfStudentShapeProperty", "http://swat.cse.lehigh.edu/onto/univ-bench.owl#memberOf")
                .with_statistics(40, 0.75)
                .with_or_items(vec![
                    OrListItem::new("http://swat.cse.lehigh.edu/onto/univ-bench.owl#Department", "IRI")
                        .with_statistics(30, 0.5),
                    OrListItem::new("Undefined", "NodeKind").with_prune_flags(true, true),
                ]),
        )
        .with_property(
            PropertyShape::new("http://shaclshapes.org/nameStudentShapeProperty", "http://swat.cse.lehigh.edu/onto/univ-bench.owl#name")
                .with_node_kind("Literal")
                .with_type("http://www.w3.org/2001/XMLSchema#string")
                .with_in_values(["Alice", "Bob"]),
        )]
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("evaluation").join("latest-node-shapes.json");

    let model = sample_model();
    snapshot::save(&model, &path).unwrap();
    assert!(snapshot::snapshot_exists(&path));

    let loaded = snapshot::load(&path).unwrap();
    assert_eq!(loaded, model);
    assert_eq!(
        loaded[0].property_shapes[0].or_list_items[1].node_kind,
        Some(NodeKind::Legacy)
    );
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = snapshot::load(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, CoreError::Io(_)));
    assert!(!snapshot::snapshot_exists(dir.path().join("missing.json")));
}

#[test]
fn test_reads_extractor_layout() {
    let json = r#"{
      "nodes": [{
        "iri": "http://shaclshapes.org/PersonShape",
        "targetClass": "http://example.org/Person",
        "support": 12,
        "propertyShapes": [{
          "iri": "http://shaclshapes.org/knowsPersonShapeProperty",
          "path": "^http://example.org/knows",
          "dataTypeOrClass": "Undefined",
          "nodeKind": null,
          "support": 4,
          "confidence": 0.33,
          "hasOrList": true,
          "orItems": [
            {"dataTypeOrClass": "http://example.org/Person", "nodeKind": "IRI", "support": 4, "confidence": 0.33}
          ]
        }]
      }]
    }"#;

    let nodes = snapshot::from_json_str(json).unwrap();
    let ps = &nodes[0].property_shapes[0];
    assert!(ps.is_inverse());
    assert_eq!(ps.defined_type(), None);
    assert_eq!(ps.node_kind, None);
    assert_eq!(ps.or_list_items.len(), 1);
    assert!(ps.or_list_items[0].is_reliable());
}

#[test]
fn test_snapshot_struct_into_nodes() {
    let snapshot = ShapeSnapshot::new(sample_model());
    assert_eq!(snapshot.into_nodes().unwrap().len(), 1);
    assert!(ShapeSnapshot::default().into_nodes().is_err());
}
