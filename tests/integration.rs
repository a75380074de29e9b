// Integration tests for shapewright components
// These tests run a university-benchmark style snapshot through the whole
// pipeline: snapshot → filter → registry → emitters → post-processing

#[cfg(test)]
mod tests {
    use shapewright::prelude::*;
    use shapewright_core::snapshot;
    use shapewright_shex::PREFIX_BLOCK;
    use tempfile::TempDir;

    const SNAPSHOT: &str = r#"{
      "nodes": [
        {
          "iri": "http://shaclshapes.org/GraduateStudentShape",
          "targetClass": "http://swat.cse.lehigh.edu/onto/univ-bench.owl#GraduateStudent",
          "support": 1874,
          "propertyShapes": [
            {
              "iri": "http://shaclshapes.org/nameGraduateStudentShapeProperty",
              "path": "http://swat.cse.lehigh.edu/onto/univ-bench.owl#name",
              "nodeKind": "Literal",
              "dataTypeOrClass": "http://www.w3.org/2001/XMLSchema#string",
              "support": 1874,
              "confidence": 1.0
            },
            {
              "iri": "http://shaclshapes.org/advisorGraduateStudentShapeProperty",
              "path": "http://swat.cse.lehigh.edu/onto/univ-bench.owl#advisor",
              "nodeKind": "IRI",
              "dataTypeOrClass": "Undefined",
              "support": 1500,
              "confidence": 0.8,
              "hasOrList": true,
              "orItems": [
                {"dataTypeOrClass": "http://swat.cse.lehigh.edu/onto/univ-bench.owl#FullProfessor", "nodeKind": "IRI", "support": 600, "confidence": 0.32},
                {"dataTypeOrClass": "http://swat.cse.lehigh.edu/onto/univ-bench.owl#AssociateProfessor", "nodeKind": "NodeKind", "support": 500, "confidence": 0.27}
              ]
            },
            {
              "iri": "http://shaclshapes.org/typeGraduateStudentShapeProperty",
              "path": "http://www.w3.org/1999/02/22-rdf-syntax-ns#type",
              "nodeKind": "IRI",
              "support": 1874,
              "confidence": 1.0,
              "hasOrList": true,
              "orItems": [
                {"dataTypeOrClass": "http://swat.cse.lehigh.edu/onto/univ-bench.owl#GraduateStudent", "nodeKind": "IRI"}
              ]
            },
            {
              "iri": "http://shaclshapes.org/emailAddressGraduateStudentShapeProperty",
              "path": "http://swat.cse.lehigh.edu/onto/univ-bench.owl#emailAddress",
              "nodeKind": "Literal",
              "dataTypeOrClass": "http://www.w3.org/2001/XMLSchema#string",
              "support": 3,
              "confidence": 0.001
            }
          ]
        },
        {
          "iri": "http://shaclshapes.org/ResearchShape",
          "targetClass": "http://swat.cse.lehigh.edu/onto/univ-bench.owl#Research",
          "support": 2,
          "pruneFlag": true,
          "propertyShapes": [
            {
              "iri": "http://shaclshapes.org/nameResearchShapeProperty",
              "path": "http://swat.cse.lehigh.edu/onto/univ-bench.owl#name",
              "nodeKind": "Literal",
              "dataTypeOrClass": "http://www.w3.org/2001/XMLSchema#string",
              "support": 2,
              "confidence": 1.0
            }
          ]
        }
      ]
    }"#;

    fn model() -> Vec<NodeShape> {
        snapshot::from_json_str(SNAPSHOT).unwrap()
    }

    #[test]
    fn test_end_to_end_shex() {
        let registry = FormatterRegistry::new();
        let shex = registry.format_shapes(&model(), "ShEx").unwrap();

        let expected = format!(
            "{}\n{}{}{}{}",
            PREFIX_BLOCK,
            "ex:GraduateStudentShape {\n  rdf:type [ub:GraduateStudent] + ;\n  \
             ub:advisor ( IRI AND @ub:AssociateProfessorShape OR IRI AND @ub:FullProfessorShape ) * ;\n  \
             ub:emailAddress xsd:string * ;\n  ub:name xsd:string *\n}\n\n",
            "ex:ResearchShape {\n  rdf:type [ub:Research] + ;\n  ub:name xsd:string *\n}\n\n",
            "ub:AssociateProfessorShape { rdf:type [ub:AssociateProfessor] + }\n\n",
            "ub:FullProfessorShape { rdf:type [ub:FullProfessor] + }\n\n",
        );
        assert_eq!(shex, expected);
    }

    #[test]
    fn test_end_to_end_reliable_shex() {
        let t = Thresholds::new(100, 0.5).unwrap();
        let reliable = filter(&model(), &t);
        assert_eq!(reliable.len(), 1);
        assert_eq!(filter(&reliable, &t), reliable);

        let shex = FormatterRegistry::new().format_shapes(&reliable, "shex").unwrap();
        assert!(!shex.contains("ub:emailAddress"));
        assert!(!shex.contains("ex:ResearchShape"));
        assert!(shex.contains("  ub:name xsd:string *\n}"));
    }

    #[test]
    fn test_end_to_end_shacl() {
        let exporter = ShapeExporter::default();
        let artifact = exporter.export(&model(), "shacl", None).unwrap();
        assert_eq!(artifact.file_name, "shapes.ttl");

        let turtle = &artifact.content;
        assert!(turtle.contains("sh: <http://www.w3.org/ns/shacl#>"));
        assert!(turtle.contains("sh:or"));
        assert!(turtle.contains("sh:class"));
        assert!(turtle.contains("sh:datatype"));
        assert!(turtle.contains("GraduateStudentShape"));
        assert!(!turtle.contains("NodeKind"));
    }

    #[test]
    fn test_snapshot_file_round_trip_formats_identically() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(snapshot::DEFAULT_SNAPSHOT_PATH);
        snapshot::save(&model(), &path).unwrap();
        let reloaded = snapshot::load(&path).unwrap();

        let registry = FormatterRegistry::new();
        for format in ShapeFormat::ALL {
            assert_eq!(
                registry.format_shapes(&model(), format.name()).unwrap(),
                registry.format_shapes(&reloaded, format.name()).unwrap()
            );
        }
    }

    #[test]
    fn test_malformed_model_still_formats() {
        let mut shapes = model();
        shapes[0].target_class.clear();
        assert!(!can_format(&shapes));

        let registry = FormatterRegistry::new();
        for format in ShapeFormat::ALL {
            assert!(registry.format_shapes(&shapes, format.name()).is_ok());
        }
    }

    #[test]
    fn test_null_snapshot_is_rejected_before_formatting() {
        let err = snapshot::from_json_str(r#"{"nodes": null}"#).unwrap_err();
        let err: ShapeError = err.into();
        assert!(matches!(err, ShapeError::Core(_)));
        assert!(err.to_string().contains("cannot be null"));
    }
}
