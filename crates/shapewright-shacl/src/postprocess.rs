//! Turtle post-processing
//!
//! Repairs lexical defects some extractor/serializer combinations leave in
//! SHACL output: the legacy `NodeKind` spelling and confidence values written
//! with a locale decimal comma or without a decimal point.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `qse:confidence 1,2E-1 ;`
    static ref COMMA_CONFIDENCE: Regex = Regex::new(
        r"((?:qse:confidence|<http://shaclshapes\.org/confidence>)\s+)([0-9]+),([0-9]+(?:E[+-]?[0-9]+)?)\s*;"
    )
    .unwrap();

    /// `qse:confidence 1E0 ;`
    static ref BARE_EXPONENT_CONFIDENCE: Regex = Regex::new(
        r"((?:qse:confidence|<http://shaclshapes\.org/confidence>)\s+)([0-9]+)(E[+-]?[0-9]+)\s*;"
    )
    .unwrap();
}

/// Applies the Turtle repair rules when enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurtlePostProcessor {
    enabled: bool,
}

impl Default for TurtlePostProcessor {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl TurtlePostProcessor {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Runs every rule in order. Disabled processors and blank input return
    /// the content unchanged.
    pub fn process(&self, content: &str) -> String {
        if !self.enabled || content.trim().is_empty() {
            return content.to_string();
        }
        let content = fix_node_kind(content);
        let content = fix_comma_decimals(&content);
        fix_bare_exponents(&content)
    }
}

/// `NodeKind` → `nodeKind`
pub fn fix_node_kind(content: &str) -> String {
    content.replace("NodeKind", "nodeKind")
}

/// `qse:confidence 1,2E-1 ;` → `qse:confidence "1.2E-1"^^xsd:double ;`
pub fn fix_comma_decimals(content: &str) -> String {
    COMMA_CONFIDENCE
        .replace_all(content, r#"${1}"${2}.${3}"^^xsd:double ;"#)
        .into_owned()
}

/// `qse:confidence 1E0 ;` → `qse:confidence "1.0E0"^^xsd:double ;`
pub fn fix_bare_exponents(content: &str) -> String {
    BARE_EXPONENT_CONFIDENCE
        .replace_all(content, r#"${1}"${2}.0${3}"^^xsd:double ;"#)
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comma_decimal_with_exponent() {
        let processor = TurtlePostProcessor::default();
        assert_eq!(
            processor.process("qse:confidence 1,2E-1 ;"),
            r#"qse:confidence "1.2E-1"^^xsd:double ;"#
        );
    }

    #[test]
    fn test_comma_decimal_without_exponent() {
        assert_eq!(
            fix_comma_decimals("qse:confidence 0,75 ;"),
            r#"qse:confidence "0.75"^^xsd:double ;"#
        );
    }

    #[test]
    fn test_bare_exponent() {
        let processor = TurtlePostProcessor::default();
        assert_eq!(
            processor.process("qse:confidence 1E0 ;"),
            r#"qse:confidence "1.0E0"^^xsd:double ;"#
        );
    }

    #[test]
    fn test_multiple_bare_exponents() {
        let processor = TurtlePostProcessor::default();
        let out = processor.process("qse:confidence 2E-1 ;\nqse:confidence 5E+2 ;");
        assert_eq!(
            out,
            "qse:confidence \"2.0E-1\"^^xsd:double ;\nqse:confidence \"5.0E+2\"^^xsd:double ;"
        );
    }

    #[test]
    fn test_full_iri_predicate() {
        assert_eq!(
            fix_bare_exponents("<http://shaclshapes.org/confidence> 3E-2 ;"),
            r#"<http://shaclshapes.org/confidence> "3.0E-2"^^xsd:double ;"#
        );
    }

    #[test]
    fn test_node_kind_spelling() {
        let processor = TurtlePostProcessor::default();
        assert_eq!(processor.process("sh:NodeKind sh:IRI ;"), "sh:nodeKind sh:IRI ;");
    }

    #[test]
    fn test_untouched_content() {
        let processor = TurtlePostProcessor::default();
        let ttl = "qse:PersonShape a sh:NodeShape ;\n  sh:targetClass <http://example.org/Person> .\n";
        assert_eq!(processor.process(ttl), ttl);
        assert_eq!(processor.process("qse:support 12 ;"), "qse:support 12 ;");
    }

    #[test]
    fn test_already_typed_value_untouched() {
        let ttl = r#"qse:confidence "1.0E0"^^xsd:double ;"#;
        assert_eq!(TurtlePostProcessor::default().process(ttl), ttl);
    }

    #[test]
    fn test_blank_and_disabled() {
        let processor = TurtlePostProcessor::default();
        assert_eq!(processor.process(""), "");
        assert_eq!(processor.process("  \n"), "  \n");

        let disabled = TurtlePostProcessor::new(false);
        assert!(!disabled.is_enabled());
        assert_eq!(disabled.process("qse:confidence 1E0 ;"), "qse:confidence 1E0 ;");
    }
}
