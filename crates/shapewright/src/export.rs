//! Export pipeline: filter → format → post-process → artifact

use shapewright_core::{filter, NodeShape, Thresholds};
use shapewright_shacl::TurtlePostProcessor;
use tracing::info;

use crate::config::ExportConfig;
use crate::registry::{FormatterRegistry, ShapeFormat};
use crate::{Result, ShapeError};

/// A formatted shape document ready to be written or served
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Canonical format name (`SHACL`, `ShEx`, ...)
    pub format: String,
    pub file_name: String,
    pub content: String,
}

impl ExportArtifact {
    pub fn as_bytes(&self) -> &[u8] {
        self.content.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

pub struct ShapeExporter {
    registry: FormatterRegistry,
    post_processor: TurtlePostProcessor,
    default_format: String,
}

impl Default for ShapeExporter {
    fn default() -> Self {
        Self::new(&ExportConfig::default())
    }
}

impl ShapeExporter {
    pub fn new(config: &ExportConfig) -> Self {
        Self {
            registry: FormatterRegistry::with_shacl_options(config.shacl_options()),
            post_processor: TurtlePostProcessor::new(config.post_processing.enabled),
            default_format: config.format.default.clone(),
        }
    }

    pub fn registry(&self) -> &FormatterRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut FormatterRegistry {
        &mut self.registry
    }

    /// Formats `node_shapes`; Turtle output goes through the post-processor
    pub fn format_shapes(&self, node_shapes: &[NodeShape], format_name: &str) -> Result<String> {
        let emitter = self.registry.get(format_name)?;
        let text = emitter.format_shapes(node_shapes)?;

        match format_name.parse::<ShapeFormat>() {
            Ok(ShapeFormat::Shacl) => Ok(self.post_processor.process(&text)),
            Ok(ShapeFormat::ShEx) | Err(_) => Ok(text),
        }
    }

    pub fn format_with_default(&self, node_shapes: &[NodeShape]) -> Result<String> {
        self.format_shapes(node_shapes, &self.default_format)
    }

    /// Builds a downloadable artifact. With `thresholds` only the reliable
    /// shapes are exported and an empty result is an error.
    pub fn export(
        &self,
        node_shapes: &[NodeShape],
        format_name: &str,
        thresholds: Option<&Thresholds>,
    ) -> Result<ExportArtifact> {
        let emitter = self.registry.get(format_name)?;
        let format = emitter.format_name().to_string();
        let extension = emitter.file_extension().to_string();

        let (content, stem) = match thresholds {
            Some(t) => {
                let reliable = filter(node_shapes, t);
                if reliable.is_empty() {
                    return Err(ShapeError::InvalidArgument(format!(
                        "no shapes meet the thresholds (support >= {}, confidence >= {})",
                        t.support, t.confidence
                    )));
                }
                (self.format_shapes(&reliable, format_name)?, "reliable_shapes")
            }
            None => (self.format_shapes(node_shapes, format_name)?, "shapes"),
        };

        let artifact = ExportArtifact {
            format,
            file_name: format!("{}.{}", stem, extension),
            content,
        };
        info!(
            format = %artifact.format,
            file_name = %artifact.file_name,
            bytes = artifact.len(),
            "exported shapes"
        );
        Ok(artifact)
    }
}
