//! Output formats and the formatter registry

use serde::{Deserialize, Serialize};
use shapewright_core::NodeShape;
use shapewright_shacl::{ShaclEmitter, ShaclOptions};
use shapewright_shex::ShexEmitter;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::{Result, ShapeError};

/// Built-in output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeFormat {
    Shacl,
    ShEx,
}

impl ShapeFormat {
    pub const ALL: [ShapeFormat; 2] = [ShapeFormat::Shacl, ShapeFormat::ShEx];

    pub fn name(&self) -> &'static str {
        match self {
            ShapeFormat::Shacl => "SHACL",
            ShapeFormat::ShEx => "ShEx",
        }
    }

    pub fn file_extension(&self) -> &'static str {
        match self {
            ShapeFormat::Shacl => "ttl",
            ShapeFormat::ShEx => "shex",
        }
    }

    pub fn media_type(&self) -> &'static str {
        match self {
            ShapeFormat::Shacl => "text/turtle",
            ShapeFormat::ShEx => "text/shex",
        }
    }
}

impl Default for ShapeFormat {
    fn default() -> Self {
        ShapeFormat::Shacl
    }
}

impl fmt::Display for ShapeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeFormat {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        if name.is_empty() {
            return Err(ShapeError::InvalidArgument(
                "format name cannot be empty".to_string(),
            ));
        }
        ShapeFormat::ALL
            .into_iter()
            .find(|format| format.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| ShapeError::UnsupportedFormat {
                requested: name.to_string(),
                supported: ShapeFormat::ALL.map(|f| f.name()).join(", "),
            })
    }
}

/// A serializer for one output format
pub trait ShapeEmitter: Send + Sync {
    fn format_name(&self) -> &str;

    fn file_extension(&self) -> &str;

    /// Non-failing structural check of the model
    fn can_format(&self, node_shapes: &[NodeShape]) -> bool;

    fn format_shapes(&self, node_shapes: &[NodeShape]) -> Result<String>;
}

#[derive(Debug, Clone, Default)]
pub struct ShaclFormatter {
    emitter: ShaclEmitter,
}

impl ShaclFormatter {
    pub fn new(options: ShaclOptions) -> Self {
        Self {
            emitter: ShaclEmitter::with_options(options),
        }
    }
}

impl ShapeEmitter for ShaclFormatter {
    fn format_name(&self) -> &str {
        ShapeFormat::Shacl.name()
    }

    fn file_extension(&self) -> &str {
        ShapeFormat::Shacl.file_extension()
    }

    fn can_format(&self, node_shapes: &[NodeShape]) -> bool {
        self.emitter.can_format(node_shapes)
    }

    fn format_shapes(&self, node_shapes: &[NodeShape]) -> Result<String> {
        Ok(self.emitter.format_shapes(node_shapes)?)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ShexFormatter {
    emitter: ShexEmitter,
}

impl ShapeEmitter for ShexFormatter {
    fn format_name(&self) -> &str {
        ShapeFormat::ShEx.name()
    }

    fn file_extension(&self) -> &str {
        ShapeFormat::ShEx.file_extension()
    }

    fn can_format(&self, node_shapes: &[NodeShape]) -> bool {
        self.emitter.can_format(node_shapes)
    }

    fn format_shapes(&self, node_shapes: &[NodeShape]) -> Result<String> {
        Ok(self.emitter.format_shapes(node_shapes))
    }
}

/// Looks formatters up by case-insensitive name
pub struct FormatterRegistry {
    shacl: ShaclFormatter,
    shex: ShexFormatter,
    /// Additional emitters keyed by lowercased format name
    custom: BTreeMap<String, Box<dyn ShapeEmitter>>,
}

impl Default for FormatterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatterRegistry {
    pub fn new() -> Self {
        Self::with_shacl_options(ShaclOptions::default())
    }

    pub fn with_shacl_options(options: ShaclOptions) -> Self {
        Self {
            shacl: ShaclFormatter::new(options),
            shex: ShexFormatter::default(),
            custom: BTreeMap::new(),
        }
    }

    pub fn builtin(&self, format: ShapeFormat) -> &dyn ShapeEmitter {
        match format {
            ShapeFormat::Shacl => &self.shacl,
            ShapeFormat::ShEx => &self.shex,
        }
    }

    /// Finds the emitter for `name`, ignoring case and surrounding whitespace
    pub fn get(&self, name: &str) -> Result<&dyn ShapeEmitter> {
        let key = name.trim();
        if key.is_empty() {
            return Err(ShapeError::InvalidArgument(
                "format name cannot be empty".to_string(),
            ));
        }
        if let Ok(format) = key.parse::<ShapeFormat>() {
            return Ok(self.builtin(format));
        }
        match self.custom.get(&key.to_lowercase()) {
            Some(emitter) => Ok(emitter.as_ref()),
            None => Err(ShapeError::UnsupportedFormat {
                requested: key.to_string(),
                supported: self.supported_formats().join(", "),
            }),
        }
    }

    pub fn is_supported(&self, name: &str) -> bool {
        self.get(name).is_ok()
    }

    /// Names of every registered format, built-ins first
    pub fn supported_formats(&self) -> Vec<String> {
        ShapeFormat::ALL
            .iter()
            .map(|f| f.name().to_string())
            .chain(self.custom.values().map(|e| e.format_name().to_string()))
            .collect()
    }

    pub fn formatter_count(&self) -> usize {
        ShapeFormat::ALL.len() + self.custom.len()
    }

    /// Emitter used when the caller does not name a format
    pub fn default_formatter(&self) -> &dyn ShapeEmitter {
        self.builtin(ShapeFormat::default())
    }

    pub fn format_shapes(&self, node_shapes: &[NodeShape], name: &str) -> Result<String> {
        let emitter = self.get(name)?;
        debug!(format = emitter.format_name(), nodes = node_shapes.len(), "dispatching to formatter");
        emitter.format_shapes(node_shapes)
    }

    /// Adds an emitter for a new format. Built-in names cannot be replaced.
    pub fn register(&mut self, emitter: Box<dyn ShapeEmitter>) -> Result<()> {
        let name = emitter.format_name().trim().to_string();
        if name.is_empty() {
            return Err(ShapeError::InvalidArgument(
                "format name cannot be empty".to_string(),
            ));
        }
        if name.parse::<ShapeFormat>().is_ok() {
            return Err(ShapeError::InvalidArgument(format!(
                "format {} is built in and cannot be replaced",
                name
            )));
        }
        debug!(format = %name, "registering formatter");
        self.custom.insert(name.to_lowercase(), emitter);
        Ok(())
    }
}
