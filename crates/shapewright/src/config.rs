//! # Export Configuration
//!
//! Settings for the export pipeline, loaded from TOML:
//!
//! ```toml
//! [post_processing]
//! enabled = true
//!
//! [format]
//! default = "SHACL"
//!
//! [thresholds]
//! support = 10
//! confidence = 0.25
//!
//! [shacl]
//! annotate_statistics = false
//! ```

use serde::{Deserialize, Serialize};
use shapewright_core::Thresholds;
use shapewright_shacl::ShaclOptions;
use std::path::Path;
use tracing::warn;

use crate::registry::ShapeFormat;
use crate::{Result, ShapeError};

/// Environment variable overriding `post_processing.enabled`
pub const POST_PROCESSING_ENV: &str = "SHAPEWRIGHT_POST_PROCESSING";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub post_processing: PostProcessingConfig,
    pub format: FormatConfig,
    /// Applied by the CLI when no thresholds are given on the command line
    pub thresholds: Option<Thresholds>,
    pub shacl: ShaclConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostProcessingConfig {
    /// Repair confidence literals and the `NodeKind` spelling in Turtle output
    pub enabled: bool,
}

impl Default for PostProcessingConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Format used when the caller names none
    pub default: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            default: ShapeFormat::Shacl.name().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaclConfig {
    /// Attach `qse:support` / `qse:confidence` to emitted shapes
    pub annotate_statistics: bool,
}

impl ExportConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ShapeError::Config(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ShapeError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ShapeError::Config(e.to_string()))
    }

    /// Applies overrides from the process environment
    pub fn with_env_overrides(self) -> Self {
        let value = std::env::var(POST_PROCESSING_ENV).ok();
        self.with_post_processing_override(value.as_deref())
    }

    /// Applies a `true`/`false` override of `post_processing.enabled`;
    /// unparseable values are ignored.
    pub fn with_post_processing_override(mut self, value: Option<&str>) -> Self {
        if let Some(value) = value {
            match value.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => self.post_processing.enabled = true,
                "false" | "0" | "no" | "off" => self.post_processing.enabled = false,
                other => warn!(value = %other, "ignoring unrecognized {} value", POST_PROCESSING_ENV),
            }
        }
        self
    }

    pub fn default_format(&self) -> Result<ShapeFormat> {
        self.format.default.parse()
    }

    /// Configured thresholds, range-checked
    pub fn thresholds(&self) -> Result<Option<Thresholds>> {
        match &self.thresholds {
            Some(t) => Ok(Some(Thresholds::new(t.support, t.confidence)?)),
            None => Ok(None),
        }
    }

    pub fn shacl_options(&self) -> ShaclOptions {
        ShaclOptions {
            annotate_statistics: self.shacl.annotate_statistics,
        }
    }
}
