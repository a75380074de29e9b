//! # Shapewright - shape model serializers
//!
//! Shapewright turns a statistics-annotated shape model (node shapes with
//! property shapes, support and confidence) into one of two constraint
//! languages: SHACL written as Turtle, or ShEx written as ShExC.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use shapewright::prelude::*;
//!
//! fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//!     let shapes = vec![NodeShape::new(
//!         "http://shaclshapes.org/PersonShape",
//!         "http://example.org/Person",
//!         100,
//!     )
//!     .with_property(
//!         PropertyShape::new("http://shaclshapes.org/namePersonShapeProperty", "http://example.org/name")
//!             .with_node_kind("Literal")
//!             .with_type("http://www.w3.org/2001/XMLSchema#string")
//!             .with_statistics(100, 1.0),
//!     )];
//!
//!     let registry = FormatterRegistry::new();
//!     println!("{}", registry.format_shapes(&shapes, "ShEx")?);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **`shapewright-core`**: shape model, threshold filter, snapshot I/O
//! - **`shapewright-shacl`**: SHACL emitter and Turtle post-processing
//! - **`shapewright-shex`**: ShEx emitter
//! - **`shapewright`** (this crate): format registry, export pipeline,
//!   configuration and runtime measurement
//! - **`shapewright-cli`**: command-line interface

pub use shapewright_core as core;
pub use shapewright_shacl as shacl;
pub use shapewright_shex as shex;

pub mod config;
pub mod export;
pub mod registry;
pub mod runtime;

pub use config::ExportConfig;
pub use export::{ExportArtifact, ShapeExporter};
pub use registry::{FormatterRegistry, ShaclFormatter, ShapeEmitter, ShapeFormat, ShexFormatter};
pub use runtime::{CompareResult, MeasureOptions, RuntimeStats};

use shapewright_core::CoreError;
use shapewright_shacl::ShaclError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShapeError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unsupported format: {requested}. Supported formats: {supported}")]
    UnsupportedFormat { requested: String, supported: String },

    #[error("Internal error: {0}")]
    Internal(#[from] ShaclError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ShapeError>;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::ExportConfig;
    pub use crate::export::{ExportArtifact, ShapeExporter};
    pub use crate::registry::{FormatterRegistry, ShapeEmitter, ShapeFormat};
    pub use crate::{Result, ShapeError};
    pub use shapewright_core::{
        filter, can_format, NodeKind, NodeShape, OrListItem, PropertyShape, Thresholds,
    };
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
