//! # Shapewright ShEx
//!
//! Serializes a shape model as ShExC. Unlike the SHACL side there is no RDF
//! graph in between: the grammar is written directly, so the emitter decides
//! the exact textual layout.

pub mod curie;
pub mod emitter;
pub mod helpers;
pub mod syntax;

pub use curie::{shape_label, to_curie};
pub use emitter::ShexEmitter;
pub use helpers::HelperShapeRegistry;
pub use syntax::PREFIX_BLOCK;
