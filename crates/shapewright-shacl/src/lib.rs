//! SHACL シリアライザ
//!
//! シェイプモデルを SHACL (Turtle) として出力します:
//! - RDF グラフ構築とシリアライズ (Emitter)
//! - Turtle テキストの後処理 (PostProcess)

pub mod emitter;
pub mod postprocess;

// Re-exports
pub use emitter::{ShaclEmitter, ShaclOptions, PREFIXES};
pub use postprocess::TurtlePostProcessor;

// Error types
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShaclError {
    #[error("Graph error: {0}")]
    Graph(String),

    #[error("Invalid IRI: {0}")]
    InvalidIri(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, ShaclError>;
