//! # Shapewright Core
//!
//! シェイプモデル (NodeShape / PropertyShape) の中間表現
//! Shared shape model consumed by the SHACL and ShEx serializers, plus the
//! threshold filter and JSON snapshot I/O.

pub mod filter;
pub mod model;
pub mod snapshot;
pub mod validate;
pub mod vocabulary;

pub use filter::{filter, Thresholds};
pub use model::{NodeKind, NodeShape, OrListItem, PropertyShape};
pub use snapshot::{ShapeSnapshot, DEFAULT_SNAPSHOT_PATH};
pub use validate::{can_format, find_defects};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),

    #[error("Snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
