//! JSON snapshots of an extracted shape model
//!
//! Lets a model be extracted once and formatted many times (benchmarks, CLI
//! runs) without re-running extraction.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::model::NodeShape;
use crate::{CoreError, Result};

/// Where extraction runs drop their latest snapshot by default
pub const DEFAULT_SNAPSHOT_PATH: &str = "evaluation/latest-node-shapes.json";

/// On-disk layout: `{"nodes": [...]}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShapeSnapshot {
    #[serde(default)]
    pub nodes: Option<Vec<NodeShape>>,
}

impl ShapeSnapshot {
    pub fn new(nodes: Vec<NodeShape>) -> Self {
        Self { nodes: Some(nodes) }
    }

    /// Node shapes held by the snapshot; a null or absent list is rejected
    pub fn into_nodes(self) -> Result<Vec<NodeShape>> {
        self.nodes
            .ok_or_else(|| CoreError::InvalidArgument("node shapes cannot be null".to_string()))
    }
}

pub fn to_json_string(node_shapes: &[NodeShape]) -> Result<String> {
    #[derive(Serialize)]
    struct Borrowed<'a> {
        nodes: &'a [NodeShape],
    }
    Ok(serde_json::to_string_pretty(&Borrowed { nodes: node_shapes })?)
}

pub fn from_json_str(json: &str) -> Result<Vec<NodeShape>> {
    let snapshot: ShapeSnapshot = serde_json::from_str(json)?;
    snapshot.into_nodes()
}

pub fn save(node_shapes: &[NodeShape], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, to_json_string(node_shapes)?)?;
    info!(path = %path.display(), nodes = node_shapes.len(), "saved shape snapshot");
    Ok(())
}

pub fn load(path: impl AsRef<Path>) -> Result<Vec<NodeShape>> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)?;
    let nodes = from_json_str(&json)?;
    info!(path = %path.display(), nodes = nodes.len(), "loaded shape snapshot");
    Ok(nodes)
}

pub fn snapshot_exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().is_file()
}
