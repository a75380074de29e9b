//! Support/confidence threshold filter
//!
//! Produces the "reliable" subset of a shape model. Input is never mutated;
//! each surviving node shape is a fresh copy carrying only the property
//! shapes that passed.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{NodeShape, OrListItem, PropertyShape};
use crate::{CoreError, Result};

/// Minimum support and confidence a property shape needs to survive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub support: u64,
    pub confidence: f64,
}

impl Thresholds {
    pub fn new(support: u64, confidence: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(CoreError::InvalidThreshold(format!(
                "confidence must be within [0, 1], got {}",
                confidence
            )));
        }
        Ok(Self { support, confidence })
    }

    /// Builds thresholds from a confidence given as a percentage (0-100)
    pub fn from_percent(support: u64, confidence_percent: f64) -> Result<Self> {
        if !(0.0..=100.0).contains(&confidence_percent) {
            return Err(CoreError::InvalidThreshold(format!(
                "confidence percentage must be within [0, 100], got {}",
                confidence_percent
            )));
        }
        Self::new(support, confidence_percent / 100.0)
    }

    fn admits(&self, support: u64, confidence: f64) -> bool {
        support >= self.support && confidence >= self.confidence
    }
}

/// Keeps the property shapes that meet `thresholds` and drops node shapes
/// left without any.
///
/// A property shape with both statistics survives iff they meet both
/// thresholds. Without them it survives only when it carries an OR-list with
/// at least one item the extractor did not prune. Anything else is excluded. Node shapes flagged
/// by the extractor are dropped outright.
pub fn filter(node_shapes: &[NodeShape], thresholds: &Thresholds) -> Vec<NodeShape> {
    let mut reliable = Vec::new();

    for node_shape in node_shapes {
        if node_shape.prune_flag {
            debug!(iri = %node_shape.iri, "skipping pruned node shape");
            continue;
        }

        let property_shapes: Vec<PropertyShape> = node_shape
            .property_shapes
            .iter()
            .filter(|ps| keep_property(ps, thresholds))
            .cloned()
            .collect();

        if property_shapes.is_empty() {
            debug!(iri = %node_shape.iri, "no property shape passed the thresholds");
            continue;
        }

        reliable.push(NodeShape {
            iri: node_shape.iri.clone(),
            target_class: node_shape.target_class.clone(),
            support: node_shape.support,
            prune_flag: false,
            property_shapes,
        });
    }

    debug!(
        input = node_shapes.len(),
        kept = reliable.len(),
        support = thresholds.support,
        confidence = thresholds.confidence,
        "threshold filter applied"
    );

    reliable
}

fn keep_property(property: &PropertyShape, thresholds: &Thresholds) -> bool {
    match (property.support, property.confidence) {
        (Some(support), Some(confidence)) => thresholds.admits(support, confidence),
        _ if property.has_or_list => property.or_list_items.iter().any(OrListItem::is_reliable),
        _ => false,
    }
}
