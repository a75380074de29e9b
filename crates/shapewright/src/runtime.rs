//! Formatter runtime measurement
//!
//! Times repeated formatting runs and summarizes them with nearest-rank
//! percentiles, for comparing the SHACL and ShEx emitters on a real model.

use shapewright_core::NodeShape;
use std::hint::black_box;
use std::time::Instant;
use tracing::debug;

use crate::registry::ShapeEmitter;
use crate::Result;

const DEFAULT_ITERATIONS: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeStats {
    /// Per-iteration wall time in milliseconds, in measurement order
    pub samples_ms: Vec<f64>,
    pub median_ms: f64,
    pub p90_ms: f64,
    pub p95_ms: f64,
}

impl RuntimeStats {
    pub fn from_samples(samples_ms: Vec<f64>) -> Self {
        let mut sorted = samples_ms.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));
        Self {
            median_ms: percentile(&sorted, 50.0),
            p90_ms: percentile(&sorted, 90.0),
            p95_ms: percentile(&sorted, 95.0),
            samples_ms,
        }
    }
}

/// Nearest-rank percentile over an ascending slice; 0 for no samples
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let rank = ((p / 100.0) * sorted.len() as f64).ceil() as usize;
    let index = rank.saturating_sub(1).min(sorted.len() - 1);
    sorted[index]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasureOptions {
    pub iterations: usize,
    pub reps_per_iteration: usize,
    pub warmup: usize,
}

impl Default for MeasureOptions {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            reps_per_iteration: 1,
            warmup: 0,
        }
    }
}

impl MeasureOptions {
    /// Replaces zero iteration or repetition counts with the defaults
    pub fn normalized(self) -> Self {
        Self {
            iterations: if self.iterations == 0 { DEFAULT_ITERATIONS } else { self.iterations },
            reps_per_iteration: self.reps_per_iteration.max(1),
            warmup: self.warmup,
        }
    }
}

/// Times `emitter` on `node_shapes`. Each sample is the mean wall time of one
/// repetition within an iteration.
pub fn measure(
    emitter: &dyn ShapeEmitter,
    node_shapes: &[NodeShape],
    options: MeasureOptions,
) -> Result<RuntimeStats> {
    let options = options.normalized();

    for _ in 0..options.warmup {
        black_box(emitter.format_shapes(node_shapes)?);
    }

    let mut samples = Vec::with_capacity(options.iterations);
    for _ in 0..options.iterations {
        let start = Instant::now();
        for _ in 0..options.reps_per_iteration {
            black_box(emitter.format_shapes(node_shapes)?);
        }
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        samples.push(elapsed_ms / options.reps_per_iteration as f64);
    }

    let stats = RuntimeStats::from_samples(samples);
    debug!(
        format = emitter.format_name(),
        median_ms = stats.median_ms,
        p95_ms = stats.p95_ms,
        "measured formatter"
    );
    Ok(stats)
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompareResult {
    pub left_name: String,
    pub left: RuntimeStats,
    pub right_name: String,
    pub right: RuntimeStats,
}

impl CompareResult {
    /// Median of the left formatter divided by the median of the right one
    pub fn median_ratio(&self) -> Option<f64> {
        if self.right.median_ms > 0.0 {
            Some(self.left.median_ms / self.right.median_ms)
        } else {
            None
        }
    }

    pub fn report(&self) -> String {
        let mut out = String::new();
        for (name, stats) in [(&self.left_name, &self.left), (&self.right_name, &self.right)] {
            out.push_str(&format!(
                "{:<6} median {:>9.3} ms  p90 {:>9.3} ms  p95 {:>9.3} ms  ({} samples)\n",
                name,
                stats.median_ms,
                stats.p90_ms,
                stats.p95_ms,
                stats.samples_ms.len()
            ));
        }
        if let Some(ratio) = self.median_ratio() {
            out.push_str(&format!(
                "{} / {} median ratio: {:.2}\n",
                self.left_name, self.right_name, ratio
            ));
        }
        out
    }
}

pub fn compare(
    left: &dyn ShapeEmitter,
    right: &dyn ShapeEmitter,
    node_shapes: &[NodeShape],
    options: MeasureOptions,
) -> Result<CompareResult> {
    Ok(CompareResult {
        left_name: left.format_name().to_string(),
        left: measure(left, node_shapes, options)?,
        right_name: right.format_name().to_string(),
        right: measure(right, node_shapes, options)?,
    })
}
