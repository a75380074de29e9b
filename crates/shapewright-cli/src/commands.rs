//! CLI command definitions and handlers

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shapewright::registry::ShapeFormat;
use shapewright::runtime::{self, MeasureOptions};
use shapewright::{ExportConfig, FormatterRegistry, ShapeExporter};
use shapewright_core::snapshot::{self, DEFAULT_SNAPSHOT_PATH};
use shapewright_core::{can_format, find_defects, NodeShape, Thresholds};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Main CLI structure
#[derive(Parser)]
#[command(name = "shapewright")]
#[command(about = "Serialize extracted shape models as SHACL or ShEx")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Format a shape snapshot
    Format {
        /// Shape snapshot (JSON)
        #[arg(short, long, default_value = DEFAULT_SNAPSHOT_PATH)]
        input: PathBuf,

        /// Output format (SHACL or ShEx); defaults to the configured format
        #[arg(short, long)]
        format: Option<String>,

        /// Output file or directory; prints to stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Minimum support of exported property shapes
        #[arg(long)]
        support: Option<u64>,

        /// Minimum confidence (0-1) of exported property shapes
        #[arg(long)]
        confidence: Option<f64>,

        /// Skip Turtle post-processing
        #[arg(long)]
        no_post_process: bool,
    },

    /// List supported output formats
    Formats,

    /// Report structural defects in a shape snapshot
    Check {
        /// Shape snapshot (JSON)
        #[arg(short, long, default_value = DEFAULT_SNAPSHOT_PATH)]
        input: PathBuf,
    },

    /// Compare SHACL and ShEx formatting time on a snapshot
    Bench {
        /// Shape snapshot (JSON)
        #[arg(short, long, default_value = DEFAULT_SNAPSHOT_PATH)]
        input: PathBuf,

        /// Measured iterations
        #[arg(long, default_value = "5")]
        iterations: usize,

        /// Formatting runs per iteration
        #[arg(long, default_value = "1")]
        reps: usize,

        /// Unmeasured warm-up runs
        #[arg(long, default_value = "0")]
        warmup: usize,
    },
}

/// Command execution result
pub struct CommandResult {
    pub success: bool,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Execute CLI commands
pub struct CommandExecutor {
    config: ExportConfig,
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new(ExportConfig::default())
    }
}

impl CommandExecutor {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Execute a CLI command
    pub fn execute(&self, command: Commands) -> Result<CommandResult> {
        match command {
            Commands::Format {
                input,
                format,
                output,
                support,
                confidence,
                no_post_process,
            } => self.execute_format(&input, format, output, support, confidence, no_post_process),
            Commands::Formats => Ok(self.execute_formats()),
            Commands::Check { input } => self.execute_check(&input),
            Commands::Bench {
                input,
                iterations,
                reps,
                warmup,
            } => self.execute_bench(
                &input,
                MeasureOptions {
                    iterations,
                    reps_per_iteration: reps,
                    warmup,
                },
            ),
        }
    }

    fn execute_format(
        &self,
        input: &Path,
        format: Option<String>,
        output: Option<PathBuf>,
        support: Option<u64>,
        confidence: Option<f64>,
        no_post_process: bool,
    ) -> Result<CommandResult> {
        let shapes = load_snapshot(input)?;
        if !can_format(&shapes) {
            for defect in find_defects(&shapes) {
                warn!(defect = %defect, "malformed shape model");
            }
        }

        let mut config = self.config.clone();
        if no_post_process {
            config.post_processing.enabled = false;
        }
        let exporter = ShapeExporter::new(&config);
        let format_name = format.unwrap_or_else(|| config.format.default.clone());
        let thresholds = resolve_thresholds(support, confidence, &config)?;

        let artifact = exporter.export(&shapes, &format_name, thresholds.as_ref())?;
        let data = serde_json::json!({
            "format": artifact.format,
            "file_name": artifact.file_name,
            "bytes": artifact.len(),
            "filtered": thresholds.is_some(),
        });

        let message = match output {
            Some(path) => {
                let path = if path.is_dir() {
                    path.join(&artifact.file_name)
                } else {
                    path
                };
                std::fs::write(&path, artifact.as_bytes())
                    .with_context(|| format!("failed to write {}", path.display()))?;
                info!(path = %path.display(), "wrote shapes");
                format!("Wrote {} ({} bytes)", path.display(), artifact.len())
            }
            None => artifact.content,
        };

        Ok(CommandResult {
            success: true,
            message,
            data: Some(data),
        })
    }

    fn execute_formats(&self) -> CommandResult {
        let registry = FormatterRegistry::new();
        let lines: Vec<String> = ShapeFormat::ALL
            .iter()
            .map(|format| {
                let emitter = registry.builtin(*format);
                format!("{} (.{})", emitter.format_name(), emitter.file_extension())
            })
            .collect();

        CommandResult {
            success: true,
            message: lines.join("\n"),
            data: Some(serde_json::json!(registry.supported_formats())),
        }
    }

    fn execute_check(&self, input: &Path) -> Result<CommandResult> {
        let shapes = load_snapshot(input)?;
        let defects = find_defects(&shapes);
        let property_count: usize = shapes.iter().map(|ns| ns.property_shapes.len()).sum();

        let message = if defects.is_empty() {
            format!(
                "{} node shapes, {} property shapes: ready to format",
                shapes.len(),
                property_count
            )
        } else {
            format!("{} defects found:\n{}", defects.len(), defects.join("\n"))
        };

        Ok(CommandResult {
            success: defects.is_empty(),
            message,
            data: Some(serde_json::json!({
                "node_shapes": shapes.len(),
                "property_shapes": property_count,
                "defects": defects,
            })),
        })
    }

    fn execute_bench(&self, input: &Path, options: MeasureOptions) -> Result<CommandResult> {
        let shapes = load_snapshot(input)?;
        let registry = FormatterRegistry::with_shacl_options(self.config.shacl_options());
        let result = runtime::compare(
            registry.builtin(ShapeFormat::Shacl),
            registry.builtin(ShapeFormat::ShEx),
            &shapes,
            options,
        )?;

        Ok(CommandResult {
            success: true,
            message: result.report(),
            data: Some(serde_json::json!({
                "shacl_median_ms": result.left.median_ms,
                "shex_median_ms": result.right.median_ms,
            })),
        })
    }
}

fn load_snapshot(input: &Path) -> Result<Vec<NodeShape>> {
    snapshot::load(input).with_context(|| format!("failed to load snapshot {}", input.display()))
}

/// Command-line thresholds win over configured ones; a single given bound
/// leaves the other at zero.
pub fn resolve_thresholds(
    support: Option<u64>,
    confidence: Option<f64>,
    config: &ExportConfig,
) -> Result<Option<Thresholds>> {
    if support.is_none() && confidence.is_none() {
        return Ok(config.thresholds()?);
    }
    let thresholds = Thresholds::new(support.unwrap_or(0), confidence.unwrap_or(0.0))?;
    Ok(Some(thresholds))
}
