//! Shapewright CLI main entry point

use anyhow::Result;
use clap::Parser;
use shapewright::ExportConfig;
use shapewright_cli::commands::{Cli, CommandExecutor};

fn main() -> Result<()> {
    // Logs go to stderr so formatted shapes can be piped from stdout
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ExportConfig::from_file(path)?,
        None => ExportConfig::default(),
    }
    .with_env_overrides();

    let executor = CommandExecutor::new(config);
    let result = executor.execute(cli.command)?;

    if result.success {
        println!("{}", result.message.trim_end());
        std::process::exit(0);
    } else {
        eprintln!("{}", result.message.trim_end());
        std::process::exit(1);
    }
}
