//! Command-line interface for serverless-merge
//!
//! Reads the host document, resolves every marker entry and writes the merged
//! result as compact JSON.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use serverless_merge::config::{MergeConfig, DEFAULT_INPUT, DEFAULT_MARKER_KEY, DEFAULT_OUTPUT};
use serverless_merge::merge_file;

/// Merge YAML fragments referenced via ${file(...)} into a Serverless config
#[derive(Parser)]
#[command(name = "serverless-merge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Host YAML document to read
    #[arg(short, long, value_name = "FILE", env = "SLS_MERGE_INPUT", default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Where to write the merged JSON document
    #[arg(short, long, value_name = "FILE", env = "SLS_MERGE_OUTPUT", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Mapping key that marks a file reference
    #[arg(short, long, value_name = "NAME", env = "SLS_MERGE_KEY", default_value = DEFAULT_MARKER_KEY)]
    key: String,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> MergeConfig {
        MergeConfig::new(self.input, self.output).marker_key(self.key)
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let config = cli.into_config();
    let stats = merge_file(&config)
        .with_context(|| format!("Failed merging {}", config.input.display()))?;

    tracing::info!(
        "Wrote {} ({} references resolved, {} skipped, {} keys added)",
        config.output.display(),
        stats.references_resolved,
        stats.references_skipped,
        stats.keys_added
    );
    Ok(())
}
