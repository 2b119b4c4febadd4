//! Batch royalty statement generator
//!
//! Reads a royalty table (CSV), groups its rows per copyright owner and
//! writes one PDF statement per owner into the output tree. Owners paid
//! above the configured threshold get their statement in a separate
//! subdirectory.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use statement_engine::{generate_statements, ingest, StatementOptions};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments for the statement generator
#[derive(Parser, Debug)]
#[command(name = "statements-cli")]
#[command(about = "Generates per-owner royalty statement PDFs from a royalty table")]
struct Args {
    /// Path to the royalty table (CSV)
    #[arg(short, long)]
    input: PathBuf,

    /// Base directory the statements are written into
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Logo image shown in the statement header
    #[arg(long)]
    logo: Option<PathBuf>,

    /// JSON file with statement options; flags override its values
    #[arg(long)]
    options: Option<PathBuf>,

    /// Payment total above which a statement goes to the separate subdirectory
    #[arg(long)]
    threshold: Option<f64>,

    /// Statement period shown in the header
    #[arg(long)]
    period: Option<String>,

    /// Statement date shown in the metadata
    #[arg(long)]
    date: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let options = resolve_options(&args)?;
    info!(
        "Generating statements from {} into {}",
        args.input.display(),
        options.output_dir.display()
    );

    let records = ingest::read_records(&args.input)
        .with_context(|| format!("reading royalty table {}", args.input.display()))?;
    info!("Read {} royalty record(s)", records.len());

    let written = generate_statements(records, &options)
        .context("generating statements")?;

    let above = written
        .iter()
        .filter(|w| w.total_payment > options.payment_threshold)
        .count();
    info!(
        "Wrote {} statement(s), {} above the payment threshold",
        written.len(),
        above
    );
    Ok(())
}

/// Builds the effective options: defaults first, then the options file,
/// then individual flags.
fn resolve_options(args: &Args) -> anyhow::Result<StatementOptions> {
    let mut options = match &args.options {
        Some(path) => StatementOptions::from_json_file(path)
            .with_context(|| format!("loading options file {}", path.display()))?,
        None => StatementOptions::default(),
    };

    if let Some(dir) = &args.output_dir {
        options.output_dir = dir.clone();
    }
    if let Some(logo) = &args.logo {
        options.logo_path = Some(logo.clone());
    }
    if let Some(threshold) = args.threshold {
        options.payment_threshold = threshold;
    }
    if let Some(period) = &args.period {
        options.statement_period = period.clone();
    }
    if let Some(date) = &args.date {
        options.statement_date = date.clone();
    }
    Ok(options)
}
