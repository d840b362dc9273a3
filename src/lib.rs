//! pdfregions: labeled highlight regions for rendered documents.
//!
//! A [`Document`](document::Document) keeps a list of regions (labeled
//! highlights drawn over a PDF) in step with an external annotation store
//! that owns the canonical results. It turns user selections into results,
//! rebuilds its regions whenever the store changes, derives a display state
//! for each highlight and serializes regions for persistence.
//!
//! # Modules
//!
//! - [`document`]: Document lifecycle, selection handling and resync
//! - [`region`]: Region type and the observable region store
//! - [`annotation`]: The annotation store contract, result model and label controls
//! - [`visual`]: Highlight colors and the renderer contract
//! - [`serialize`]: Persisted region values and task JSON I/O
//! - [`validation`]: Result validation and error reporting
//! - [`geometry`]: Ids, positions and rectangles
//! - [`error`]: Error types for pdfregions operations

pub mod annotation;
pub mod document;
pub mod error;
pub mod geometry;
pub mod region;
pub mod serialize;
pub mod validation;
pub mod visual;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use tracing::info;

pub use error::RegionError;

use annotation::{AnnotationResult, InMemoryAnnotationStore};
use document::{Document, DocumentConfig};
use serialize::task::{read_task_json, Task};

/// The pdfregions CLI application.
#[derive(Parser)]
#[command(name = "pdfregions")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Validate the region results of a task export.
    Validate(ValidateArgs),
    /// Rebuild the regions of a task and print their persisted values.
    Regions(RegionsArgs),
}

/// Report format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Arguments for the validate subcommand.
#[derive(clap::Args)]
struct ValidateArgs {
    /// Task JSON file to validate.
    input: PathBuf,

    /// Only check results targeting this document.
    #[arg(long)]
    document: Option<String>,

    /// Treat warnings as errors (exit non-zero if any warnings).
    #[arg(long)]
    strict: bool,

    /// Output format for the report.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
}

/// Arguments for the regions subcommand.
#[derive(clap::Args)]
struct RegionsArgs {
    /// Task JSON file to load.
    input: PathBuf,

    /// Name of the document tag the results target.
    #[arg(long, default_value = "pdf", env = "PDFREGIONS_DOCUMENT")]
    document: String,

    /// Do not persist extracted text.
    #[arg(long)]
    no_text: bool,

    /// Output format for the region list.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
}

/// Run the pdfregions CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), RegionError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Validate(args)) => run_validate(args),
        Some(Commands::Regions(args)) => run_regions(args),
        None => {
            println!("pdfregions {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Labeled highlight regions for rendered documents.");
            println!();
            println!("Run 'pdfregions --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the validate subcommand.
fn run_validate(args: ValidateArgs) -> Result<(), RegionError> {
    let task = read_task_json(&args.input)?;

    let opts = validation::ValidateOptions {
        document: args.document,
    };
    let report = validation::validate_results(&store_results(task), &opts);
    info!(
        errors = report.error_count(),
        warnings = report.warning_count(),
        "validation finished"
    );

    match args.output {
        OutputFormat::Json => {
            let json = json!({
                "error_count": report.error_count(),
                "warning_count": report.warning_count(),
                "issues": &report.issues,
            });
            println!("{}", to_pretty(&json)?);
        }
        OutputFormat::Text => print!("{}", report),
    }

    let has_errors = report.error_count() > 0;
    let has_warnings = report.warning_count() > 0;

    if has_errors || (args.strict && has_warnings) {
        Err(RegionError::ValidationFailed {
            error_count: report.error_count(),
            warning_count: report.warning_count(),
            report,
        })
    } else {
        Ok(())
    }
}

/// Execute the regions subcommand.
fn run_regions(args: RegionsArgs) -> Result<(), RegionError> {
    let task = read_task_json(&args.input)?;

    let source_url = task
        .data
        .get(&args.document)
        .and_then(|value| value.as_str())
        .unwrap_or_default()
        .to_string();
    let mut config = DocumentConfig::new(args.document, source_url);
    config.save_text_result = !args.no_text;

    let store = InMemoryAnnotationStore::with_results(store_results(task));
    let mut doc = Document::new(config);
    doc.mark_ready();
    let resync = doc.needs_update(&store);
    info!(
        document = doc.name(),
        regions = resync.regions,
        skipped = resync.skipped,
        "regions loaded"
    );

    let persisted = doc.serialize();
    match args.output {
        OutputFormat::Json => println!("{}", to_pretty(&persisted)?),
        OutputFormat::Text => {
            println!("{} region(s) in '{}'", persisted.len(), doc.name());
            for region in doc.regions() {
                let page = region
                    .position
                    .page_position()
                    .map(|page| page.page_index.to_string())
                    .unwrap_or_else(|| "?".to_string());
                println!(
                    "  {}  page {}  {}  {}",
                    region.id,
                    page,
                    region.label.as_deref().unwrap_or("-"),
                    region
                        .text
                        .as_deref()
                        .filter(|_| doc.config().save_text_result)
                        .unwrap_or("")
                );
            }
        }
    }

    Ok(())
}

/// Results the store should start from: annotations, or the predictions
/// when a task has not been annotated yet.
fn store_results(task: Task) -> Vec<AnnotationResult> {
    if task.results.is_empty() {
        task.predictions
    } else {
        task.results
    }
}

fn to_pretty(value: &impl serde::Serialize) -> Result<String, RegionError> {
    serde_json::to_string_pretty(value).map_err(|source| RegionError::TaskJsonWrite {
        path: "<stdout>".into(),
        source,
    })
}
