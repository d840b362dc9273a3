use std::path::PathBuf;
use thiserror::Error;

use crate::geometry::RegionId;
use crate::validation::ValidationReport;

/// The main error type for pdfregions operations.
#[derive(Debug, Error)]
pub enum RegionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse task JSON from {path}: {source}")]
    TaskJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write task JSON to {path}: {source}")]
    TaskJsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid task JSON in {path}: {message}")]
    TaskJsonInvalid { path: PathBuf, message: String },

    #[error("Failed to parse document config: {0}")]
    ConfigParse(#[source] serde_json::Error),

    #[error("Color '{0}' is not a #RRGGBB hex color")]
    InvalidColor(String),

    #[error("Region {id} has a malformed position")]
    MalformedPosition { id: RegionId },

    #[error("Region id is empty")]
    EmptyRegionId,

    #[error("Persisted region has no id")]
    MissingRegionId,

    #[error("Validation failed with {error_count} error(s) and {warning_count} warning(s)")]
    ValidationFailed {
        error_count: usize,
        warning_count: usize,
        report: ValidationReport,
    },
}
