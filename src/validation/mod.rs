//! Validation of annotation results before they are loaded as regions.
//!
//! Checks:
//! - Structural integrity (non-empty ids, no duplicate results)
//! - Geometry (well-formed positions, one position per area)
//! - Content (labeling results carry labels, text is not empty)

mod report;

pub use report::{IssueCode, IssueContext, Severity, ValidationIssue, ValidationReport};

use std::collections::HashMap;

use crate::annotation::AnnotationResult;
use crate::geometry::Position;

/// Options for validation behavior.
#[derive(Clone, Debug, Default)]
pub struct ValidateOptions {
    /// Only check results targeting this document.
    pub document: Option<String>,
}

/// Validates a result list and returns every issue found.
pub fn validate_results(results: &[AnnotationResult], opts: &ValidateOptions) -> ValidationReport {
    let mut report = ValidationReport::new();

    let selected: Vec<(usize, &AnnotationResult)> = results
        .iter()
        .enumerate()
        .filter(|(_, result)| {
            opts.document
                .as_deref()
                .map_or(true, |name| result.to_name == name)
        })
        .collect();

    validate_each(&selected, &mut report);
    validate_areas(&selected, &mut report);

    report
}

/// Per-result checks.
fn validate_each(results: &[(usize, &AnnotationResult)], report: &mut ValidationReport) {
    let mut seen: HashMap<(&str, &str), usize> = HashMap::new();

    for &(index, result) in results {
        let context = || IssueContext::Result {
            index,
            id: result.id.to_string(),
        };

        if result.id.is_empty() {
            report.add(ValidationIssue::error(
                IssueCode::EmptyResultId,
                "Empty area id",
                context(),
            ));
        } else if let Some(first) = seen.get(&(result.id.as_str(), result.from_name.as_str())) {
            report.add(ValidationIssue::error(
                IssueCode::DuplicateResult,
                format!(
                    "Duplicate result for control '{}' (first seen at index {})",
                    result.from_name, first
                ),
                context(),
            ));
        } else {
            seen.insert((result.id.as_str(), result.from_name.as_str()), index);
        }

        if !result.value.position.is_well_formed() {
            report.add(ValidationIssue::error(
                IssueCode::MalformedPosition,
                "Position must be a non-empty object or array",
                context(),
            ));
        }

        if result.is_labeling() && result.labels().is_empty() {
            report.add(ValidationIssue::warning(
                IssueCode::MissingLabels,
                format!("No labels recorded under '{}'", result.result_type),
                context(),
            ));
        }

        if result.value.text.as_deref() == Some("") {
            report.add(ValidationIssue::warning(
                IssueCode::EmptyText,
                "Empty text (stored as absent)",
                context(),
            ));
        }
    }
}

/// Checks that results sharing an area agree on its position.
fn validate_areas(results: &[(usize, &AnnotationResult)], report: &mut ValidationReport) {
    let mut first_position: HashMap<&str, &Position> = HashMap::new();
    let mut flagged: Vec<&str> = Vec::new();

    for &(_, result) in results {
        let id = result.id.as_str();
        if id.is_empty() || !result.value.position.is_well_formed() {
            continue;
        }

        match first_position.get(id) {
            None => {
                first_position.insert(id, &result.value.position);
            }
            Some(position) if **position != result.value.position && !flagged.contains(&id) => {
                flagged.push(id);
                report.add(ValidationIssue::warning(
                    IssueCode::InconsistentAreaPosition,
                    format!(
                        "Result from '{}' disagrees with the area's first position",
                        result.from_name
                    ),
                    IssueContext::Area { id: id.to_string() },
                ));
            }
            Some(_) => {}
        }
    }
}
