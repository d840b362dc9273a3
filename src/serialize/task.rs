//! Task JSON reader and writer.
//!
//! A task file holds one task: its `data` object, at most one annotation
//! set (`annotations`, or the legacy `completions` key) and at most one
//! prediction set. Results are read into [`AnnotationResult`]s that an
//! [`InMemoryAnnotationStore`](crate::annotation::InMemoryAnnotationStore)
//! can be built from.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::annotation::{AnnotationResult, Origin};
use crate::error::RegionError;

// ============================================================================
// Task schema types (internal)
// ============================================================================

#[derive(Debug, Deserialize)]
struct TaskIn {
    #[serde(default)]
    id: Option<u64>,
    #[serde(default)]
    data: Map<String, Value>,
    #[serde(default)]
    annotations: Option<Vec<ResultSetIn>>,
    #[serde(default)]
    completions: Option<Vec<ResultSetIn>>,
    #[serde(default)]
    predictions: Option<Vec<ResultSetIn>>,
}

#[derive(Debug, Default, Deserialize)]
struct ResultSetIn {
    #[serde(default)]
    result: Vec<Value>,
}

#[derive(Debug, Serialize)]
struct TaskOut<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<u64>,
    data: &'a Map<String, Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    annotations: Vec<ResultSetOut<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    predictions: Vec<ResultSetOut<'a>>,
}

#[derive(Debug, Serialize)]
struct ResultSetOut<'a> {
    result: &'a [AnnotationResult],
}

// ============================================================================
// Public API
// ============================================================================

/// A single task with its annotation and prediction results.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Task {
    pub id: Option<u64>,
    pub data: Map<String, Value>,
    pub results: Vec<AnnotationResult>,
    pub predictions: Vec<AnnotationResult>,
}

/// Read a task JSON file.
pub fn read_task_json(path: &Path) -> Result<Task, RegionError> {
    let file = File::open(path).map_err(RegionError::Io)?;
    let reader = BufReader::new(file);

    let task: TaskIn =
        serde_json::from_reader(reader).map_err(|source| RegionError::TaskJsonParse {
            path: path.to_path_buf(),
            source,
        })?;

    task_from_schema(task, path)
}

/// Write a task JSON file.
pub fn write_task_json(path: &Path, task: &Task) -> Result<(), RegionError> {
    let file = File::create(path).map_err(RegionError::Io)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, &task_to_schema(task)).map_err(|source| {
        RegionError::TaskJsonWrite {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Parse task JSON from a string.
pub fn from_task_str(json: &str) -> Result<Task, RegionError> {
    let path = Path::new("<string>");
    let task: TaskIn = serde_json::from_str(json).map_err(|source| RegionError::TaskJsonParse {
        path: path.to_path_buf(),
        source,
    })?;
    task_from_schema(task, path)
}

/// Parse task JSON from bytes.
pub fn from_task_slice(bytes: &[u8]) -> Result<Task, RegionError> {
    let path = Path::new("<bytes>");
    let task: TaskIn =
        serde_json::from_slice(bytes).map_err(|source| RegionError::TaskJsonParse {
            path: path.to_path_buf(),
            source,
        })?;
    task_from_schema(task, path)
}

/// Serialize a task to a JSON string.
pub fn to_task_string(task: &Task) -> Result<String, RegionError> {
    serde_json::to_string_pretty(&task_to_schema(task)).map_err(|source| {
        RegionError::TaskJsonWrite {
            path: "<string>".into(),
            source,
        }
    })
}

// ============================================================================
// Conversion
// ============================================================================

fn task_from_schema(task: TaskIn, path: &Path) -> Result<Task, RegionError> {
    if task.annotations.is_some() && task.completions.is_some() {
        return Err(invalid(
            path,
            "task has both annotations and completions; expected only one key",
        ));
    }

    let annotation_set = single_set(task.annotations.or(task.completions), path, "annotation")?;
    let prediction_set = single_set(task.predictions, path, "prediction")?;

    let results = parse_results(annotation_set, path, "annotations", None)?;
    let predictions = parse_results(prediction_set, path, "predictions", Some(Origin::Prediction))?;

    Ok(Task {
        id: task.id,
        data: task.data,
        results,
        predictions,
    })
}

fn single_set(
    sets: Option<Vec<ResultSetIn>>,
    path: &Path,
    kind: &str,
) -> Result<Vec<Value>, RegionError> {
    let Some(mut sets) = sets else {
        return Ok(vec![]);
    };

    if sets.len() > 1 {
        return Err(invalid(
            path,
            format!("task has {} {kind} sets; expected at most 1", sets.len()),
        ));
    }

    Ok(sets.pop().map(|set| set.result).unwrap_or_default())
}

fn parse_results(
    raw: Vec<Value>,
    path: &Path,
    source_name: &str,
    default_origin: Option<Origin>,
) -> Result<Vec<AnnotationResult>, RegionError> {
    raw.into_iter()
        .enumerate()
        .map(|(idx, value)| -> Result<AnnotationResult, RegionError> {
            let has_origin = value.get("origin").is_some();
            let mut result: AnnotationResult = serde_json::from_value(value).map_err(|source| {
                invalid(path, format!("{source_name}[{idx}] is not a valid result: {source}"))
            })?;
            if let (false, Some(origin)) = (has_origin, default_origin) {
                result.origin = origin;
            }
            Ok(result)
        })
        .collect()
}

fn task_to_schema(task: &Task) -> TaskOut<'_> {
    TaskOut {
        id: task.id,
        data: &task.data,
        annotations: result_sets(&task.results),
        predictions: result_sets(&task.predictions),
    }
}

fn result_sets(results: &[AnnotationResult]) -> Vec<ResultSetOut<'_>> {
    if results.is_empty() {
        vec![]
    } else {
        vec![ResultSetOut { result: results }]
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn invalid(path: &Path, message: impl Into<String>) -> RegionError {
    RegionError::TaskJsonInvalid {
        path: path.to_path_buf(),
        message: message.into(),
    }
}

// ============================================================================
// Tests
// ============================================================================
