use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn runs() {
    let mut cmd = Command::cargo_bin("pdfregions").unwrap();
    cmd.assert().success();
}

#[test]
fn outputs_tool_name() {
    let mut cmd = Command::cargo_bin("pdfregions").unwrap();
    cmd.arg("-V");
    cmd.assert().success().stdout("pdfregions 0.1.0\n");
}

#[test]
fn no_subcommand_prints_usage_hint() {
    let mut cmd = Command::cargo_bin("pdfregions").unwrap();
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Run 'pdfregions --help'"));
}

// Validate subcommand tests

#[test]
fn validate_valid_task_succeeds() {
    let mut cmd = Command::cargo_bin("pdfregions").unwrap();
    cmd.args(["validate", "tests/fixtures/sample_valid.task.json"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Validation passed"));
}

#[test]
fn validate_invalid_task_fails() {
    let mut cmd = Command::cargo_bin("pdfregions").unwrap();
    cmd.args(["validate", "tests/fixtures/sample_invalid.task.json"]);
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("error(s)"))
        .stdout(predicate::str::contains("EmptyResultId"))
        .stdout(predicate::str::contains("DuplicateResult"))
        .stdout(predicate::str::contains("MalformedPosition"))
        .stdout(predicate::str::contains("MissingLabels"));
}

#[test]
fn validate_warnings_pass_unless_strict() {
    let mut cmd = Command::cargo_bin("pdfregions").unwrap();
    cmd.args(["validate", "tests/fixtures/sample_warnings.task.json"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("EmptyText"));

    let mut cmd = Command::cargo_bin("pdfregions").unwrap();
    cmd.args([
        "validate",
        "tests/fixtures/sample_warnings.task.json",
        "--strict",
    ]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Validation failed"));
}

#[test]
fn validate_json_output_format() {
    let mut cmd = Command::cargo_bin("pdfregions").unwrap();
    cmd.args([
        "validate",
        "tests/fixtures/sample_invalid.task.json",
        "--output",
        "json",
    ]);
    let output = cmd.assert().failure().get_output().stdout.clone();

    let report: serde_json::Value = serde_json::from_slice(&output).expect("stdout is JSON");
    assert_eq!(report["error_count"], 3);
    assert_eq!(report["warning_count"], 1);
    assert_eq!(report["issues"][0]["code"], "EmptyResultId");
}

#[test]
fn validate_document_filter_ignores_other_targets() {
    let mut cmd = Command::cargo_bin("pdfregions").unwrap();
    cmd.args([
        "validate",
        "tests/fixtures/sample_invalid.task.json",
        "--document",
        "image",
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Validation passed"));
}

#[test]
fn validate_nonexistent_file_fails() {
    let mut cmd = Command::cargo_bin("pdfregions").unwrap();
    cmd.args(["validate", "nonexistent_file.json"]);
    cmd.assert().failure();
}

#[test]
fn validate_rejects_multiple_annotation_sets() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("two_sets.json");
    std::fs::write(
        &path,
        r#"{"data": {}, "annotations": [{"result": []}, {"result": []}]}"#,
    )
    .expect("write task");

    let mut cmd = Command::cargo_bin("pdfregions").unwrap();
    cmd.arg("validate").arg(&path);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("expected at most 1"));
}

// Regions subcommand tests

#[test]
fn regions_text_lists_regions_in_store_order() {
    let mut cmd = Command::cargo_bin("pdfregions").unwrap();
    cmd.args(["regions", "tests/fixtures/sample_valid.task.json"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("2 region(s) in 'pdf'"))
        .stdout(predicate::str::is_match(r"(?s)a1  page 0  Person  Alice.*a2  page 2  Date").unwrap());
}

#[test]
fn regions_json_is_persisted_values() {
    let mut cmd = Command::cargo_bin("pdfregions").unwrap();
    cmd.args([
        "regions",
        "tests/fixtures/sample_valid.task.json",
        "--output",
        "json",
    ]);
    let output = cmd.assert().success().get_output().stdout.clone();

    let regions: serde_json::Value = serde_json::from_slice(&output).expect("stdout is JSON");
    assert_eq!(regions[0]["value"]["id"], "a1");
    assert_eq!(regions[0]["value"]["label"], "Person");
    assert_eq!(regions[0]["value"]["text"], "Alice");
    assert_eq!(regions[1]["value"]["position"]["pageIndex"], 2);
}

#[test]
fn regions_no_text_drops_text() {
    let mut cmd = Command::cargo_bin("pdfregions").unwrap();
    cmd.args([
        "regions",
        "tests/fixtures/sample_valid.task.json",
        "--output",
        "json",
        "--no-text",
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"text\"").not());
}

#[test]
fn regions_for_other_document_is_empty() {
    let mut cmd = Command::cargo_bin("pdfregions").unwrap();
    cmd.args([
        "regions",
        "tests/fixtures/sample_valid.task.json",
        "--document",
        "image",
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("0 region(s) in 'image'"));
}

#[test]
fn regions_fall_back_to_predictions() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("predicted.json");
    std::fs::write(
        &path,
        r#"{"data": {"pdf": "paper.pdf"}, "predictions": [{"result": [
            {"id": "p1", "type": "labels", "from_name": "label", "to_name": "pdf",
             "value": {"position": {"pageIndex": 1}, "labels": ["Organization"]}}
        ]}]}"#,
    )
    .expect("write task");

    let mut cmd = Command::cargo_bin("pdfregions").unwrap();
    cmd.arg("regions").arg(&path);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("1 region(s)"))
        .stdout(predicate::str::contains("p1  page ?  Organization"));
}
