//! Fuzz target for task JSON parsing.
//!
//! Parsed tasks are also validated and rebuilt into regions, so panics in
//! either path surface here.

#![no_main]

use libfuzzer_sys::fuzz_target;
use pdfregions::annotation::InMemoryAnnotationStore;
use pdfregions::document::{Document, DocumentConfig};
use pdfregions::serialize::task::from_task_slice;
use pdfregions::validation::{validate_results, ValidateOptions};

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let Ok(task) = from_task_slice(data) else {
        return;
    };

    let _ = validate_results(&task.results, &ValidateOptions::default());

    let store = InMemoryAnnotationStore::with_results(task.results);
    let mut doc = Document::new(DocumentConfig::default());
    doc.needs_update(&store);
    let _ = doc.serialize();
});
