//! Criterion microbenches for pdfregions rebuild and serialization.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure:
//! - Task JSON parsing (from_task_str)
//! - Region rebuild from the store (needs_update)
//! - Region serialization (Document::serialize)

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use pdfregions::annotation::{AnnotationResult, InMemoryAnnotationStore, Origin, ResultRequest};
use pdfregions::document::{Document, DocumentConfig};
use pdfregions::geometry::{PagePosition, Position, RandomIdGenerator, Rect, RegionId};
use pdfregions::serialize::task::from_task_str;

// Include test fixtures at compile time (no file I/O during benchmark)
const TASK_FIXTURE: &str = include_str!("../tests/fixtures/sample_valid.task.json");

/// Synthetic results: one labeling result per area plus a second result on
/// every fourth area.
fn synthetic_results(areas: usize) -> Vec<AnnotationResult> {
    let mut results = Vec::with_capacity(areas + areas / 4);
    for i in 0..areas {
        let position = Position::from(PagePosition::single(
            (i / 20) as u32,
            Rect::new(10.0, (i % 20) as f64 * 30.0, 200.0, 14.0),
        ));
        let request = |from_name: &str, labels: Vec<String>| ResultRequest {
            id: RegionId::new(format!("area{i}")),
            position: position.clone(),
            text: Some(format!("text {i}")),
            value_type: "labels".into(),
            labels,
            from_name: from_name.into(),
            to_name: "pdf".into(),
            origin: Origin::Manual,
        };

        results.push(request("label", vec!["Person".into()]).into_result());
        if i % 4 == 0 {
            results.push(request("extra", vec!["Date".into()]).into_result());
        }
    }
    results
}

fn document() -> Document {
    let mut doc = Document::with_id_generator(
        DocumentConfig::new("pdf", "paper.pdf"),
        RandomIdGenerator::seeded(7),
    );
    doc.mark_ready();
    doc
}

/// Benchmark task JSON parsing from string.
fn bench_task_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("task_parse");
    group.throughput(Throughput::Bytes(TASK_FIXTURE.len() as u64));

    group.bench_function("from_task_str", |b| {
        b.iter(|| {
            let task = from_task_str(black_box(TASK_FIXTURE)).unwrap();
            black_box(task)
        })
    });

    group.finish();
}

/// Benchmark rebuilding regions from stores of increasing size.
fn bench_needs_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("needs_update");

    for areas in [10usize, 100, 1000] {
        let store = InMemoryAnnotationStore::with_results(synthetic_results(areas));
        let mut doc = document();
        group.throughput(Throughput::Elements(areas as u64));

        group.bench_with_input(BenchmarkId::from_parameter(areas), &store, |b, store| {
            b.iter(|| black_box(doc.needs_update(black_box(store))))
        });
    }

    group.finish();
}

/// Benchmark serializing every region of a document.
fn bench_serialize(c: &mut Criterion) {
    let store = InMemoryAnnotationStore::with_results(synthetic_results(500));
    let mut doc = document();
    doc.needs_update(&store);

    let mut group = c.benchmark_group("serialize");
    group.throughput(Throughput::Elements(doc.regions().len() as u64));

    group.bench_function("document_serialize", |b| {
        b.iter(|| black_box(black_box(&doc).serialize()))
    });

    group.bench_function("to_json_string", |b| {
        b.iter(|| {
            let json = serde_json::to_string(&doc.serialize()).unwrap();
            black_box(json)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_task_parse,
    bench_needs_update,
    bench_serialize
);
criterion_main!(benches);
