#![allow(dead_code)]

use pdfregions::annotation::{AnnotationResult, Origin, ResultRequest};
use pdfregions::document::Selection;
use pdfregions::geometry::{PagePosition, Position, Rect, RegionId};
use pdfregions::region::Region;
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};
use serde_json::json;

pub const LABELS: [&str; 4] = ["Person", "Date", "Organization", "Location"];

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

pub fn arb_rect() -> BoxedStrategy<Rect> {
    (0u32..1000, 0u32..1000, 1u32..500, 1u32..200)
        .prop_map(|(x, y, w, h)| Rect::new(x as f64, y as f64, w as f64, h as f64))
        .boxed()
}

pub fn arb_page_position() -> BoxedStrategy<PagePosition> {
    (0u32..50, proptest::collection::vec(arb_rect(), 1..4))
        .prop_filter_map("at least one rect", |(page, rects)| {
            PagePosition::from_rects(page, rects)
        })
        .boxed()
}

pub fn arb_text() -> BoxedStrategy<String> {
    prop_oneof![
        Just(String::new()),
        "[A-Za-z][A-Za-z0-9 ,.]{0,24}",
    ]
    .boxed()
}

pub fn arb_selection() -> BoxedStrategy<Selection> {
    (arb_page_position(), arb_text())
        .prop_map(|(position, text)| Selection::new(position, text))
        .boxed()
}

pub fn arb_label() -> BoxedStrategy<&'static str> {
    proptest::sample::select(LABELS.to_vec()).boxed()
}

/// Results for the "pdf" document. Area ids come from a small pool so
/// some areas carry several results; a few positions are malformed.
pub fn arb_results(max: usize) -> BoxedStrategy<Vec<AnnotationResult>> {
    proptest::collection::vec(
        (
            0u8..12,
            prop_oneof![4 => arb_page_position().prop_map(Position::from), 1 => Just(Position::new(json!({})))],
            proptest::option::of(arb_text()),
            proptest::collection::vec(arb_label(), 0..3),
            prop_oneof![Just("label"), Just("notes")],
        ),
        0..=max,
    )
    .prop_map(|entries| {
        entries
            .into_iter()
            .map(|(area, position, text, labels, from_name)| {
                ResultRequest {
                    id: RegionId::new(format!("area{area}")),
                    position,
                    text,
                    value_type: "labels".into(),
                    labels: labels.into_iter().map(str::to_string).collect(),
                    from_name: from_name.into(),
                    to_name: "pdf".into(),
                    origin: Origin::Manual,
                }
                .into_result()
            })
            .collect()
    })
    .boxed()
}

/// The fields of a region that persistence must reproduce.
pub fn region_semantics(region: &Region) -> (RegionId, Position, Option<String>, Option<String>) {
    (
        region.id.clone(),
        region.position.clone(),
        region.label.clone(),
        region.text.clone(),
    )
}
