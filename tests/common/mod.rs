#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use pdfregions::annotation::{LabelDef, StaticLabelControl};
use pdfregions::document::{Document, DocumentConfig};
use pdfregions::geometry::{RandomIdGenerator, Rect, RegionId};
use pdfregions::region::Highlight;
use pdfregions::visual::HighlightRenderer;
use tracing::field::{Field, Visit};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

pub fn ready_document(seed: u64) -> Document {
    let mut doc = Document::with_id_generator(
        DocumentConfig::new("pdf", "https://example.com/paper.pdf"),
        RandomIdGenerator::seeded(seed),
    );
    doc.mark_ready();
    doc
}

/// A "label" control for the "pdf" document with Person (red) and Date.
pub fn label_control() -> StaticLabelControl {
    StaticLabelControl::new(
        "label",
        "pdf",
        vec![
            LabelDef::new("Person").with_background("#FF0000"),
            LabelDef::new("Date").with_background("#00AA00"),
        ],
    )
}

/// Renderer that draws one part per rect of a highlight's page position.
#[derive(Debug)]
pub struct FakeRenderer {
    pub parts: HashMap<RegionId, Vec<(String, bool)>>,
    pub bounds: HashMap<RegionId, Rect>,
    pub viewport: Rect,
    pub scrolls: Vec<RegionId>,
    pub redraws: usize,
}

impl FakeRenderer {
    pub fn new(viewport: Rect) -> Self {
        Self {
            parts: HashMap::new(),
            bounds: HashMap::new(),
            viewport,
            scrolls: Vec::new(),
            redraws: 0,
        }
    }

    pub fn styles(&self, id: &RegionId) -> &[(String, bool)] {
        self.parts.get(id).map_or(&[], Vec::as_slice)
    }
}

impl HighlightRenderer for FakeRenderer {
    fn part_count(&self, id: &RegionId) -> usize {
        self.parts.get(id).map_or(0, Vec::len)
    }

    fn set_part_style(&mut self, id: &RegionId, part: usize, color: &str, visible: bool) {
        if let Some(slot) = self.parts.get_mut(id).and_then(|parts| parts.get_mut(part)) {
            *slot = (color.to_string(), visible);
        }
    }

    fn rendered_bounds(&self, id: &RegionId) -> Option<Rect> {
        self.bounds.get(id).copied()
    }

    fn viewport(&self) -> Rect {
        self.viewport
    }

    fn scroll_into_view(&mut self, id: &RegionId) {
        self.scrolls.push(id.clone());
    }

    fn redraw(&mut self, highlights: &[Highlight]) {
        self.redraws += 1;
        self.parts.clear();
        self.bounds.clear();

        for highlight in highlights {
            let Some(page) = highlight.position.page_position() else {
                continue;
            };
            let count = page.rects.len().max(1);
            self.parts
                .insert(highlight.id.clone(), vec![(String::new(), false); count]);
            self.bounds
                .insert(highlight.id.clone(), page.bounding_rect);
        }
    }
}

/// One captured log event.
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: tracing::Level,
    pub message: String,
    pub fields: HashMap<String, String>,
}

struct FieldVisitor<'a>(&'a mut HashMap<String, String>);

impl Visit for FieldVisitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.0
            .insert(field.name().to_string(), format!("{value:?}"));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }
}

struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S: tracing::Subscriber> Layer<S> for EventCapture {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = HashMap::new();
        event.record(&mut FieldVisitor(&mut fields));
        let message = fields.remove("message").unwrap_or_default();

        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message,
            fields,
        });
    }
}

/// Runs `f` with a subscriber that records every event.
pub fn with_captured_events<T>(f: impl FnOnce() -> T) -> (T, Vec<CapturedEvent>) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(EventCapture {
        events: Arc::clone(&events),
    });

    let output = tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();
    (output, captured)
}
