pub mod base;
pub mod chamber_html;
pub mod eventbrite_jsonld;

use crate::config::ScrapeConfig;
use crate::models::RawEvent;

/// One adapter's output: the records it extracted plus how many items it
/// had to skip (missing title, no date candidate, malformed block).
#[derive(Debug, Default)]
pub struct SourceBatch {
    pub records: Vec<RawEvent>,
    pub skipped: usize,
}

/// One external event source. A `fetch` error means the source itself was
/// unreachable or unreadable; individual bad items are skipped inside the
/// adapter and only counted.
pub trait EventSource: Send + Sync {
    fn source_id(&self) -> &'static str;
    fn source_name(&self) -> &'static str;
    fn fetch(&self, config: &ScrapeConfig) -> anyhow::Result<SourceBatch>;
}

/// Sources in aggregation priority order. The first source to emit a given
/// `(title, address)` wins at the dedupe stage.
pub fn active_sources() -> Vec<Box<dyn EventSource>> {
    vec![
        Box::new(chamber_html::ChamberCalendar),
        Box::new(eventbrite_jsonld::Eventbrite),
    ]
}
