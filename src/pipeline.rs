//! The aggregation pipeline: run every source, normalize, de-duplicate,
//! then drop past events. Order matters — dedupe keeps the first
//! `(title, address)` seen, and only the survivor faces the time filter.
//! One source failing outright degrades the result, never aborts the run.

use std::collections::HashSet;

use chrono::{Local, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::config::ScrapeConfig;
use crate::dates;
use crate::models::Event;
use crate::normalize::normalize_event;
use crate::scraping::EventSource;

#[derive(Debug, Clone, Serialize)]
pub struct SourceReport {
    pub source_id: String,
    pub fetched: usize,
    pub skipped: usize,
    /// Transport-level failure, when the source could not be read at all.
    pub error: Option<String>,
}

/// Per-stage counts for one pipeline run. Lets the caller tell "no events
/// found" apart from "sources failed".
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScrapeReport {
    pub sources: Vec<SourceReport>,
    pub duplicates_removed: usize,
    pub past_filtered: usize,
    pub kept: usize,
}

/// Runs the whole pipeline against the local clock.
pub fn run(
    sources: &[Box<dyn EventSource>],
    config: &ScrapeConfig,
) -> (Vec<Event>, ScrapeReport) {
    let start_of_today = Local::now().date_naive().and_time(NaiveTime::MIN);
    run_at(sources, config, start_of_today)
}

/// Same as [`run`] with an explicit "start of today" reference instant.
pub fn run_at(
    sources: &[Box<dyn EventSource>],
    config: &ScrapeConfig,
    start_of_today: NaiveDateTime,
) -> (Vec<Event>, ScrapeReport) {
    let mut report = ScrapeReport::default();
    let mut events = Vec::new();

    for source in sources {
        match source.fetch(config) {
            Ok(batch) => {
                report.sources.push(SourceReport {
                    source_id: source.source_id().to_string(),
                    fetched: batch.records.len(),
                    skipped: batch.skipped,
                    error: None,
                });
                for raw in batch.records {
                    let event = normalize_event(raw, config);
                    if config.verbose {
                        println!("  {} [{}]", event.title, source.source_id());
                    }
                    events.push(event);
                }
            }
            Err(err) => {
                eprintln!("source {} failed: {err:#}", source.source_id());
                report.sources.push(SourceReport {
                    source_id: source.source_id().to_string(),
                    fetched: 0,
                    skipped: 0,
                    error: Some(format!("{err:#}")),
                });
            }
        }
    }

    let (events, duplicates_removed) = dedupe_events(events);
    report.duplicates_removed = duplicates_removed;

    let (events, past_filtered) = filter_future(events, start_of_today);
    report.past_filtered = past_filtered;
    report.kept = events.len();

    (events, report)
}

/// Collapses events sharing a `(title, address)` identity key, keeping the
/// first one encountered. Seen-state lives only for this invocation.
pub fn dedupe_events(events: Vec<Event>) -> (Vec<Event>, usize) {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut unique = Vec::with_capacity(events.len());
    let mut removed = 0;

    for event in events {
        if seen.insert(event.identity_key()) {
            unique.push(event);
        } else {
            removed += 1;
        }
    }

    (unique, removed)
}

/// Keeps events happening today or later. Fail-open: an event whose time
/// never parsed (or re-parses badly) stays in rather than vanishing from
/// the kiosk.
pub fn filter_future(
    events: Vec<Event>,
    start_of_today: NaiveDateTime,
) -> (Vec<Event>, usize) {
    let mut future = Vec::with_capacity(events.len());
    let mut past = 0;

    for event in events {
        let keep = match event.time.as_deref().and_then(dates::parse_event_time) {
            Some(time) => time >= start_of_today,
            None => true,
        };
        if keep {
            future.push(event);
        } else {
            past += 1;
        }
    }

    (future, past)
}
