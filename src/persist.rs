//! Writes the final event sequence for the kiosk renderer, with a short
//! human-readable header ahead of the structured payload.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;

use crate::models::Event;
use crate::utils;

#[derive(Serialize)]
struct EventFeed<'a> {
    events: &'a [Event],
    last_updated: String,
}

pub fn save_events(path: &Path, events: &[Event], locality: &str, region: &str) -> Result<()> {
    utils::ensure_parent(&path.to_path_buf());

    let now = Local::now();
    let feed = EventFeed {
        events,
        last_updated: now.format("%Y-%m-%dT%H:%M:%S").to_string(),
    };

    let mut contents = String::new();
    contents.push_str(&format!("# {locality} {region} Events\n"));
    contents.push_str(&format!(
        "# Last updated: {}\n",
        now.format("%Y-%m-%d %H:%M:%S")
    ));
    contents.push_str(&format!("# Total events: {}\n\n", events.len()));
    contents.push_str(
        &serde_json::to_string_pretty(&feed).context("serializing event feed")?,
    );
    contents.push('\n');

    fs::write(path, contents).with_context(|| format!("writing {path:?}"))
}
