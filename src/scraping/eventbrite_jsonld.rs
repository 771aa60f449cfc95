//! Eventbrite's listing pages embed schema.org JSON-LD blocks. Each block
//! is an `Event`, an `ItemList` of events, or a bare array; blocks that do
//! not decode are skipped per block, never fatal to the adapter. Dates come
//! machine-formatted, so no free-text parsing happens here, but the feed
//! mixes in online-only events and events from the wrong town, which both
//! get filtered out.

use anyhow::Result;
use chrono::NaiveTime;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use serde_json::Value;

use super::base;
use super::{EventSource, SourceBatch};
use crate::config::ScrapeConfig;
use crate::dates;
use crate::models::RawEvent;

const SOURCE_ID: &str = "eventbrite";
const SOURCE_NAME: &str = "Eventbrite";

static JSON_LD_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"script[type="application/ld+json"]"#).expect("json-ld selector")
});

pub struct Eventbrite;

impl EventSource for Eventbrite {
    fn source_id(&self) -> &'static str {
        SOURCE_ID
    }

    fn source_name(&self) -> &'static str {
        SOURCE_NAME
    }

    fn fetch(&self, config: &ScrapeConfig) -> Result<SourceBatch> {
        let html = base::fetch_html(config, &config.eventbrite_url)?;
        Ok(self.parse_document(&html, config))
    }
}

impl Eventbrite {
    pub(crate) fn parse_document(&self, html: &str, config: &ScrapeConfig) -> SourceBatch {
        let document = Html::parse_document(html);
        let mut batch = SourceBatch::default();

        for script in document.select(&JSON_LD_SELECTOR) {
            let payload = script.text().collect::<String>();
            let data: Value = match serde_json::from_str(&payload) {
                Ok(value) => value,
                Err(_) => {
                    batch.skipped += 1;
                    continue;
                }
            };

            for node in event_nodes(&data) {
                // ItemList entries wrap the event in an `item` field.
                let node = node.get("item").unwrap_or(node);
                if node.get("@type").and_then(Value::as_str) != Some("Event") {
                    continue;
                }
                match parse_event_node(node, config) {
                    Some(record) => batch.records.push(record),
                    None => batch.skipped += 1,
                }
            }
        }

        batch
    }
}

fn event_nodes(data: &Value) -> Vec<&Value> {
    match data {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) => match map.get("@type").and_then(Value::as_str) {
            Some("Event") => vec![data],
            Some("ItemList") => map
                .get("itemListElement")
                .and_then(Value::as_array)
                .map(|items| items.iter().collect())
                .unwrap_or_default(),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

fn parse_event_node(node: &Value, config: &ScrapeConfig) -> Option<RawEvent> {
    let title = node
        .get("name")
        .and_then(Value::as_str)
        .map(base::clean_text)
        .filter(|name| !name.is_empty())?;

    let start_text = node.get("startDate").and_then(Value::as_str)?;
    let published_start = dates::parse_iso(start_text)?;

    let duration_minutes = node
        .get("endDate")
        .and_then(Value::as_str)
        .and_then(dates::parse_iso)
        .map(|end| end.signed_duration_since(published_start).num_minutes());

    // Listings with a bare date come through as midnight; assume an
    // evening show instead.
    let start = if published_start.time() == NaiveTime::MIN {
        published_start
            .date()
            .and_time(NaiveTime::from_hms_opt(19, 0, 0)?)
    } else {
        published_start
    };

    let location = node.get("location");
    let location_name = location
        .and_then(|loc| loc.get("name"))
        .and_then(Value::as_str)
        .map(base::clean_text)
        .filter(|name| !name.is_empty())?;
    if location_name.to_lowercase().contains("online") {
        return None;
    }

    let address = assemble_address(location.and_then(|loc| loc.get("address")))?;
    // Keep only events actually in the target town.
    let address_lower = address.to_lowercase();
    if !address_lower.contains(&config.locality.to_lowercase())
        || !address_lower.contains(&config.region.to_lowercase())
    {
        return None;
    }

    let url = node
        .get("url")
        .and_then(Value::as_str)
        .unwrap_or(&config.eventbrite_url)
        .to_string();

    let description = node
        .get("description")
        .and_then(Value::as_str)
        .map(base::clean_text)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| format!("Event at {location_name}"));

    Some(RawEvent {
        title,
        description,
        schema_datetime: None,
        datetime_text: Some(start.format("%Y-%m-%dT%H:%M:%S").to_string()),
        duration_minutes,
        location: location_name,
        address: Some(address),
        url,
        image_url: image_url(node.get("image")),
    })
}

fn assemble_address(address: Option<&Value>) -> Option<String> {
    match address? {
        Value::String(text) => {
            let cleaned = base::clean_text(text);
            if cleaned.is_empty() {
                None
            } else {
                Some(cleaned)
            }
        }
        Value::Object(fields) => {
            let parts: Vec<&str> = [
                "streetAddress",
                "addressLocality",
                "addressRegion",
                "postalCode",
            ]
            .iter()
            .filter_map(|key| fields.get(*key).and_then(Value::as_str))
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }
        _ => None,
    }
}

fn image_url(image: Option<&Value>) -> Option<String> {
    let image = image?;
    let image = match image {
        Value::Array(items) => items.first()?,
        other => other,
    };
    match image {
        Value::String(url) => Some(url.clone()),
        Value::Object(map) => map
            .get("url")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}
