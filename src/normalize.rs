//! Builds one canonical [`Event`] from one [`RawEvent`]: date resolution,
//! address resolution, business matching, description truncation, and the
//! major-event flag. Normalization never drops a record; a date that defeats
//! every parsing strategy simply leaves `time` unset.

use crate::address;
use crate::business;
use crate::config::ScrapeConfig;
use crate::dates;
use crate::models::{Event, RawEvent};

/// Descriptions sourced from long free text are cut off here.
pub const MAX_DESCRIPTION_CHARS: usize = 200;

/// Assumed length of an event when the source gives no end time.
pub const DEFAULT_DURATION_MINUTES: i64 = 120;

pub fn normalize_event(raw: RawEvent, config: &ScrapeConfig) -> Event {
    let time = dates::normalize_datetime(
        raw.schema_datetime.as_deref(),
        raw.datetime_text.as_deref(),
    )
    .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S").to_string());

    let address = match raw.address {
        Some(ref address) if !address.trim().is_empty() => address.trim().to_string(),
        _ => address::resolve_address(&raw.location, &raw.description, config),
    };

    let related_business = business::match_business(
        &raw.title,
        &raw.description,
        &raw.location,
        &config.businesses,
    );

    Event {
        is_major: is_major_title(&raw.title, &config.major_keywords),
        description: truncate_description(&raw.description),
        time,
        duration_minutes: raw.duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES).max(0),
        title: raw.title,
        location: raw.location,
        address,
        url: raw.url,
        image: raw.image_url,
        related_business,
    }
}

fn is_major_title(title: &str, keywords: &[String]) -> bool {
    let lowered = title.to_lowercase();
    keywords
        .iter()
        .any(|keyword| !keyword.is_empty() && lowered.contains(&keyword.to_lowercase()))
}

fn truncate_description(description: &str) -> String {
    let description = description.trim();
    if description.chars().count() <= MAX_DESCRIPTION_CHARS {
        return description.to_string();
    }
    let mut truncated: String = description.chars().take(MAX_DESCRIPTION_CHARS).collect();
    truncated.push_str("...");
    truncated
}
