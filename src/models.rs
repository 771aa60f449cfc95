use serde::{Deserialize, Serialize};

/// Source-native event data as one adapter extracted it, before
/// normalization. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct RawEvent {
    pub title: String,
    pub description: String,
    /// Machine-readable start attribute, e.g. `1/15/2026 9:00:00 AM`.
    /// Takes priority over `datetime_text` when it parses.
    pub schema_datetime: Option<String>,
    /// Free-text or ISO date/time for the fallback parsing chain.
    pub datetime_text: Option<String>,
    pub duration_minutes: Option<i64>,
    pub location: String,
    /// Pre-assembled street address from sources that carry structured
    /// location data. When absent the address resolver derives one.
    pub address: Option<String>,
    pub url: String,
    pub image_url: Option<String>,
}

/// Canonical event record, ready for persistence.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Event {
    pub title: String,
    pub description: String,
    /// ISO-8601 local timestamp. None means the date could not be parsed;
    /// such events are kept and pass the time-window filter unconditionally.
    pub time: Option<String>,
    #[serde(rename = "duration")]
    pub duration_minutes: i64,
    pub location: String,
    /// Always non-empty: falls back to `location`, then the configured
    /// default address.
    pub address: String,
    pub url: String,
    /// Local-relative asset path once the image downloader has run;
    /// a remote URL straight out of an adapter before that.
    pub image: Option<String>,
    pub is_major: bool,
    pub related_business: Option<String>,
}

impl Event {
    /// Key used to detect duplicate events. Exact, case-sensitive.
    pub fn identity_key(&self) -> (String, String) {
        (self.title.clone(), self.address.clone())
    }
}
