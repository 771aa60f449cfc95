//! Date/time normalization. Every source hands us dates in a different
//! shape, so parsing is an ordered list of strategies and the first one
//! that succeeds wins:
//!
//! 1. machine-readable attribute (`1/15/2026 9:00:00 AM` and friends)
//! 2. ISO-8601 text, with any `Z` or offset stripped to local-naive
//! 3. `weekday? Month Day[, Year] H:MM [AM|PM]` free text
//! 4. date-only free text, defaulting the time to 18:00
//!
//! When all four fail the event keeps a `None` timestamp rather than being
//! dropped; the time-window filter is fail-open for those.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

static TEXTUAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:[A-Za-z]{3}\s+)?([A-Za-z]+)\s+(\d{1,2})(?:,?\s+(\d{4}))?\s+(\d{1,2}):(\d{2})\s*(AM|PM)?")
        .expect("textual datetime regex")
});

static DATE_ONLY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:[A-Za-z]{3}\s+)?([A-Za-z]+)\s+(\d{1,2})(?:,?\s+(\d{4}))?")
        .expect("date-only regex")
});

/// Resolves a raw record's date inputs to a local-naive timestamp, or None
/// when nothing parses.
pub fn normalize_datetime(
    schema_datetime: Option<&str>,
    datetime_text: Option<&str>,
) -> Option<NaiveDateTime> {
    if let Some(parsed) = schema_datetime.and_then(parse_schema_datetime) {
        return Some(parsed);
    }
    let text = datetime_text?.trim();
    if text.is_empty() {
        return None;
    }
    parse_iso(text)
        .or_else(|| parse_textual(text, Local::now().year()))
        .or_else(|| parse_date_only(text, Local::now().year()))
}

/// Strategy 1: fixed machine-readable patterns, as emitted by schema.org
/// `startDate` attributes on the chamber calendar.
pub fn parse_schema_datetime(text: &str) -> Option<NaiveDateTime> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    for fmt in ["%m/%d/%Y %I:%M:%S %p", "%m/%d/%Y %I:%M %p"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(parsed);
        }
    }
    NaiveDate::parse_from_str(trimmed, "%m/%d/%Y")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
}

/// Strategy 2: ISO-8601. Offsets (including `Z`) are stripped, keeping the
/// wall-clock fields as written; the kiosk treats everything as local time.
pub fn parse_iso(text: &str) -> Option<NaiveDateTime> {
    let trimmed = text.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.naive_local());
    }
    trimmed.parse::<NaiveDateTime>().ok()
}

/// Strategy 3: `"THU January 15 9:00 AM"` style text. An omitted year means
/// the current one; 12-hour times convert with the usual noon/midnight
/// rules.
pub fn parse_textual(text: &str, default_year: i32) -> Option<NaiveDateTime> {
    let caps = TEXTUAL_RE.captures(text)?;
    let month = month_number(caps.get(1)?.as_str())?;
    let day: u32 = caps.get(2)?.as_str().parse().ok()?;
    let year: i32 = match caps.get(3) {
        Some(m) => m.as_str().parse().ok()?,
        None => default_year,
    };
    let hour: u32 = caps.get(4)?.as_str().parse().ok()?;
    let minute: u32 = caps.get(5)?.as_str().parse().ok()?;
    let hour = to_24_hour(hour, caps.get(6).map(|m| m.as_str()))?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
    Some(date.and_time(time))
}

/// Strategy 4: date-only text, same grammar minus the time, assumed to
/// start at 18:00.
pub fn parse_date_only(text: &str, default_year: i32) -> Option<NaiveDateTime> {
    let caps = DATE_ONLY_RE.captures(text)?;
    let month = month_number(caps.get(1)?.as_str())?;
    let day: u32 = caps.get(2)?.as_str().parse().ok()?;
    let year: i32 = match caps.get(3) {
        Some(m) => m.as_str().parse().ok()?,
        None => default_year,
    };
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    // No published time; assume an early-evening start.
    Some(date.and_time(NaiveTime::from_hms_opt(18, 0, 0)?))
}

/// Re-parses a canonical `Event::time` string, e.g. for the time-window
/// filter. Tolerates the same ISO shapes as strategy 2.
pub fn parse_event_time(text: &str) -> Option<NaiveDateTime> {
    parse_iso(text)
}

fn month_number(name: &str) -> Option<u32> {
    match name.to_lowercase().as_str() {
        "jan" | "january" => Some(1),
        "feb" | "february" => Some(2),
        "mar" | "march" => Some(3),
        "apr" | "april" => Some(4),
        "may" => Some(5),
        "jun" | "june" => Some(6),
        "jul" | "july" => Some(7),
        "aug" | "august" => Some(8),
        "sep" | "september" => Some(9),
        "oct" | "october" => Some(10),
        "nov" | "november" => Some(11),
        "dec" | "december" => Some(12),
        _ => None,
    }
}

fn to_24_hour(hour: u32, meridiem: Option<&str>) -> Option<u32> {
    let hour = match meridiem.map(str::to_uppercase).as_deref() {
        Some("PM") if hour != 12 => hour + 12,
        Some("AM") if hour == 12 => 0,
        _ => hour,
    };
    if hour < 24 {
        Some(hour)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iso(dt: NaiveDateTime) -> String {
        dt.format("%Y-%m-%dT%H:%M:%S").to_string()
    }

    #[test]
    fn schema_datetime_with_seconds() {
        let parsed = parse_schema_datetime("1/15/2026 9:00:00 AM").expect("parse");
        assert_eq!(iso(parsed), "2026-01-15T09:00:00");
    }

    #[test]
    fn schema_datetime_without_seconds_and_date_only() {
        let parsed = parse_schema_datetime("1/15/2026 9:00 PM").expect("parse");
        assert_eq!(iso(parsed), "2026-01-15T21:00:00");
        let parsed = parse_schema_datetime("1/15/2026").expect("parse");
        assert_eq!(iso(parsed), "2026-01-15T00:00:00");
    }

    #[test]
    fn iso_strips_utc_suffix_and_offsets() {
        let parsed = parse_iso("2026-03-05T19:30:00Z").expect("parse zulu");
        assert_eq!(iso(parsed), "2026-03-05T19:30:00");
        let parsed = parse_iso("2026-03-05T19:30:00-07:00").expect("parse offset");
        assert_eq!(iso(parsed), "2026-03-05T19:30:00");
        let parsed = parse_iso("2026-03-05T19:30:00").expect("parse naive");
        assert_eq!(iso(parsed), "2026-03-05T19:30:00");
    }

    #[test]
    fn textual_with_weekday_and_no_year() {
        let parsed = parse_textual("THU January 15 9:00 AM", 2026).expect("parse");
        assert_eq!(iso(parsed), "2026-01-15T09:00:00");
    }

    #[test]
    fn textual_with_year_and_range_suffix() {
        let parsed = parse_textual("FRI February 28, 2026 10:00 AM - 8:00 PM", 2025).expect("parse");
        assert_eq!(iso(parsed), "2026-02-28T10:00:00");
    }

    #[test]
    fn noon_and_midnight_rules() {
        let noon = parse_textual("June 1 12:00 PM", 2026).expect("noon");
        assert_eq!(iso(noon), "2026-06-01T12:00:00");
        let midnight = parse_textual("June 1 12:30 AM", 2026).expect("midnight");
        assert_eq!(iso(midnight), "2026-06-01T00:30:00");
        let evening = parse_textual("June 1 7:15 PM", 2026).expect("evening");
        assert_eq!(iso(evening), "2026-06-01T19:15:00");
    }

    #[test]
    fn date_only_defaults_to_six_pm() {
        let parsed = parse_date_only("SAT March 14", 2026).expect("parse");
        assert_eq!(iso(parsed), "2026-03-14T18:00:00");
        let parsed = parse_date_only("October 3, 2026", 2025).expect("parse");
        assert_eq!(iso(parsed), "2026-10-03T18:00:00");
    }

    #[test]
    fn unknown_month_fails_instead_of_guessing() {
        assert!(parse_textual("Every Tuesday 5:00 PM", 2026).is_none());
        assert!(parse_date_only("TBD soon", 2026).is_none());
    }

    #[test]
    fn schema_attribute_wins_over_text() {
        let parsed = normalize_datetime(
            Some("1/15/2026 9:00:00 AM"),
            Some("THU January 16 7:00 PM"),
        )
        .expect("parse");
        assert_eq!(iso(parsed), "2026-01-15T09:00:00");
    }

    #[test]
    fn falls_through_to_date_only() {
        let year = Local::now().year();
        let parsed = normalize_datetime(None, Some("WED April 22")).expect("parse");
        assert_eq!(iso(parsed), format!("{year}-04-22T18:00:00"));
    }

    #[test]
    fn unparseable_everywhere_is_none() {
        assert_eq!(normalize_datetime(Some("not a date"), Some("call for details")), None);
        assert_eq!(normalize_datetime(None, None), None);
        assert_eq!(normalize_datetime(None, Some("   ")), None);
    }
}
