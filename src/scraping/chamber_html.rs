//! Chamber of Commerce calendar: server-rendered HTML cards with
//! class-tagged sub-elements. Cards carry a schema.org `startDate` meta
//! attribute when the calendar widget renders one; that machine-readable
//! value outranks the free-text month/day/time fragments.

use anyhow::Result;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use super::base;
use super::{EventSource, SourceBatch};
use crate::config::ScrapeConfig;
use crate::models::RawEvent;

const SOURCE_ID: &str = "chamber";
const SOURCE_NAME: &str = "Chamber of Commerce Calendar";

static CARD_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".gz-list-col, .gz-grid-col, .gz-calendar-col").expect("chamber card selector")
});
// Looser match for layout variants the widget sometimes serves.
static FALLBACK_CARD_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"[class*="gz-"][class*="-col"]"#).expect("chamber fallback selector")
});
static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a.gz-card-title").expect("chamber title selector"));
static MONTH_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".gz-start-dt").expect("chamber month selector"));
static DAY_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".gz-start-dy").expect("chamber day selector"));
static TIME_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h5.gz-event-card-time").expect("chamber time selector"));
static SCHEMA_DATE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[itemprop="startDate"]"#).expect("chamber schema date"));
static LOCATION_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#".gz-location, .gz-venue, [class*="location"]"#)
        .expect("chamber location selector")
});
static DESCRIPTION_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".gz-description, .gz-event-description, p").expect("chamber description")
});

pub struct ChamberCalendar;

impl EventSource for ChamberCalendar {
    fn source_id(&self) -> &'static str {
        SOURCE_ID
    }

    fn source_name(&self) -> &'static str {
        SOURCE_NAME
    }

    fn fetch(&self, config: &ScrapeConfig) -> Result<SourceBatch> {
        let html = base::fetch_html(config, &config.chamber_url)?;
        Ok(self.parse_document(&html, &config.chamber_url))
    }
}

impl ChamberCalendar {
    pub(crate) fn parse_document(&self, html: &str, base_url: &str) -> SourceBatch {
        let document = Html::parse_document(html);

        let mut cards: Vec<ElementRef<'_>> = document.select(&CARD_SELECTOR).collect();
        if cards.is_empty() {
            cards = document.select(&FALLBACK_CARD_SELECTOR).collect();
        }

        let mut batch = SourceBatch::default();
        for card in cards {
            match parse_card(&card, base_url) {
                Some(record) => batch.records.push(record),
                None => batch.skipped += 1,
            }
        }
        batch
    }
}

fn parse_card(card: &ElementRef<'_>, base_url: &str) -> Option<RawEvent> {
    let title = base::first_text(card, &TITLE_SELECTOR)?;

    let url = base::absolute_url(base_url, base::first_attr(card, &TITLE_SELECTOR, "href"))
        .unwrap_or_default();

    let month_text = base::first_text(card, &MONTH_SELECTOR).unwrap_or_default();
    let day_text = base::first_text(card, &DAY_SELECTOR).unwrap_or_default();
    let time_text = base::first_text(card, &TIME_SELECTOR).unwrap_or_default();

    let schema_datetime = base::first_attr(card, &SCHEMA_DATE_SELECTOR, "content")
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());

    let datetime_text = base::clean_text(&format!("{month_text} {day_text} {time_text}"));
    let datetime_text = if datetime_text.is_empty() {
        None
    } else {
        Some(datetime_text)
    };

    // A card with no date candidate at all is noise, not an event.
    if schema_datetime.is_none() && datetime_text.is_none() {
        return None;
    }

    let location = base::first_text(card, &LOCATION_SELECTOR).unwrap_or_default();
    let description = base::first_text(card, &DESCRIPTION_SELECTOR).unwrap_or_default();

    Some(RawEvent {
        title,
        description,
        schema_datetime,
        datetime_text,
        duration_minutes: None,
        location,
        address: None,
        url,
        image_url: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
    <div class="gz-list-col">
        <meta itemprop="startDate" content="1/15/2026 9:00:00 AM">
        <a class="gz-card-title" href="/events/details/business-before-hours-1234">Business Before Hours</a>
        <div class="gz-event-date">
            <span class="gz-start-dt">JAN</span>
            <span class="gz-start-dy">15</span>
        </div>
        <h5 class="gz-event-card-time">9:00 AM - 11:00 AM</h5>
        <div class="gz-location">12Degree Brewing</div>
        <p class="gz-description">Monthly networking over coffee at 820 Main St.</p>
    </div>
    <div class="gz-list-col">
        <a class="gz-card-title" href="https://business.louisvillechamber.com/events/details/awards-dinner">Annual Awards Dinner</a>
        <div class="gz-event-date">
            <span class="gz-start-dt">FEB</span>
            <span class="gz-start-dy">28</span>
        </div>
        <h5 class="gz-event-card-time">6:00 PM - 9:00 PM</h5>
        <div class="gz-venue">Louisville Center for the Arts</div>
    </div>
    <div class="gz-list-col">
        <div class="gz-event-date"><span class="gz-start-dt">MAR</span></div>
    </div>
    "#;

    #[test]
    fn parses_cards_and_skips_titleless_ones() {
        let batch =
            ChamberCalendar.parse_document(SAMPLE_HTML, "https://business.louisvillechamber.com/");
        assert_eq!(batch.records.len(), 2);
        assert_eq!(batch.skipped, 1);

        let first = &batch.records[0];
        assert_eq!(first.title, "Business Before Hours");
        assert_eq!(first.schema_datetime.as_deref(), Some("1/15/2026 9:00:00 AM"));
        assert_eq!(first.datetime_text.as_deref(), Some("JAN 15 9:00 AM - 11:00 AM"));
        assert_eq!(first.location, "12Degree Brewing");
        assert_eq!(
            first.url,
            "https://business.louisvillechamber.com/events/details/business-before-hours-1234"
        );

        let second = &batch.records[1];
        assert_eq!(second.schema_datetime, None);
        assert_eq!(second.datetime_text.as_deref(), Some("FEB 28 6:00 PM - 9:00 PM"));
        assert_eq!(second.location, "Louisville Center for the Arts");
    }

    #[test]
    fn empty_page_yields_empty_batch() {
        let batch = ChamberCalendar.parse_document("<html><body></body></html>", "https://x.test/");
        assert!(batch.records.is_empty());
        assert_eq!(batch.skipped, 0);
    }
}
