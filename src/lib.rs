//! Event ingestion and normalization pipeline for the Louisville, CO kiosk
//! display. Source adapters pull raw listings from external calendars, the
//! normalizer reconciles their date, address, and business-identity quirks
//! into one canonical schema, and the aggregator de-duplicates and trims
//! the result to a forward-looking window.

pub mod address;
pub mod business;
pub mod config;
pub mod dates;
pub mod images;
pub mod models;
pub mod normalize;
pub mod persist;
pub mod pipeline;
pub mod scraping;
mod utils;

pub use config::ScrapeConfig;
pub use models::{Event, RawEvent};
pub use pipeline::{ScrapeReport, SourceReport};
