use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use scraper::{ElementRef, Selector};

use crate::config::ScrapeConfig;

pub fn clean_text(input: &str) -> String {
    input
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

pub fn inner_text(element: ElementRef<'_>) -> String {
    clean_text(&element.text().collect::<Vec<_>>().join(" "))
}

pub fn first_text(element: &ElementRef<'_>, selector: &Selector) -> Option<String> {
    element
        .select(selector)
        .next()
        .map(|node| {
            let cleaned = inner_text(node);
            if cleaned.is_empty() {
                None
            } else {
                Some(cleaned)
            }
        })
        .flatten()
}

pub fn first_attr(element: &ElementRef<'_>, selector: &Selector, attr: &str) -> Option<String> {
    element
        .select(selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(str::to_string)
}

pub fn absolute_url(base: &str, href: Option<String>) -> Option<String> {
    let href = href?;
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href);
    }
    let base_url = reqwest::Url::parse(base).ok()?;
    base_url.join(&href).ok().map(|u| u.to_string())
}

/// Client shared by the adapters and the image downloader. The per-request
/// timeout keeps one slow source from stalling the whole run.
pub fn http_client(config: &ScrapeConfig) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .user_agent(config.user_agent.clone())
        .build()
        .context("building http client")
}

pub fn fetch_html(config: &ScrapeConfig, url: &str) -> Result<String> {
    let response = http_client(config)?
        .get(url)
        .send()
        .with_context(|| format!("request failed for {url}"))?;
    let response = response
        .error_for_status()
        .with_context(|| format!("non-success status for {url}"))?;
    response
        .text()
        .with_context(|| format!("unable to read response body for {url}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_collapses_whitespace() {
        assert_eq!(clean_text("  Board\n  Meeting \t "), "Board Meeting");
        assert_eq!(clean_text(""), "");
    }

    #[test]
    fn absolute_url_resolves_relative_hrefs() {
        assert_eq!(
            absolute_url(
                "https://example.com/calendar",
                Some("/events/1".to_string())
            )
            .as_deref(),
            Some("https://example.com/events/1")
        );
        assert_eq!(
            absolute_url("https://example.com", Some("https://other.net/e".to_string())).as_deref(),
            Some("https://other.net/e")
        );
        assert_eq!(absolute_url("https://example.com", None), None);
    }
}
