//! Image downloader: fetches each event's remote image into the local
//! images directory and rewrites the event to carry the kiosk-relative path.

use std::fs;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::config::ScrapeConfig;
use crate::models::Event;
use crate::scraping::base;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("http error: {0}")]
    Http(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

const ALLOWED_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

static NON_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s-]").expect("slug strip regex"));
static SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s_-]+").expect("slug separator regex"));

pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = NON_WORD_RE.replace_all(&lowered, "");
    SEPARATOR_RE
        .replace_all(&stripped, "-")
        .trim_matches('-')
        .to_string()
}

/// Replaces remote image URLs on the surviving events with downloaded
/// local-relative paths. With `skip_images` set, or on any download
/// failure, the image field is simply cleared.
pub fn localize_images(events: &mut [Event], config: &ScrapeConfig) {
    for event in events.iter_mut() {
        let Some(image) = event.image.take() else {
            continue;
        };
        if !image.starts_with("http://") && !image.starts_with("https://") {
            // Already a local path; leave it alone.
            event.image = Some(image);
            continue;
        }
        if config.skip_images {
            continue;
        }
        match download_event_image(config, &image, &event.title) {
            Ok(local_path) => event.image = Some(local_path),
            Err(err) => {
                eprintln!("image download failed for '{}': {err}", event.title);
            }
        }
    }
}

/// Downloads one image and returns the kiosk-relative path
/// `images/events/<slug>.<ext>`.
pub fn download_event_image(
    config: &ScrapeConfig,
    image_url: &str,
    event_title: &str,
) -> Result<String, ImageError> {
    let filename = image_filename(image_url, event_title);
    fs::create_dir_all(&config.images_dir)?;

    let client = base::http_client(config).map_err(|err| ImageError::Http(err.to_string()))?;
    let response = client
        .get(image_url)
        .send()
        .and_then(|response| response.error_for_status())
        .map_err(|err| ImageError::Http(err.to_string()))?;
    let bytes = response
        .bytes()
        .map_err(|err| ImageError::Http(err.to_string()))?;

    let target = config.images_dir.join(&filename);
    fs::write(&target, &bytes)?;

    Ok(format!("images/events/{filename}"))
}

fn image_filename(image_url: &str, event_title: &str) -> String {
    let mut slug = slugify(event_title);
    if slug.is_empty() {
        slug = "event".to_string();
    }
    format!("{slug}.{}", extension_for(image_url))
}

fn extension_for(image_url: &str) -> String {
    let trimmed = image_url.split('?').next().unwrap_or(image_url);
    let candidate = trimmed.rsplit('.').next().unwrap_or("").to_lowercase();
    if ALLOWED_EXTENSIONS.contains(&candidate.as_str()) {
        candidate
    } else {
        "jpg".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_flattens_titles() {
        assert_eq!(slugify("Taste of Louisville 2026!"), "taste-of-louisville-2026");
        assert_eq!(slugify("Shopey's  Pizza_Night"), "shopeys-pizza-night");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn filename_uses_whitelisted_extension() {
        assert_eq!(
            image_filename("https://img.example.com/a/b.PNG?w=640", "Open Mic"),
            "open-mic.png"
        );
        assert_eq!(
            image_filename("https://img.example.com/a/no-extension", "Open Mic"),
            "open-mic.jpg"
        );
        assert_eq!(
            image_filename("https://img.example.com/evil.svg", "!!!"),
            "event.jpg"
        );
    }

    #[test]
    fn skip_images_clears_remote_urls() {
        let mut config = ScrapeConfig::default();
        config.skip_images = true;
        let mut events = vec![Event {
            title: "Concert".to_string(),
            description: String::new(),
            time: None,
            duration_minutes: 120,
            location: String::new(),
            address: "x".to_string(),
            url: String::new(),
            image: Some("https://img.example.com/poster.jpg".to_string()),
            is_major: false,
            related_business: None,
        }];
        localize_images(&mut events, &config);
        assert_eq!(events[0].image, None);
    }

    #[test]
    fn local_paths_are_left_untouched() {
        let config = ScrapeConfig::default();
        let mut events = vec![Event {
            title: "Concert".to_string(),
            description: String::new(),
            time: None,
            duration_minutes: 120,
            location: String::new(),
            address: "x".to_string(),
            url: String::new(),
            image: Some("images/events/concert.jpg".to_string()),
            is_major: false,
            related_business: None,
        }];
        localize_images(&mut events, &config);
        assert_eq!(events[0].image.as_deref(), Some("images/events/concert.jpg"));
    }
}
