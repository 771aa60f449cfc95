use std::{fs, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::utils;

/// Everything the pipeline needs that varies per deployment: source URLs,
/// locality defaults for address resolution, the known-business registry,
/// and output locations. Passed by reference into the aggregator and the
/// adapters; there are no module-level defaults baked into the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    pub chamber_url: String,
    pub eventbrite_url: String,
    pub user_agent: String,
    pub http_timeout_secs: u64,
    pub locality: String,
    pub region: String,
    pub postal_code: String,
    /// Used when neither an address nor a location could be extracted.
    pub default_address: String,
    /// Title keywords that mark an event as major.
    pub major_keywords: Vec<String>,
    /// Known local businesses, in match-priority order.
    pub businesses: Vec<String>,
    pub output_file: PathBuf,
    pub images_dir: PathBuf,
    pub skip_images: bool,
    pub verbose: bool,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            chamber_url: "https://business.louisvillechamber.com/chambercalendar".to_string(),
            eventbrite_url: "https://www.eventbrite.com/d/co--louisville/events/".to_string(),
            user_agent: "Louisville-Kiosk/1.0".to_string(),
            http_timeout_secs: 15,
            locality: "Louisville".to_string(),
            region: "CO".to_string(),
            postal_code: "80027".to_string(),
            default_address: "Louisville, CO 80027".to_string(),
            major_keywords: vec![
                "festival".to_string(),
                "taste of louisville".to_string(),
                "pints in the park".to_string(),
                "golf scramble".to_string(),
                "awards dinner".to_string(),
                "summerfest".to_string(),
            ],
            businesses: vec![
                "12Degree Brewing".to_string(),
                "Bittersweet Cafe".to_string(),
                "Moxie Bread".to_string(),
                "Shopey's Pizza".to_string(),
                "Louisville Center for the Arts".to_string(),
                "The Louisville Underground".to_string(),
            ],
            output_file: utils::data_root().join("events.json"),
            images_dir: utils::data_root().join("images").join("events"),
            skip_images: false,
            verbose: false,
        }
    }
}

impl ScrapeConfig {
    /// Reads the config file named by `KIOSK_SCRAPE_CONFIG`, or the one in
    /// the platform data dir. Missing or unreadable files fall back to the
    /// defaults above.
    pub fn load() -> Self {
        let path = std::env::var_os("KIOSK_SCRAPE_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(utils::config_path);
        match read_config(&path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("using default config, {:?} not loaded: {err}", path);
                Self::default()
            }
        }
    }

    /// The `", Louisville, CO 80027"` style suffix appended to bare street
    /// addresses by the address resolver.
    pub fn locality_suffix(&self) -> String {
        format!(", {}, {} {}", self.locality, self.region, self.postal_code)
    }
}

fn read_config(path: &PathBuf) -> anyhow::Result<ScrapeConfig> {
    if !path.exists() {
        return Ok(ScrapeConfig::default());
    }
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
