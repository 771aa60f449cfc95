use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ScrapeConfig;

static STREET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\d+\s+[\w\s]+(?:street|st|avenue|ave|road|rd|drive|dr|way|boulevard|blvd|lane|ln|court|ct|place|pl)",
    )
    .expect("street address regex")
});

/// Derives a displayable address from the free-text location and
/// description fields. A pattern heuristic, not a geocoder: when the
/// matched street address does not already mention the target locality the
/// configured suffix is appended, and with no match at all it degrades to
/// the raw location, then the default address. Never fails.
pub fn resolve_address(location: &str, description: &str, config: &ScrapeConfig) -> String {
    let combined = format!("{location} {description}");
    if let Some(found) = STREET_RE.find(&combined) {
        let mut address = found.as_str().trim().to_string();
        if !combined
            .to_lowercase()
            .contains(&config.locality.to_lowercase())
        {
            address.push_str(&config.locality_suffix());
        }
        return address;
    }

    let location = location.trim();
    if !location.is_empty() {
        return location.to_string();
    }
    config.default_address.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn street_address_gets_locality_suffix() {
        let config = ScrapeConfig::default();
        assert_eq!(
            resolve_address("123 Main St", "", &config),
            "123 Main St, Louisville, CO 80027"
        );
    }

    #[test]
    fn existing_locality_is_not_doubled() {
        let config = ScrapeConfig::default();
        assert_eq!(
            resolve_address("749 Main Street, Louisville", "", &config),
            "749 Main Street"
        );
    }

    #[test]
    fn address_found_in_description() {
        let config = ScrapeConfig::default();
        let resolved = resolve_address(
            "Community Park",
            "Join us at 955 Bella Vista Drive for music and food",
            &config,
        );
        assert_eq!(resolved, "955 Bella Vista Drive, Louisville, CO 80027");
    }

    #[test]
    fn falls_back_to_location_then_default() {
        let config = ScrapeConfig::default();
        assert_eq!(
            resolve_address("Steinbaugh Pavilion", "no address here", &config),
            "Steinbaugh Pavilion"
        );
        assert_eq!(resolve_address("", "", &config), "Louisville, CO 80027");
        assert_eq!(resolve_address("   ", "", &config), "Louisville, CO 80027");
    }
}
