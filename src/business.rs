/// Returns the first configured business (in registry order) mentioned
/// anywhere in the event's title, description, or location. Containment is
/// case-insensitive substring only, by design.
pub fn match_business(
    title: &str,
    description: &str,
    location: &str,
    registry: &[String],
) -> Option<String> {
    let haystack = format!("{title} {description} {location}").to_lowercase();
    registry
        .iter()
        .filter(|name| !name.trim().is_empty())
        .find(|name| haystack.contains(&name.to_lowercase()))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Vec<String> {
        vec![
            "12Degree Brewing".to_string(),
            "Moxie Bread".to_string(),
            "The Louisville Underground".to_string(),
        ]
    }

    #[test]
    fn finds_business_in_description() {
        let found = match_business(
            "Trivia Night",
            "Join us at 12Degree Brewing tonight for trivia",
            "",
            &registry(),
        );
        assert_eq!(found.as_deref(), Some("12Degree Brewing"));
    }

    #[test]
    fn match_is_case_insensitive() {
        let found = match_business("Live at THE LOUISVILLE UNDERGROUND", "", "", &registry());
        assert_eq!(found.as_deref(), Some("The Louisville Underground"));
    }

    #[test]
    fn registry_order_decides_ties() {
        let found = match_business(
            "Breakfast",
            "Moxie Bread pastries and 12Degree Brewing beer",
            "",
            &registry(),
        );
        assert_eq!(found.as_deref(), Some("12Degree Brewing"));
    }

    #[test]
    fn no_mention_is_none() {
        assert_eq!(match_business("Board Meeting", "City Hall", "", &registry()), None);
        assert_eq!(match_business("Anything", "", "", &[]), None);
    }
}
