//! `{placeholder}` substitution for dictionary templates.

use regex::{Captures, Regex};
use std::sync::OnceLock;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX.get_or_init(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").unwrap())
}

/// Replace every `{name}` token with the matching value.
///
/// Tokens without a supplied value are left verbatim.
pub fn interpolate(template: &str, values: &[(&str, &str)]) -> String {
    if values.is_empty() {
        return template.to_string();
    }

    placeholder_regex()
        .replace_all(template, |caps: &Captures| {
            let name = &caps[1];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Names of all placeholders in a template, in order of appearance.
pub fn placeholders(template: &str) -> Vec<String> {
    placeholder_regex()
        .captures_iter(template)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_single() {
        assert_eq!(interpolate("Hi {name}", &[("name", "Ana")]), "Hi Ana");
    }

    #[test]
    fn test_interpolate_missing_value_left_literal() {
        assert_eq!(interpolate("Hi {name}", &[("other", "x")]), "Hi {name}");
        assert_eq!(interpolate("Hi {name}", &[]), "Hi {name}");
    }

    #[test]
    fn test_interpolate_repeated_and_multiple() {
        let result = interpolate(
            "{kids} kids, {hours} hours, {kids} again",
            &[("kids", "2"), ("hours", "3")],
        );
        assert_eq!(result, "2 kids, 3 hours, 2 again");
    }

    #[test]
    fn test_interpolate_ignores_non_word_tokens() {
        assert_eq!(
            interpolate("{ name } {na-me} {}", &[("name", "Ana")]),
            "{ name } {na-me} {}"
        );
    }

    #[test]
    fn test_interpolate_names_are_ascii_only() {
        assert_eq!(interpolate("Привет, {имя}", &[("имя", "Аня")]), "Привет, {имя}");
        assert_eq!(placeholders("{имя} {name_2}"), vec!["name_2"]);
    }

    #[test]
    fn test_interpolate_value_is_not_reexpanded() {
        assert_eq!(
            interpolate("{a} {b}", &[("a", "{b}"), ("b", "B")]),
            "{b} B"
        );
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(
            placeholders("Thanks {name}! See you in {hours} hours"),
            vec!["name", "hours"]
        );
        assert!(placeholders("No tokens").is_empty());
    }
}
