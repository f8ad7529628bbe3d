//! Best-effort extraction of JSON fragments from free-form model output.
//!
//! The model is instructed to reply with bare JSON, but in practice replies
//! arrive wrapped in prose, markdown fences, or stray notes. The greedy
//! first-to-last delimiter match below is intentionally loose; callers own
//! the fallback when nothing matches.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref JSON_ARRAY: Regex = Regex::new(r"(?s)\[.*\]").unwrap();
    static ref JSON_OBJECT: Regex = Regex::new(r"(?s)\{.*\}").unwrap();
}

/// Returns the first `[...]` bracket-delimited substring of `text`, matched
/// greedily (first opening bracket through the last closing bracket).
pub fn first_json_array(text: &str) -> Option<&str> {
    JSON_ARRAY.find(text).map(|m| m.as_str())
}

/// Returns the first `{...}` brace-delimited substring of `text`, matched
/// greedily (first opening brace through the last closing brace).
pub fn first_json_object(text: &str) -> Option<&str> {
    JSON_OBJECT.find(text).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_with_surrounding_prose() {
        let text = "Here is the list you asked for:\n[\"France\", \"Spain\"]\nLet me know!";
        assert_eq!(
            first_json_array(text),
            Some("[\"France\", \"Spain\"]")
        );
    }

    #[test]
    fn test_array_match_is_greedy() {
        // Nested arrays: the match runs from the first '[' to the last ']'.
        let text = "x [1, [2, 3]] y";
        assert_eq!(first_json_array(text), Some("[1, [2, 3]]"));
    }

    #[test]
    fn test_array_spanning_lines() {
        let text = "[\n  \"British Raj\",\n  \"Qing Dynasty\"\n]";
        assert_eq!(first_json_array(text), Some(text));
    }

    #[test]
    fn test_no_array_present() {
        assert_eq!(first_json_array("I could not find any entities."), None);
        assert_eq!(first_json_array(""), None);
    }

    #[test]
    fn test_object_with_surrounding_prose() {
        let text = "Sure! {\"representative_modern_code\": \"in\", \"events\": []} Done.";
        assert_eq!(
            first_json_object(text),
            Some("{\"representative_modern_code\": \"in\", \"events\": []}")
        );
    }

    #[test]
    fn test_object_match_is_greedy() {
        let text = "{\"a\": {\"b\": 1}} trailing";
        assert_eq!(first_json_object(text), Some("{\"a\": {\"b\": 1}}"));
    }

    #[test]
    fn test_no_object_present() {
        assert_eq!(first_json_object("not json at all"), None);
    }
}
