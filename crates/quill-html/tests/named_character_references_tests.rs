//! Integration tests for named character reference lookup.

use quill_html::tokenizer::named_character_references::{
    LONGEST_ENTITY_NAME, longest_match, lookup_entity,
};

#[test]
fn test_lookup_common_entities() {
    assert_eq!(lookup_entity("amp;"), Some("&"));
    assert_eq!(lookup_entity("lt;"), Some("<"));
    assert_eq!(lookup_entity("gt;"), Some(">"));
    assert_eq!(lookup_entity("quot;"), Some("\""));
    assert_eq!(lookup_entity("nbsp;"), Some("\u{00A0}"));
}

#[test]
fn test_lookup_legacy_entities() {
    // Legacy entities without semicolon
    assert_eq!(lookup_entity("amp"), Some("&"));
    assert_eq!(lookup_entity("lt"), Some("<"));
    assert_eq!(lookup_entity("copy"), Some("\u{00A9}"));
    // Newer entities need the semicolon
    assert_eq!(lookup_entity("hellip"), None);
    assert_eq!(lookup_entity("hellip;"), Some("\u{2026}"));
}

#[test]
fn test_lookup_unknown_entity() {
    assert_eq!(lookup_entity("notarealentity;"), None);
    assert_eq!(lookup_entity(""), None);
}

#[test]
fn test_lookup_two_code_point_entity() {
    assert_eq!(lookup_entity("NotEqualTilde;"), Some("\u{2242}\u{0338}"));
}

#[test]
fn test_longest_match_prefers_longer_names() {
    assert_eq!(longest_match("amp;rest"), Some((4, "&")));
    assert_eq!(longest_match("ampxyz"), Some((3, "&")));
    assert_eq!(longest_match("xyz"), None);
}

#[test]
fn test_longest_entity_name_bound() {
    assert_eq!(
        "CounterClockwiseContourIntegral;".chars().count(),
        LONGEST_ENTITY_NAME
    );
    assert!(lookup_entity("CounterClockwiseContourIntegral;").is_some());
}
