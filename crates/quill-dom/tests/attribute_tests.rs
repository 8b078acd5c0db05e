//! Tests for attributes, attribute lists and the namespace resolver.

use quill_dom::{
    Attribute, AttributeList, Namespace, QualifiedName, adjust_foreign_attribute, resolve_prefix,
};

fn list(pairs: &[(&str, &str)]) -> AttributeList {
    pairs.iter().map(|&(n, v)| Attribute::new(n, v)).collect()
}

// ========== Attribute ==========

#[test]
fn test_equality_ignores_namespace() {
    let plain = Attribute::new("lang", "en");
    let namespaced = Attribute::with_name(
        QualifiedName {
            prefix: None,
            local_name: "lang".to_string(),
            namespace: Some(Namespace::Xml),
        },
        "en",
    );
    assert_eq!(plain, namespaced);
    assert_ne!(plain, Attribute::new("lang", "fr"));
}

#[test]
fn test_qualified_name_and_id() {
    let href = Attribute::with_name(QualifiedName::resolve("xlink:href"), "#a");
    assert_eq!(href.name(), "xlink:href");
    assert_eq!(href.local_name(), "href");
    assert_eq!(href.prefix(), Some("xlink"));
    assert_eq!(href.namespace(), Some(Namespace::XLink));

    assert!(Attribute::new("ID", "x").is_id());
    assert!(!href.is_id());
}

#[test]
fn test_is_specified() {
    assert!(Attribute::new("title", "x").is_specified());
    assert!(!Attribute::new("hidden", "").is_specified());
}

#[test]
fn test_display_escapes_value() {
    let attr = Attribute::new("title", "a&b\"c\u{00A0}<d>");
    assert_eq!(attr.to_string(), "title=\"a&amp;b&quot;c&nbsp;<d>\"");
}

#[test]
fn test_display_uses_conventional_prefix() {
    let xmlns = Attribute::with_name(QualifiedName::resolve("xmlns"), "http://www.w3.org/2000/svg");
    assert_eq!(xmlns.to_string(), "xmlns=\"http://www.w3.org/2000/svg\"");
    let lang = Attribute::with_name(QualifiedName::resolve("xml:lang"), "en");
    assert_eq!(lang.to_string(), "xml:lang=\"en\"");
}

// ========== AttributeList ==========

#[test]
fn test_first_duplicate_wins() {
    let mut attrs = AttributeList::new();
    assert!(attrs.push(Attribute::new("class", "x")));
    assert!(!attrs.push(Attribute::new("class", "y")));
    assert_eq!(attrs.len(), 1);
    assert_eq!(attrs.get("class"), Some("x"));

    let collected = list(&[("a", "1"), ("b", "2"), ("a", "3")]);
    let names: Vec<String> = collected.iter().map(Attribute::name).collect();
    assert_eq!(names, ["a", "b"]);
    assert_eq!(collected.get("a"), Some("1"));
}

#[test]
fn test_lookup_by_namespace() {
    let attrs: AttributeList = [
        Attribute::with_name(QualifiedName::resolve("xlink:href"), "#x"),
        Attribute::new("href", "plain"),
    ]
    .into_iter()
    .collect();
    assert_eq!(attrs.get_ns(Some(Namespace::XLink), "href"), Some("#x"));
    assert_eq!(attrs.get_ns(None, "href"), Some("plain"));
    assert!(attrs.contains("xlink:href"));
    assert!(!attrs.contains("xlink:title"));
}

#[test]
fn test_same_set_ignores_order() {
    let a = list(&[("a", "1"), ("b", "2")]);
    let b = list(&[("b", "2"), ("a", "1")]);
    let c = list(&[("a", "1"), ("b", "3")]);
    assert!(a.same_set_as(&b));
    assert!(!a.same_set_as(&c));
    assert!(!a.same_set_as(&list(&[("a", "1")])));
}

// ========== resolver ==========

#[test]
fn test_reserved_prefixes() {
    assert_eq!(resolve_prefix("xml"), Some(Namespace::Xml));
    assert_eq!(resolve_prefix("xmlns"), Some(Namespace::Xmlns));
    assert_eq!(resolve_prefix("svg"), None);
}

#[test]
fn test_unknown_prefix_stays_in_local_name() {
    let name = QualifiedName::resolve("foo:bar");
    assert_eq!(name.prefix, None);
    assert_eq!(name.local_name, "foo:bar");
    assert_eq!(name.namespace, None);
}

#[test]
fn test_adjust_foreign_attribute_table() {
    let href = adjust_foreign_attribute("xlink:href");
    assert_eq!(href.prefix.as_deref(), Some("xlink"));
    assert_eq!(href.local_name, "href");
    assert_eq!(href.namespace, Some(Namespace::XLink));

    let xmlns_xlink = adjust_foreign_attribute("xmlns:xlink");
    assert_eq!(xmlns_xlink.namespace, Some(Namespace::Xmlns));
    assert_eq!(xmlns_xlink.local_name, "xlink");

    // Only names in the table are namespaced.
    let other = adjust_foreign_attribute("xlink:foo");
    assert_eq!(other.namespace, None);
    assert_eq!(other.local_name, "xlink:foo");
}

#[test]
fn test_namespace_uris() {
    assert_eq!(Namespace::Svg.uri(), "http://www.w3.org/2000/svg");
    assert_eq!(
        Namespace::from_uri("http://www.w3.org/1998/Math/MathML"),
        Some(Namespace::MathMl)
    );
    assert_eq!(Namespace::from_uri("urn:nothing"), None);
    assert_eq!(Namespace::MathMl.to_string(), "math");
}
