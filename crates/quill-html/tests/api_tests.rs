//! Tests for the public parse functions, configuration and issue reporting.

use quill_dom::serialize::serialize;
use quill_dom::{Namespace, NodeId};
use quill_html::{
    DEFAULT_MAX_ISSUES, Error, HTMLParser, ParseErrorCode, ParserConfig, parse_bytes,
    parse_document, parse_document_with, parse_fragment,
};

/// Helper to collect the issue codes of a default parse
fn issue_codes(html: &str) -> Vec<ParseErrorCode> {
    let output = parse_document_with(html, &ParserConfig::default()).expect("valid config");
    output.issues.iter().map(|issue| issue.code).collect()
}

#[test]
fn test_default_config() {
    let config = ParserConfig::default();
    assert!(!config.scripting_enabled);
    assert!(!config.report_issues);
    assert_eq!(config.max_issues, Some(DEFAULT_MAX_ISSUES));
    assert!(config.fragment_context.is_none());
    assert!(config.validate().is_ok());
}

#[test]
fn test_zero_issue_cap_is_rejected() {
    let config = ParserConfig::default().with_max_issues(Some(0));
    assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    assert!(HTMLParser::with_config("x", &config).is_err());
}

#[test]
fn test_bad_fragment_context_is_rejected() {
    assert!(matches!(
        parse_fragment("x", "not a tag"),
        Err(Error::InvalidConfig(_))
    ));
    assert!(parse_fragment("x", "").is_err());
}

#[test]
fn test_invalid_utf8_is_an_error() {
    assert!(matches!(
        parse_bytes(&[b'<', b'p', b'>', 0xFF]),
        Err(Error::InvalidUtf8(_))
    ));
    let tree = parse_bytes(b"<p>ok").expect("valid utf-8");
    assert_eq!(serialize(&tree), serialize(&parse_document("<p>ok")));
}

#[test]
fn test_well_formed_document_has_no_issues() {
    assert!(issue_codes("<!DOCTYPE html><html><head><title>t</title></head><body><p>x</p></body></html>").is_empty());
}

#[test]
fn test_missing_doctype_is_reported() {
    assert_eq!(issue_codes("<p>x</p>"), vec![ParseErrorCode::MissingDoctype]);
}

#[test]
fn test_tree_construction_errors_are_reported() {
    let codes = issue_codes("<!DOCTYPE html><p>x</b></p>");
    assert_eq!(codes, vec![ParseErrorCode::UnexpectedEndTag]);
}

#[test]
fn test_foster_parenting_is_reported() {
    let codes = issue_codes("<!DOCTYPE html><table>x</table>");
    assert!(codes.contains(&ParseErrorCode::FosterParentedContent));
}

#[test]
fn test_tokenizer_and_tree_errors_share_one_list() {
    let codes = issue_codes("<!DOCTYPE html><p a=1 a=2></span>");
    assert_eq!(
        codes,
        vec![ParseErrorCode::DuplicateAttribute, ParseErrorCode::UnexpectedEndTag]
    );
}

#[test]
fn test_self_closing_non_void_is_reported() {
    let codes = issue_codes("<!DOCTYPE html><div/>x</div><br/>");
    assert_eq!(
        codes,
        vec![ParseErrorCode::NonVoidHtmlElementStartTagWithTrailingSolidus]
    );
}

#[test]
fn test_issue_cap_is_honored() {
    let config = ParserConfig::default().with_max_issues(Some(2));
    let output = parse_document_with("</a></b></c></d></e>", &config).expect("valid config");
    assert_eq!(output.issues.len(), 2);
    assert!(output.tree.body().is_some());
}

#[test]
fn test_issue_cap_can_be_lifted() {
    let config = ParserConfig::default().with_max_issues(None);
    let output = parse_document_with("</a></b></c></d></e>", &config).expect("valid config");
    assert_eq!(output.issues.len(), 6);
}

#[test]
fn test_issue_cap_holds_with_reporting_on() {
    let config = ParserConfig::default()
        .with_issue_reporting()
        .with_max_issues(Some(10));
    let output = parse_document_with(&"</x>".repeat(5000), &config).expect("valid config");
    assert_eq!(output.issues.len(), 10);
}

#[test]
fn test_issue_display() {
    let output = parse_document_with("<p>", &ParserConfig::default()).expect("valid config");
    let text = output.issues[0].to_string();
    assert!(text.starts_with("missing-doctype at "), "{text}");
}

#[test]
fn test_fragment_in_td_context() {
    let tree = parse_fragment("a<b>c</b><td>d", "td").expect("valid context");
    assert_eq!(serialize(&tree), "a<b>c</b>d");
}

#[test]
fn test_fragment_in_textarea_context_is_text() {
    let tree = parse_fragment("<p>x</p>", "textarea").expect("valid context");
    assert_eq!(tree.children(NodeId::ROOT).len(), 1);
    assert_eq!(tree.text_content(NodeId::ROOT), "<p>x</p>");
}

#[test]
fn test_fragment_in_tbody_context() {
    let tree = parse_fragment("<tr><td>x", "tbody").expect("valid context");
    assert_eq!(serialize(&tree), "<tr><td>x</td></tr>");
}

#[test]
fn test_fragment_in_svg_context() {
    let tree = parse_fragment("<circle r=1/>", "svg").expect("valid context");
    let circle = tree.children(NodeId::ROOT)[0];
    let data = tree.as_element(circle).expect("element");
    assert_eq!(data.namespace, Namespace::Svg);
    assert_eq!(data.local_name, "circle");
}

#[test]
fn test_fragment_in_body_context_keeps_structure() {
    let tree = parse_fragment("<p>a<p>b", "body").expect("valid context");
    assert_eq!(serialize(&tree), "<p>a</p><p>b</p>");
    assert!(tree.body().is_none());
}

#[test]
fn test_fragment_context_from_config() {
    let config = ParserConfig::default().with_fragment_context("select");
    let output = parse_document_with("<option>a<option>b", &config).expect("valid config");
    assert_eq!(
        serialize(&output.tree),
        "<option>a</option><option>b</option>"
    );
}
