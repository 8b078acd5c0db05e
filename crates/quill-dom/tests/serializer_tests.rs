//! Tests for markup serialization of hand-built trees.

use quill_dom::serialize::{inner_html, outer_html, serialize};
use quill_dom::{
    Attribute, AttributeList, DocumentTypeData, DomTree, ElementData, Namespace, NodeId, NodeType,
};

fn element(tree: &mut DomTree, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
    let attrs: AttributeList = attrs.iter().map(|&(n, v)| Attribute::new(n, v)).collect();
    let id = tree.alloc(NodeType::Element(ElementData::html(tag, attrs)));
    tree.append_child(parent, id).unwrap();
    id
}

fn text(tree: &mut DomTree, parent: NodeId, data: &str) {
    let id = tree.alloc(NodeType::Text(data.to_string()));
    tree.append_child(parent, id).unwrap();
}

#[test]
fn test_document_with_doctype_and_comment() {
    let mut tree = DomTree::new();
    let doctype = tree.alloc(NodeType::DocumentType(DocumentTypeData {
        name: "html".to_string(),
        ..DocumentTypeData::default()
    }));
    tree.append_child(NodeId::ROOT, doctype).unwrap();
    let html = element(&mut tree, NodeId::ROOT, "html", &[]);
    let comment = tree.alloc(NodeType::Comment(" hi ".to_string()));
    tree.append_child(html, comment).unwrap();

    assert_eq!(serialize(&tree), "<!DOCTYPE html><html><!-- hi --></html>");
}

#[test]
fn test_text_escaping() {
    let mut tree = DomTree::new();
    let p = element(&mut tree, NodeId::ROOT, "p", &[]);
    text(&mut tree, p, "a < b & c > d\u{00A0}\"e\"");
    assert_eq!(outer_html(&tree, p), "<p>a &lt; b &amp; c &gt; d&nbsp;\"e\"</p>");
}

#[test]
fn test_attribute_escaping() {
    let mut tree = DomTree::new();
    let a = element(&mut tree, NodeId::ROOT, "a", &[("title", "x\"y&z")]);
    assert_eq!(outer_html(&tree, a), "<a title=\"x&quot;y&amp;z\"></a>");
}

#[test]
fn test_void_elements_have_no_end_tag() {
    let mut tree = DomTree::new();
    let p = element(&mut tree, NodeId::ROOT, "p", &[]);
    let _ = element(&mut tree, p, "br", &[]);
    let _ = element(&mut tree, p, "img", &[("src", "a.png")]);
    assert_eq!(inner_html(&tree, p), "<br><img src=\"a.png\">");
}

#[test]
fn test_raw_text_is_not_escaped() {
    let mut tree = DomTree::new();
    let script = element(&mut tree, NodeId::ROOT, "script", &[]);
    text(&mut tree, script, "if (a < b && c) {}");
    assert_eq!(outer_html(&tree, script), "<script>if (a < b && c) {}</script>");
}

#[test]
fn test_pre_leading_newline_is_doubled() {
    let mut tree = DomTree::new();
    let pre = element(&mut tree, NodeId::ROOT, "pre", &[]);
    text(&mut tree, pre, "\ncode");
    assert_eq!(outer_html(&tree, pre), "<pre>\n\ncode</pre>");
}

#[test]
fn test_foreign_void_name_gets_end_tag() {
    let mut tree = DomTree::new();
    let svg = tree.alloc(NodeType::Element(ElementData::new(
        "img",
        Namespace::Svg,
        AttributeList::new(),
    )));
    tree.append_child(NodeId::ROOT, svg).unwrap();
    assert_eq!(outer_html(&tree, svg), "<img></img>");
}
