//! Markup serialization (`innerHTML` / `outerHTML`).
//!
//! [§ 13.3 Serializing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments)

use std::fmt::Write as _;

use crate::namespace::Namespace;
use crate::node::{NodeId, NodeType};
use crate::tree::DomTree;

/// "If current node is an area, base, basefont, bgsound, br, col, embed,
/// frame, hr, img, input, keygen, link, meta, param, source, track or wbr
/// element, then continue on to the next child node at this point."
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "bgsound", "br", "col", "embed", "frame", "hr", "img", "input",
    "keygen", "link", "meta", "param", "source", "track", "wbr",
];

/// "If the parent of current node is a style, script, xmp, iframe, noembed,
/// noframes, or plaintext element ... then append the value of current
/// node's data IDL attribute literally."
const RAW_TEXT_PARENTS: &[&str] = &[
    "style", "script", "xmp", "iframe", "noembed", "noframes", "plaintext",
];

/// Serialize the whole document.
#[must_use]
pub fn serialize(tree: &DomTree) -> String {
    inner_html(tree, tree.root())
}

/// Serialize the children of `node`.
#[must_use]
pub fn inner_html(tree: &DomTree, node: NodeId) -> String {
    let mut out = String::new();
    for &child in tree.children(node) {
        serialize_node(tree, child, &mut out);
    }
    out
}

/// Serialize `node` together with its children.
#[must_use]
pub fn outer_html(tree: &DomTree, node: NodeId) -> String {
    let mut out = String::new();
    serialize_node(tree, node, &mut out);
    out
}

fn serialize_node(tree: &DomTree, id: NodeId, out: &mut String) {
    let Some(node) = tree.get(id) else {
        return;
    };
    match &node.node_type {
        NodeType::Document => {
            for &child in &node.children {
                serialize_node(tree, child, out);
            }
        }
        NodeType::Element(element) => {
            let tag = element.qualified_name();
            out.push('<');
            out.push_str(&tag);
            for attr in element.attrs() {
                let _ = write!(out, " {attr}");
            }
            out.push('>');

            let is_html = element.namespace == Namespace::Html;
            if is_html && VOID_ELEMENTS.contains(&element.local_name.as_str()) {
                return;
            }

            // "If current node is a pre, textarea, or listing element, and the
            // first child node of the element, if any, is a Text node whose
            // character data has as its first character a U+000A LINE FEED
            // (LF) character, then append a U+000A LINE FEED (LF) character."
            if is_html
                && matches!(element.local_name.as_str(), "pre" | "textarea" | "listing")
                && tree
                    .first_child(id)
                    .and_then(|c| tree.as_text(c))
                    .is_some_and(|t| t.starts_with('\n'))
            {
                out.push('\n');
            }

            let raw = is_html && RAW_TEXT_PARENTS.contains(&element.local_name.as_str());
            for &child in &node.children {
                match tree.as_text(child) {
                    Some(text) if raw => out.push_str(text),
                    _ => serialize_node(tree, child, out),
                }
            }

            out.push_str("</");
            out.push_str(&tag);
            out.push('>');
        }
        NodeType::Text(text) => escape_text(text, out),
        NodeType::Comment(data) => {
            out.push_str("<!--");
            out.push_str(data);
            out.push_str("-->");
        }
        NodeType::DocumentType(doctype) => {
            out.push_str("<!DOCTYPE ");
            out.push_str(&doctype.name);
            out.push('>');
        }
    }
}

/// [§ 13.3 Escaping a string](https://html.spec.whatwg.org/multipage/parsing.html#escapingString)
///
/// Text mode: `&`, U+00A0, `<` and `>`.
fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{00A0}' => out.push_str("&nbsp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}
