//! Round-trip tests: parsing and serializing markup.

use quill_dom::serialize::{inner_html, outer_html, serialize};
use quill_html::parse_document;

/// Helper to parse then serialize a document
fn reserialize(html: &str) -> String {
    serialize(&parse_document(html))
}

#[test]
fn test_well_formed_document_round_trips() {
    let documents = [
        "<!DOCTYPE html><html><head><title>T</title></head><body><p class=\"a\">x &amp; y</p><!--c--></body></html>",
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\"><style>a > b {}</style></head><body><ul><li>1</li><li>2</li></ul><br><img alt=\"\"></body></html>",
        "<!DOCTYPE html><html><head></head><body><table><tbody><tr><td>1</td><td>2</td></tr></tbody></table></body></html>",
        "<!DOCTYPE html><html><head></head><body><svg viewBox=\"0 0 2 2\"><circle r=\"1\"></circle></svg></body></html>",
    ];
    for html in documents {
        assert_eq!(reserialize(html), html);
    }
}

#[test]
fn test_reserialization_is_idempotent() {
    let inputs = [
        "<p>A<b>B<p>C</b>D",
        "<table>text<tr><td>cell</td></tr></table>",
        "<ul><li>a<li>b<div>c</ul>x",
        "<select><option>a<select>b",
        "<a href=1>x<div>y<a href=2>z</div>",
        "<svg><g><p>x</svg>",
        "<pre>\n\nfoo</pre><textarea>\nbar</textarea>",
        "<table><tr><td><b>x</table>y",
        "<frameset><frame></frameset>",
        "<!-- c --><template><tr><td>t</template>",
    ];
    for html in inputs {
        let once = reserialize(html);
        let twice = reserialize(&once);
        assert_eq!(once, twice, "input: {html:?}");
    }
}

#[test]
fn test_attribute_values_are_escaped() {
    let tree = parse_document("<p title='a\"b&c\u{00A0}d'></p>");
    let body = tree.body().expect("body");
    assert_eq!(
        inner_html(&tree, body),
        "<p title=\"a&quot;b&amp;c&nbsp;d\"></p>"
    );
}

#[test]
fn test_text_is_escaped() {
    let tree = parse_document("<p>1 &lt; 2 &amp;&amp; 3 &gt; 2</p>");
    let body = tree.body().expect("body");
    assert_eq!(inner_html(&tree, body), "<p>1 &lt; 2 &amp;&amp; 3 &gt; 2</p>");
}

#[test]
fn test_raw_text_is_not_escaped() {
    let tree = parse_document("<script>a && b < c</script>");
    let head = tree.head().expect("head");
    assert_eq!(inner_html(&tree, head), "<script>a && b < c</script>");
}

#[test]
fn test_outer_html_of_element() {
    let tree = parse_document("<div id=d><span>x</span></div>");
    let body = tree.body().expect("body");
    let div = tree.children(body)[0];
    assert_eq!(outer_html(&tree, div), "<div id=\"d\"><span>x</span></div>");
}

#[test]
fn test_xlink_attribute_serializes_with_prefix() {
    let tree = parse_document("<svg><use xlink:href=#a></use></svg>");
    let body = tree.body().expect("body");
    assert_eq!(
        inner_html(&tree, body),
        "<svg><use xlink:href=\"#a\"></use></svg>"
    );
}
