//! Integration tests for the HTML parser.

use quill_dom::serialize::{inner_html, serialize};
use quill_dom::{DomTree, Namespace, Node, NodeId, NodeType, QuirksMode};
use quill_html::{HTMLParser, InsertionMode, ParseStatus, ParserConfig, parse_document};

/// Helper to parse HTML and return the DOM tree
fn parse(html: &str) -> DomTree {
    parse_document(html)
}

/// Helper to serialize the body of a parsed document
fn body_html(html: &str) -> String {
    let tree = parse(html);
    let Some(body) = tree.body() else {
        panic!("document has no body: {}", serialize(&tree));
    };
    inner_html(&tree, body)
}

/// Helper to serialize the head of a parsed document
fn head_html(html: &str) -> String {
    let tree = parse(html);
    let Some(head) = tree.head() else {
        panic!("document has no head: {}", serialize(&tree));
    };
    inner_html(&tree, head)
}

/// Helper to get element by tag name (first match, depth-first)
fn find_element(tree: &DomTree, from: NodeId, tag: &str) -> Option<NodeId> {
    if let Some(data) = tree.as_element(from)
        && data.local_name == tag
    {
        return Some(from);
    }
    for &child_id in tree.children(from) {
        if let Some(found) = find_element(tree, child_id, tag) {
            return Some(found);
        }
    }
    None
}

/// Helper to find an element that must exist
fn expect_element(tree: &DomTree, tag: &str) -> NodeId {
    find_element(tree, NodeId::ROOT, tag).unwrap_or_else(|| panic!("no <{tag}> element"))
}

/// Helper to get a node reference
fn get_node(tree: &DomTree, id: NodeId) -> &Node {
    tree.get(id).expect("Node not found")
}

#[test]
fn test_document_structure() {
    let tree = parse("<!DOCTYPE html><html><head></head><body></body></html>");

    // Root should be Document
    let root = get_node(&tree, NodeId::ROOT);
    assert!(matches!(root.node_type, NodeType::Document));
    assert!(matches!(
        get_node(&tree, tree.children(NodeId::ROOT)[0]).node_type,
        NodeType::DocumentType(_)
    ));

    let html_id = expect_element(&tree, "html");
    assert!(find_element(&tree, html_id, "head").is_some());
    assert!(find_element(&tree, html_id, "body").is_some());
    assert_eq!(tree.quirks_mode(), QuirksMode::NoQuirks);
}

#[test]
fn test_implied_html_head_body() {
    let tree = parse("hi");
    assert_eq!(serialize(&tree), "<html><head></head><body>hi</body></html>");
}

#[test]
fn test_missing_doctype_is_quirks() {
    assert_eq!(parse("<p>x").quirks_mode(), QuirksMode::Quirks);
    assert_eq!(
        parse(r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN" "x">"#)
            .quirks_mode(),
        QuirksMode::LimitedQuirks
    );
}

#[test]
fn test_text_node() {
    let tree = parse("<html><body>Hello World</body></html>");
    let body_id = expect_element(&tree, "body");
    assert_eq!(tree.text_content(body_id), "Hello World");
}

#[test]
fn test_adjacent_text_is_merged() {
    let tree = parse("<p>a&amp;b c</p>");
    let p = expect_element(&tree, "p");
    assert_eq!(tree.children(p).len(), 1);
    assert_eq!(tree.as_text(tree.children(p)[0]), Some("a&b c"));
}

#[test]
fn test_comment_node() {
    let tree = parse("<html><body><!-- test comment --></body></html>");
    let body_id = expect_element(&tree, "body");
    let has_comment = tree.children(body_id).iter().any(|&child_id| {
        matches!(&get_node(&tree, child_id).node_type, NodeType::Comment(data) if data == " test comment ")
    });
    assert!(has_comment);
}

#[test]
fn test_comments_before_and_after_document() {
    let tree = parse("<!--a--><html><body></body></html><!--b-->");
    assert_eq!(
        serialize(&tree),
        "<!--a--><html><head></head><body></body></html><!--b-->"
    );
}

#[test]
fn test_element_attributes() {
    let tree = parse(r#"<div id="main" class="container"></div>"#);
    let div = tree.as_element(expect_element(&tree, "div")).expect("element");
    assert_eq!(div.get_attribute("id"), Some("main"));
    assert_eq!(div.get_attribute("class"), Some("container"));
}

#[test]
fn test_first_duplicate_attribute_wins() {
    assert_eq!(body_html(r#"<p a="1" a="2" b=3>"#), r#"<p a="1" b="3"></p>"#);
}

#[test]
fn test_void_elements() {
    assert_eq!(
        body_html("<p>a<br>b<img src=x><hr>"),
        r#"<p>a<br>b<img src="x"></p><hr>"#
    );
}

#[test]
fn test_title_element() {
    let tree = parse("<title>a<b>c&amp;</title>");
    let title = expect_element(&tree, "title");
    assert_eq!(tree.text_content(title), "a<b>c&");
    assert_eq!(tree.parent(title), tree.head());
}

#[test]
fn test_style_element_content_preserved() {
    assert_eq!(
        head_html("<style>p > a { color: red }</style>"),
        "<style>p > a { color: red }</style>"
    );
}

#[test]
fn test_script_content_preserved() {
    let tree = parse("<script>if (a<b && c) { x('</p>'); }</script>");
    let script = expect_element(&tree, "script");
    assert_eq!(tree.text_content(script), "if (a<b && c) { x('</p>'); }");
}

#[test]
fn test_textarea_leading_newline_dropped() {
    let tree = parse("<textarea>\nx<b></textarea>");
    let textarea = expect_element(&tree, "textarea");
    assert_eq!(tree.text_content(textarea), "x<b>");
}

#[test]
fn test_pre_leading_newline_dropped_once() {
    assert_eq!(body_html("<pre>\n\nx</pre>"), "<pre>\n\nx</pre>");
    let tree = parse("<pre>\n\nx</pre>");
    assert_eq!(tree.text_content(expect_element(&tree, "pre")), "\nx");
}

#[test]
fn test_plaintext_swallows_rest() {
    let tree = parse("<plaintext>a</plaintext><b>");
    let plaintext = expect_element(&tree, "plaintext");
    assert_eq!(tree.text_content(plaintext), "a</plaintext><b>");
}

#[test]
fn test_adoption_agency_simple_misnesting() {
    assert_eq!(
        body_html("<p>A<b>B<p>C</b>D"),
        "<p>A<b>B</b></p><p><b>C</b>D</p>"
    );
}

#[test]
fn test_adoption_agency_with_furthest_block() {
    assert_eq!(body_html("<b>1<p>2</b>3</p>"), "<b>1</b><p><b>2</b>3</p>");
}

#[test]
fn test_adoption_agency_no_furthest_block() {
    assert_eq!(body_html("<b>x<i>y</b>z"), "<b>x<i>y</i></b><i>z</i>");
}

#[test]
fn test_properly_nested_formatting() {
    assert_eq!(body_html("<b><i>x</i></b>"), "<b><i>x</i></b>");
}

#[test]
fn test_any_other_end_tag_ignores_special() {
    assert_eq!(body_html("<div><span>a</div>b"), "<div><span>a</span></div>b");
    assert_eq!(body_html("<div>a</span>b</div>"), "<div>ab</div>");
}

#[test]
fn test_nested_anchor_tags() {
    assert_eq!(
        body_html("<a href=1>x<a href=2>y"),
        r#"<a href="1">x</a><a href="2">y</a>"#
    );
}

#[test]
fn test_noahs_ark_limits_identical_formatting_elements() {
    assert_eq!(
        body_html("<p><b><b><b><b>x</p><p>y"),
        "<p><b><b><b><b>x</b></b></b></b></p><p><b><b><b>y</b></b></b></p>"
    );
}

#[test]
fn test_headings_do_not_nest() {
    assert_eq!(body_html("<h1>a<h2>b"), "<h1>a</h1><h2>b</h2>");
    assert_eq!(body_html("<h1>a</h2>b"), "<h1>a</h1>b");
}

#[test]
fn test_stray_end_p_creates_paragraph() {
    assert_eq!(body_html("<body></p>"), "<p></p>");
    assert_eq!(body_html("a</p>b"), "a<p></p>b");
}

#[test]
fn test_stray_end_p_before_html_is_ignored() {
    assert_eq!(body_html("</p>"), "");
}

#[test]
fn test_null_in_body_text_becomes_replacement_character() {
    assert_eq!(body_html("<p>\0x"), "<p>\u{FFFD}x</p>");
}

#[test]
fn test_end_br_becomes_br() {
    assert_eq!(body_html("a</br>b"), "a<br>b");
}

#[test]
fn test_image_becomes_img() {
    assert_eq!(body_html("<image src=x>"), r#"<img src="x">"#);
}

#[test]
fn test_second_html_tag_merges_attributes() {
    let tree = parse(r#"<html lang="en"><body><html lang="fr" class="x">"#);
    let html = tree.as_element(expect_element(&tree, "html")).expect("element");
    assert_eq!(html.get_attribute("lang"), Some("en"));
    assert_eq!(html.get_attribute("class"), Some("x"));
}

#[test]
fn test_li_implicit_close() {
    assert_eq!(
        body_html("<ul><li>a<li>b</ul>"),
        "<ul><li>a</li><li>b</li></ul>"
    );
}

#[test]
fn test_dd_dt_implicit_close() {
    assert_eq!(
        body_html("<dl><dt>a<dd>b<dt>c</dl>"),
        "<dl><dt>a</dt><dd>b</dd><dt>c</dt></dl>"
    );
}

#[test]
fn test_li_end_tag_no_scope() {
    assert_eq!(body_html("</li>x"), "x");
}

#[test]
fn test_nested_lists() {
    assert_eq!(
        body_html("<ul><li>a<ul><li>b</ul><li>c</ul>"),
        "<ul><li>a<ul><li>b</li></ul></li><li>c</li></ul>"
    );
}

#[test]
fn test_button_closes_open_button() {
    assert_eq!(
        body_html("<button>a<button>b"),
        "<button>a</button><button>b</button>"
    );
}

#[test]
fn test_form_pointer_blocks_nested_form() {
    assert_eq!(
        body_html("<form id=a><form id=b><input></form>"),
        r#"<form id="a"><input></form>"#
    );
}

#[test]
fn test_table_text_is_foster_parented() {
    assert_eq!(
        body_html("<table>text<tr><td>cell</td></tr></table>"),
        "text<table><tbody><tr><td>cell</td></tr></tbody></table>"
    );
}

#[test]
fn test_table_whitespace_stays_in_table() {
    assert_eq!(
        body_html("<table> <tr><td>x</td></tr></table>"),
        "<table> <tbody><tr><td>x</td></tr></tbody></table>"
    );
}

#[test]
fn test_foster_parented_element() {
    assert_eq!(
        body_html("<table><div>x</div><tr><td>y</td></tr></table>"),
        "<div>x</div><table><tbody><tr><td>y</td></tr></tbody></table>"
    );
}

#[test]
fn test_table_caption_and_colgroup() {
    assert_eq!(
        body_html("<table><caption>c</caption><col><tr><td>1</td></tr></table>"),
        "<table><caption>c</caption><colgroup><col></colgroup><tbody><tr><td>1</td></tr></tbody></table>"
    );
}

#[test]
fn test_cell_closed_by_next_cell() {
    assert_eq!(
        body_html("<table><tr><td>a<td>b<tr><th>c</table>"),
        "<table><tbody><tr><td>a</td><td>b</td></tr><tr><th>c</th></tr></tbody></table>"
    );
}

#[test]
fn test_nested_table_in_cell() {
    let html = "<table><tbody><tr><td><table><tbody><tr><td>x</td></tr></tbody></table></td></tr></tbody></table>";
    assert_eq!(body_html(html), html);
}

#[test]
fn test_table_in_paragraph_depends_on_quirks() {
    assert_eq!(body_html("<p><table></table>"), "<p><table></table></p>");
    assert_eq!(
        body_html("<!DOCTYPE html><p><table></table>"),
        "<p></p><table></table>"
    );
}

#[test]
fn test_hidden_input_in_table() {
    assert_eq!(
        body_html("<table><input type=hidden><input></table>"),
        r#"<input><table><input type="hidden"></table>"#
    );
}

#[test]
fn test_select_options() {
    assert_eq!(
        body_html("<select><option>a<option>b</select>"),
        "<select><option>a</option><option>b</option></select>"
    );
}

#[test]
fn test_nested_select_closes_select() {
    assert_eq!(body_html("<select><select>x"), "<select></select>x");
}

#[test]
fn test_select_optgroups() {
    assert_eq!(
        body_html("<select><optgroup label=g><option>1<optgroup><option>2</select>"),
        r#"<select><optgroup label="g"><option>1</option></optgroup><optgroup><option>2</option></optgroup></select>"#
    );
}

#[test]
fn test_select_in_table_closed_by_cell() {
    assert_eq!(
        body_html("<table><tr><td><select><option>a<td>b</table>"),
        "<table><tbody><tr><td><select><option>a</option></select></td><td>b</td></tr></tbody></table>"
    );
}

#[test]
fn test_template_contents() {
    let tree = parse("<template><p>x</p></template>");
    assert_eq!(
        serialize(&tree),
        "<html><head><template><p>x</p></template></head><body></body></html>"
    );
}

#[test]
fn test_template_rows_in_table() {
    assert_eq!(
        body_html("<table><template><tr><td>x</td></tr></template></table>"),
        "<table><template><tr><td>x</td></tr></template></table>"
    );
}

#[test]
fn test_unclosed_template_at_eof() {
    assert_eq!(
        body_html("<body><template><div>x"),
        "<template><div>x</div></template>"
    );
}

#[test]
fn test_frameset_document() {
    let html = "<!DOCTYPE html><html><head></head><frameset><frame></frameset></html>";
    assert_eq!(serialize(&parse(html)), html);
}

#[test]
fn test_frameset_ignored_after_content() {
    assert_eq!(body_html("<p>x<frameset>"), "<p>x</p>");
}

#[test]
fn test_svg_names_are_adjusted() {
    assert_eq!(
        body_html("<svg viewbox='0 0 1 1'><foreignobject><p>x</p></foreignobject><lineargradient/></svg>"),
        r#"<svg viewBox="0 0 1 1"><foreignObject><p>x</p></foreignObject><linearGradient></linearGradient></svg>"#
    );
}

#[test]
fn test_svg_namespaces() {
    let tree = parse("<svg><foreignObject><p>x</p></foreignObject></svg>");
    let svg = tree.as_element(expect_element(&tree, "svg")).expect("element");
    assert_eq!(svg.namespace, Namespace::Svg);
    let p = tree.as_element(expect_element(&tree, "p")).expect("element");
    assert_eq!(p.namespace, Namespace::Html);
}

#[test]
fn test_xlink_attribute_gets_namespace() {
    let tree = parse("<svg><a xlink:href='#x'></a></svg>");
    let a = tree.as_element(expect_element(&tree, "a")).expect("element");
    assert_eq!(a.namespace, Namespace::Svg);
    assert_eq!(a.attrs().get_ns(Some(Namespace::XLink), "href"), Some("#x"));
}

#[test]
fn test_mathml_annotation_xml_integration_point() {
    let tree = parse("<math><mi>x</mi><annotation-xml encoding='text/html'><div>y</div></annotation-xml></math>");
    let mi = tree.as_element(expect_element(&tree, "mi")).expect("element");
    assert_eq!(mi.namespace, Namespace::MathMl);
    let div = tree.as_element(expect_element(&tree, "div")).expect("element");
    assert_eq!(div.namespace, Namespace::Html);
}

#[test]
fn test_html_start_tag_breaks_out_of_svg() {
    assert_eq!(body_html("<svg><g><p>x"), "<svg><g></g></svg><p>x</p>");
}

#[test]
fn test_cdata_in_svg() {
    let tree = parse("<svg><![CDATA[a<b]]></svg>");
    let svg = expect_element(&tree, "svg");
    assert_eq!(tree.text_content(svg), "a<b");
}

#[test]
fn test_noscript_without_scripting_is_parsed() {
    assert_eq!(
        body_html("<body><noscript><p>x</p></noscript>"),
        "<noscript><p>x</p></noscript>"
    );
}

#[test]
fn test_noscript_with_scripting_is_text() {
    let config = ParserConfig::default().with_scripting();
    let parser = HTMLParser::with_config("<body><noscript><p>x</p></noscript>", &config)
        .expect("valid config");
    let tree = parser.run();
    let noscript = expect_element(&tree, "noscript");
    assert_eq!(tree.text_content(noscript), "<p>x</p>");
    assert!(find_element(&tree, noscript, "p").is_none());
}

#[test]
fn test_unclosed_elements_at_eof() {
    assert_eq!(body_html("<div><span>x"), "<div><span>x</span></div>");
}

#[test]
fn test_content_after_body_goes_into_body() {
    assert_eq!(body_html("<body>a</body>b</html>c"), "abc");
}

#[test]
fn test_step_allows_partial_tree() {
    let mut parser = HTMLParser::new("<p>a</p><table><tr><td>b");
    assert_eq!(parser.step(), ParseStatus::Continue);
    assert_eq!(parser.insertion_mode(), InsertionMode::InBody);
    assert!(parser.tree().body().is_some());
    let tree = parser.into_tree();
    assert!(find_element(&tree, NodeId::ROOT, "table").is_none());
}

#[test]
fn test_step_runs_to_finished() {
    let mut parser = HTMLParser::new("<table><tr>");
    let mut steps = 0;
    while parser.step() == ParseStatus::Continue {
        steps += 1;
    }
    assert!(steps >= 2);
    assert_eq!(parser.step(), ParseStatus::Finished);
}

#[test]
fn test_print_tree_handles_every_node_kind() {
    let tree = parse("<!DOCTYPE html><!--c--><p class=a>x<svg><circle/></svg>");
    quill_html::print_tree(&tree, NodeId::ROOT, 0);
}
