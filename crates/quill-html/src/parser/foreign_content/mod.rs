//! Foreign content parsing support for SVG and MathML.
//!
//! [§ 13.2.6.3 Creating and inserting nodes](https://html.spec.whatwg.org/multipage/parsing.html#creating-and-inserting-nodes)
//! [§ 13.2.6.5 The rules for parsing tokens in foreign content](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inforeign)

pub mod mathml;
pub mod svg;

pub use mathml::adjust_mathml_attribute_name;
pub use svg::{adjust_svg_attribute_name, adjust_svg_tag_name};

use quill_dom::{Attribute, AttributeList, Namespace, NodeId, QualifiedName, adjust_foreign_attribute};

use super::core::{Flow, HTMLParser};
use crate::error::ParseErrorCode;
use crate::tokenizer::{TagAttribute, Token};

/// Build the attribute list for an element created from a token.
///
/// HTML attributes keep their raw name as the local name. In SVG and MathML
/// the names are first given their camel-case spelling ("adjust SVG/MathML
/// attributes") and then split into prefix and namespace ("adjust foreign
/// attributes").
pub(super) fn attributes_for(namespace: Namespace, attributes: &[TagAttribute]) -> AttributeList {
    attributes
        .iter()
        .map(|attr| match namespace {
            Namespace::Svg => Attribute::with_name(
                adjust_foreign_attribute(adjust_svg_attribute_name(&attr.name)),
                attr.value.clone(),
            ),
            Namespace::MathMl => Attribute::with_name(
                adjust_foreign_attribute(adjust_mathml_attribute_name(&attr.name)),
                attr.value.clone(),
            ),
            _ => Attribute::with_name(QualifiedName::local(&attr.name), attr.value.clone()),
        })
        .collect()
}

/// "A start tag whose tag name is one of: ..." in the foreign content rules.
/// These make the parser leave foreign content.
const BREAKOUT_ELEMENTS: &[&str] = &[
    "b", "big", "blockquote", "body", "br", "center", "code", "dd", "div", "dl", "dt", "em",
    "embed", "h1", "h2", "h3", "h4", "h5", "h6", "head", "hr", "i", "img", "li", "listing",
    "menu", "meta", "nobr", "ol", "p", "pre", "ruby", "s", "small", "span", "strong", "strike",
    "sub", "sup", "table", "tt", "u", "ul", "var",
];

impl HTMLParser {
    /// [§ 13.2.6.5 MathML text integration point](https://html.spec.whatwg.org/multipage/parsing.html#mathml-text-integration-point)
    ///
    /// "A node is a MathML text integration point if it is one of the
    /// following elements: A MathML mi element, A MathML mo element, A MathML
    /// mn element, A MathML ms element, A MathML mtext element"
    pub(super) fn is_mathml_text_integration_point(&self, id: NodeId) -> bool {
        self.tree.as_element(id).is_some_and(|element| {
            element.namespace == Namespace::MathMl
                && matches!(element.local_name.as_str(), "mi" | "mo" | "mn" | "ms" | "mtext")
        })
    }

    /// [§ 13.2.6.5 HTML integration point](https://html.spec.whatwg.org/multipage/parsing.html#html-integration-point)
    ///
    /// A MathML `annotation-xml` whose `encoding` is `text/html` or
    /// `application/xhtml+xml`, or an SVG `foreignObject`, `desc` or `title`.
    pub(super) fn is_html_integration_point(&self, id: NodeId) -> bool {
        let Some(element) = self.tree.as_element(id) else {
            return false;
        };
        match element.namespace {
            Namespace::MathMl => {
                element.local_name == "annotation-xml"
                    && element.get_attribute("encoding").is_some_and(|encoding| {
                        encoding.eq_ignore_ascii_case("text/html")
                            || encoding.eq_ignore_ascii_case("application/xhtml+xml")
                    })
            }
            Namespace::Svg => matches!(
                element.local_name.as_str(),
                "foreignObject" | "desc" | "title"
            ),
            _ => false,
        }
    }

    /// [§ 13.2.6 Tree construction dispatcher](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction-dispatcher)
    ///
    /// True when the token must be handled by the rules for foreign content
    /// instead of the current insertion mode.
    pub(super) fn should_use_foreign_rules(&self, token: &Token) -> bool {
        // "If the stack of open elements is empty"
        let Some(node) = self.adjusted_current_node() else {
            return false;
        };
        // "If the adjusted current node is an element in the HTML namespace"
        let Some(element) = self.tree.as_element(node) else {
            return false;
        };
        if element.namespace == Namespace::Html {
            return false;
        }
        let is_character = matches!(token, Token::Character { .. });
        let start_tag = match token {
            Token::StartTag { name, .. } => Some(name.as_str()),
            _ => None,
        };
        // "If the adjusted current node is a MathML text integration point and
        // the token is a start tag whose tag name is neither "mglyph" nor
        // "malignmark""
        // "If the adjusted current node is a MathML text integration point and
        // the token is a character token"
        if self.is_mathml_text_integration_point(node)
            && (is_character || start_tag.is_some_and(|name| name != "mglyph" && name != "malignmark"))
        {
            return false;
        }
        // "If the adjusted current node is a MathML annotation-xml element and
        // the token is a start tag whose tag name is "svg""
        if element.namespace == Namespace::MathMl
            && element.local_name == "annotation-xml"
            && start_tag == Some("svg")
        {
            return false;
        }
        // "If the adjusted current node is an HTML integration point and the
        // token is a start tag"
        // "If the adjusted current node is an HTML integration point and the
        // token is a character token"
        if self.is_html_integration_point(node) && (is_character || start_tag.is_some()) {
            return false;
        }
        // "If the token is an end-of-file token"
        !token.is_eof()
    }

    /// [§ 13.2.6.5 The rules for parsing tokens in foreign content](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inforeign)
    pub(super) fn handle_foreign_content(&mut self, token: &Token) -> Flow {
        match token {
            // "A character token that is U+0000 NULL"
            // "Parse error. Insert a U+FFFD REPLACEMENT CHARACTER character."
            Token::Character { data: '\0' } => {
                self.parse_error(ParseErrorCode::UnexpectedNullCharacter, "NULL in foreign content");
                self.insert_character('\u{FFFD}');
            }
            // "A character token that is one of U+0009 CHARACTER TABULATION, U+000A LINE
            // FEED (LF), U+000C FORM FEED (FF), U+000D CARRIAGE RETURN (CR), or U+0020
            // SPACE"
            Token::Character { data } if Self::is_whitespace(*data) => {
                self.insert_character(*data);
            }
            // "Any other character token"
            // "Insert the token's character. Set the frameset-ok flag to "not ok"."
            Token::Character { data } => {
                self.insert_character(*data);
                self.frameset_ok = false;
            }
            Token::Comment { data } => self.insert_comment(data),
            Token::Doctype { .. } => {
                self.parse_error(ParseErrorCode::UnexpectedDoctype, "DOCTYPE in foreign content");
            }
            Token::StartTag {
                name, attributes, ..
            } if BREAKOUT_ELEMENTS.contains(&name.as_str())
                || (name == "font"
                    && attributes
                        .iter()
                        .any(|attr| matches!(attr.name.as_str(), "color" | "face" | "size"))) =>
            {
                return self.leave_foreign_content(token);
            }
            Token::EndTag { name, .. } if name == "br" || name == "p" => {
                return self.leave_foreign_content(token);
            }
            // "Any other start tag"
            Token::StartTag { name, .. } => {
                let namespace = self
                    .adjusted_current_node()
                    .and_then(|id| self.tree.as_element(id))
                    .map_or(Namespace::Html, |element| element.namespace);
                // "If the adjusted current node is an element in the SVG namespace,
                // adjust SVG attributes for the token."
                let local_name = if namespace == Namespace::Svg {
                    adjust_svg_tag_name(name).to_string()
                } else {
                    name.clone()
                };
                let _ = self.insert_foreign_element(&local_name, token.attributes(), namespace);
                // "If the token has its self-closing flag set, then ... pop the current
                // node off the stack of open elements and acknowledge the token's
                // self-closing flag."
                if token.is_self_closing() {
                    let _ = self.stack_of_open_elements.pop();
                    self.acknowledge_self_closing_flag();
                }
            }
            Token::EndTag { name, .. } => return self.foreign_end_tag(name, token),
            Token::EndOfFile => {}
        }
        Flow::Done
    }

    /// "Parse error. While the current node is not a MathML text integration
    /// point, an HTML integration point, or an element in the HTML namespace,
    /// pop elements from the stack of open elements. Reprocess the token
    /// according to the rules given in the section corresponding to the
    /// current insertion mode in HTML content."
    fn leave_foreign_content(&mut self, token: &Token) -> Flow {
        self.parse_error(
            ParseErrorCode::UnexpectedStartTag,
            token.tag_name().unwrap_or_default(),
        );
        while let Some(current) = self.current_node() {
            if self.is_mathml_text_integration_point(current)
                || self.is_html_integration_point(current)
                || self.is_in_html_namespace(current)
            {
                break;
            }
            let _ = self.stack_of_open_elements.pop();
        }
        self.process_using_rules_for(self.insertion_mode, token)
    }

    /// "Any other end tag" in foreign content.
    fn foreign_end_tag(&mut self, name: &str, token: &Token) -> Flow {
        // "Initialize node to be the current node (the bottommost node of the stack)."
        let Some(mut index) = self.stack_of_open_elements.len().checked_sub(1) else {
            return Flow::Done;
        };
        // "If node's tag name, converted to ASCII lowercase, is not the same as the
        // tag name of the token, then this is a parse error."
        if !self.local_name_matches_lowercase(self.stack_of_open_elements[index], name) {
            self.parse_error(ParseErrorCode::UnexpectedEndTag, name);
        }
        loop {
            // "Loop: If node is the topmost element in the stack of open elements,
            // then return. (fragment case)"
            if index == 0 {
                return Flow::Done;
            }
            let node = self.stack_of_open_elements[index];
            // "If node's tag name, converted to ASCII lowercase, is the same as the
            // tag name of the token, pop elements from the stack of open elements
            // until node has been popped from the stack, and then return."
            if self.local_name_matches_lowercase(node, name) {
                self.stack_of_open_elements.truncate(index);
                return Flow::Done;
            }
            // "Set node to the previous entry in the stack of open elements."
            index -= 1;
            // "If node is not an element in the HTML namespace, return to the step
            // labeled loop."
            // "Otherwise, process the token according to the rules given in the
            // section corresponding to the current insertion mode in HTML content."
            if self.is_in_html_namespace(self.stack_of_open_elements[index]) {
                return self.process_using_rules_for(self.insertion_mode, token);
            }
        }
    }

    fn local_name_matches_lowercase(&self, id: NodeId, name: &str) -> bool {
        self.tree
            .as_element(id)
            .is_some_and(|element| element.local_name.to_ascii_lowercase() == name)
    }
}
