//! [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)

use quill_dom::{Namespace, NodeId, QuirksMode};

use crate::error::ParseErrorCode;
use crate::parser::core::{Flow, HTMLParser, InsertionMode};
use crate::parser::tree_builder::Scope;
use crate::tokenizer::{RawTextKind, Token};

/// Elements that may still be open at the end of the body without an error.
const ALLOWED_OPEN_AT_END: &[&str] = &[
    "dd", "dt", "li", "optgroup", "option", "p", "rb", "rp", "rt", "rtc", "tbody", "td",
    "tfoot", "th", "thead", "tr", "body", "html",
];

/// Block elements that close an open `p` on their start tag.
const BLOCK_START_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "center", "details", "dialog", "dir", "div",
    "dl", "fieldset", "figcaption", "figure", "footer", "header", "hgroup", "main", "menu",
    "nav", "ol", "p", "search", "section", "summary", "ul",
];

/// Elements whose end tag pops up to the matching element in scope.
const BLOCK_END_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "button", "center", "details", "dialog", "dir",
    "div", "dl", "fieldset", "figcaption", "figure", "footer", "header", "hgroup", "listing",
    "main", "menu", "nav", "ol", "pre", "search", "section", "summary", "ul",
];

const HEADINGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

impl HTMLParser {
    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    pub(in crate::parser) fn handle_in_body_mode(&mut self, token: &Token) -> Flow {
        match token {
            // "A character token that is U+0000 NULL"
            // "Parse error. Ignore the token."
            Token::Character { data: '\0' } => {
                self.parse_error(ParseErrorCode::UnexpectedNullCharacter, "in body");
            }
            // "Reconstruct the active formatting elements, if any. Insert the
            // token's character."
            Token::Character { data } if Self::is_whitespace(*data) => {
                self.reconstruct_active_formatting_elements();
                self.insert_character(*data);
            }
            // "Any other character token"
            // "... Set the frameset-ok flag to "not ok"."
            Token::Character { data } => {
                self.reconstruct_active_formatting_elements();
                self.insert_character(*data);
                self.frameset_ok = false;
            }
            Token::Comment { data } => self.insert_comment(data),
            Token::Doctype { .. } => self.unexpected_token(token),
            Token::StartTag { name, .. } => return self.in_body_start_tag(name, token),
            Token::EndTag { name, .. } => return self.in_body_end_tag(name, token),
            // "An end-of-file token"
            Token::EndOfFile => {
                // "If the stack of template insertion modes is not empty, then
                // process the token using the rules for the "in template"
                // insertion mode."
                if !self.template_insertion_modes.is_empty() {
                    return self.process_using_rules_for(InsertionMode::InTemplate, token);
                }
                // "Otherwise, follow these steps: If there is a node in the stack
                // of open elements that is not either a dd element, a dt element,
                // ... then this is a parse error. Stop parsing."
                if self.has_unclosed_elements() {
                    self.parse_error(ParseErrorCode::UnexpectedEndOfFile, "unclosed elements");
                }
                self.stop_parsing();
            }
        }
        Flow::Done
    }

    fn has_unclosed_elements(&self) -> bool {
        self.stack_of_open_elements
            .iter()
            .any(|&id| !self.is_html_element_in(id, ALLOWED_OPEN_AT_END))
    }

    /// Copy the token's attributes onto `element`, skipping names it already
    /// has. Used for a second `<html>` or `<body>` tag.
    fn merge_attributes(&mut self, element: NodeId, token: &Token) {
        for attr in token.attributes() {
            let present = self
                .tree
                .as_element(element)
                .is_some_and(|data| data.attrs().contains(&attr.name));
            if !present {
                let _ = self.tree.set_attribute(element, &attr.name, attr.value.clone());
            }
        }
    }

    /// "Insert an HTML element for the token. Immediately pop the current node
    /// off the stack of open elements. Acknowledge the token's self-closing
    /// flag, if it is set."
    fn insert_void_element(&mut self, token: &Token) {
        let _ = self.insert_html_element(token);
        let _ = self.stack_of_open_elements.pop();
        self.acknowledge_self_closing_flag();
    }

    #[allow(clippy::cognitive_complexity)]
    fn in_body_start_tag(&mut self, name: &str, token: &Token) -> Flow {
        match name {
            // "A start tag whose tag name is "html""
            "html" => {
                // "Parse error. If there is a template element on the stack of
                // open elements, then ignore the token. Otherwise, for each
                // attribute on the token, check to see if the attribute is
                // already present on the top element of the stack of open
                // elements. If it is not, add the attribute and its corresponding
                // value to that element."
                self.unexpected_token(token);
                if !self.stack_contains("template")
                    && let Some(&html) = self.stack_of_open_elements.first()
                {
                    self.merge_attributes(html, token);
                }
            }
            "base" | "basefont" | "bgsound" | "link" | "meta" | "noframes" | "script" | "style"
            | "template" | "title" => {
                return self.process_using_rules_for(InsertionMode::InHead, token);
            }
            // "A start tag whose tag name is "body""
            "body" => {
                self.unexpected_token(token);
                // "If the second element on the stack of open elements is not a
                // body element, if the stack of open elements has only one node
                // on it, or if there is a template element on the stack of open
                // elements, then ignore the token. (fragment case or there is a
                // template element on the stack)"
                let Some(&body) = self.stack_of_open_elements.get(1) else {
                    return Flow::Done;
                };
                if !self.is_html_element(body, "body") || self.stack_contains("template") {
                    return Flow::Done;
                }
                // "Otherwise, set the frameset-ok flag to "not ok"; then, for each
                // attribute on the token, check to see if the attribute is already
                // present on the body element (the second element) on the stack
                // of open elements, and if it is not, add the attribute and its
                // corresponding value to that element."
                self.frameset_ok = false;
                self.merge_attributes(body, token);
            }
            // "A start tag whose tag name is "frameset""
            "frameset" => {
                self.unexpected_token(token);
                // "If the stack of open elements has only one node on it, or if
                // the second element on the stack of open elements is not a body
                // element, then ignore the token. (fragment case or there is a
                // template element on the stack)"
                // "If the frameset-ok flag is set to "not ok", ignore the token."
                let Some(&body) = self.stack_of_open_elements.get(1) else {
                    return Flow::Done;
                };
                if !self.is_html_element(body, "body") || !self.frameset_ok {
                    return Flow::Done;
                }
                // "Otherwise, run the following steps: Remove the second element
                // on the stack of open elements from its parent node, if it has
                // one."
                if let Some(parent) = self.tree.parent(body) {
                    let _ = self.tree.remove_child(parent, body);
                }
                // "Pop all the nodes from the bottom of the stack of open
                // elements, from the current node up to, but not including, the
                // root html element."
                self.stack_of_open_elements.truncate(1);
                // "Insert an HTML element for the token. Switch the insertion mode
                // to "in frameset"."
                let _ = self.insert_html_element(token);
                self.switch_mode(InsertionMode::InFrameset);
            }
            _ if BLOCK_START_TAGS.contains(&name) => {
                // "If the stack of open elements has a p element in button scope,
                // then close a p element. Insert an HTML element for the token."
                self.close_p_element_in_button_scope();
                let _ = self.insert_html_element(token);
            }
            _ if HEADINGS.contains(&name) => {
                self.close_p_element_in_button_scope();
                // "If the current node is an HTML element whose tag name is one of
                // "h1", "h2", "h3", "h4", "h5", or "h6", then this is a parse
                // error; pop the current node off the stack of open elements."
                if self
                    .current_node()
                    .is_some_and(|id| self.is_html_element_in(id, HEADINGS))
                {
                    self.unexpected_token(token);
                    let _ = self.stack_of_open_elements.pop();
                }
                let _ = self.insert_html_element(token);
            }
            // "A start tag whose tag name is one of: "pre", "listing""
            // "If the next token is a U+000A LINE FEED (LF) character token, then
            // ignore that token and move on to the next one. (Newlines at the
            // start of pre blocks are ignored as an authoring convenience.)"
            "pre" | "listing" => {
                self.close_p_element_in_button_scope();
                let _ = self.insert_html_element(token);
                self.skip_next_newline = true;
                self.frameset_ok = false;
            }
            // "A start tag whose tag name is "form""
            "form" => {
                // "If the form element pointer is not null, and there is no
                // template element on the stack of open elements, then this is a
                // parse error; ignore the token."
                let in_template = self.stack_contains("template");
                if self.form_element_pointer.is_some() && !in_template {
                    self.unexpected_token(token);
                    return Flow::Done;
                }
                self.close_p_element_in_button_scope();
                let form = self.insert_html_element(token);
                // "If there is no template element on the stack of open
                // elements, set the form element pointer to point to the element
                // created."
                if !in_template {
                    self.form_element_pointer = Some(form);
                }
            }
            "li" => {
                self.frameset_ok = false;
                self.close_list_item(&["li"]);
                self.close_p_element_in_button_scope();
                let _ = self.insert_html_element(token);
            }
            "dd" | "dt" => {
                self.frameset_ok = false;
                self.close_list_item(&["dd", "dt"]);
                self.close_p_element_in_button_scope();
                let _ = self.insert_html_element(token);
            }
            // "A start tag whose tag name is "plaintext""
            // "Switch the tokenizer to the PLAINTEXT state."
            "plaintext" => {
                self.close_p_element_in_button_scope();
                let _ = self.insert_html_element(token);
                self.tokenizer.switch_to_raw_text(RawTextKind::Plaintext);
            }
            // "A start tag whose tag name is "button""
            "button" => {
                // "If the stack of open elements has a button element in scope,
                // then run these substeps: Parse error. Generate implied end tags.
                // Pop elements from the stack of open elements until a button
                // element has been popped from the stack."
                if self.has_element_in_scope("button", Scope::Default) {
                    self.unexpected_token(token);
                    self.generate_implied_end_tags(None);
                    self.pop_until("button");
                }
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(token);
                self.frameset_ok = false;
            }
            // "A start tag whose tag name is "a""
            "a" => {
                // "If the list of active formatting elements contains an a element
                // between the end of the list and the last marker on the list (or
                // the start of the list if there is no marker on the list), then
                // this is a parse error; run the adoption agency algorithm for the
                // token, then remove that element from the list of active
                // formatting elements and the stack of open elements if the
                // adoption agency algorithm didn't already remove it (it might not
                // have if the element is not in table scope)."
                if let Some((_, existing)) = self.formatting_element_after_last_marker("a") {
                    self.unexpected_token(token);
                    if self.run_adoption_agency("a") {
                        self.any_other_end_tag("a");
                    }
                    if let Some(index) = self.formatting_index_of(existing) {
                        let _ = self.active_formatting_elements.remove(index);
                    }
                    self.remove_from_stack(existing);
                }
                self.insert_formatting_element(token);
            }
            "b" | "big" | "code" | "em" | "font" | "i" | "s" | "small" | "strike" | "strong"
            | "tt" | "u" => self.insert_formatting_element(token),
            // "A start tag whose tag name is "nobr""
            "nobr" => {
                self.reconstruct_active_formatting_elements();
                // "If the stack of open elements has a nobr element in scope, then
                // this is a parse error; run the adoption agency algorithm for the
                // token, then once again reconstruct the active formatting
                // elements, if any."
                if self.has_element_in_scope("nobr", Scope::Default) {
                    self.unexpected_token(token);
                    if self.run_adoption_agency("nobr") {
                        self.any_other_end_tag("nobr");
                    }
                }
                self.insert_formatting_element(token);
            }
            // "A start tag whose tag name is one of: "applet", "marquee", "object""
            "applet" | "marquee" | "object" => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(token);
                self.insert_marker();
                self.frameset_ok = false;
            }
            // "A start tag whose tag name is "table""
            "table" => {
                // "If the Document is not set to quirks mode, and the stack of
                // open elements has a p element in button scope, then close a p
                // element."
                if self.tree.quirks_mode() != QuirksMode::Quirks {
                    self.close_p_element_in_button_scope();
                }
                let _ = self.insert_html_element(token);
                self.frameset_ok = false;
                self.switch_mode(InsertionMode::InTable);
            }
            "area" | "br" | "embed" | "img" | "keygen" | "wbr" => {
                self.reconstruct_active_formatting_elements();
                self.insert_void_element(token);
                self.frameset_ok = false;
            }
            // "A start tag whose tag name is "input""
            "input" => {
                self.reconstruct_active_formatting_elements();
                self.insert_void_element(token);
                // "If the token does not have an attribute with the name "type",
                // or if it does, but that attribute's value is not an ASCII
                // case-insensitive match for the string "hidden", then: set the
                // frameset-ok flag to "not ok"."
                if !token
                    .attribute("type")
                    .is_some_and(|kind| kind.eq_ignore_ascii_case("hidden"))
                {
                    self.frameset_ok = false;
                }
            }
            "param" | "source" | "track" => self.insert_void_element(token),
            "hr" => {
                self.close_p_element_in_button_scope();
                self.insert_void_element(token);
                self.frameset_ok = false;
            }
            // "A start tag whose tag name is "image""
            // "Parse error. Change the token's tag name to "img" and reprocess
            // it. (Don't ask.)"
            "image" => {
                self.unexpected_token(token);
                return Flow::ReprocessAs(Token::StartTag {
                    name: "img".to_string(),
                    self_closing: token.is_self_closing(),
                    attributes: token.attributes().to_vec(),
                });
            }
            // "A start tag whose tag name is "textarea""
            "textarea" => {
                let _ = self.insert_html_element(token);
                self.skip_next_newline = true;
                self.tokenizer.switch_to_raw_text(RawTextKind::Rcdata);
                self.original_insertion_mode = Some(self.insertion_mode);
                self.frameset_ok = false;
                self.switch_mode(InsertionMode::Text);
            }
            "xmp" => {
                self.close_p_element_in_button_scope();
                self.reconstruct_active_formatting_elements();
                self.frameset_ok = false;
                self.parse_generic_text_element(token, RawTextKind::Rawtext);
            }
            "iframe" => {
                self.frameset_ok = false;
                self.parse_generic_text_element(token, RawTextKind::Rawtext);
            }
            "noembed" => self.parse_generic_text_element(token, RawTextKind::Rawtext),
            "noscript" if self.scripting_enabled => {
                self.parse_generic_text_element(token, RawTextKind::Rawtext);
            }
            // "A start tag whose tag name is "select""
            "select" => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(token);
                self.frameset_ok = false;
                // "If the insertion mode is one of "in table", "in caption", "in
                // table body", "in row", or "in cell", then switch the insertion
                // mode to "in select in table". Otherwise, switch the insertion
                // mode to "in select"."
                let mode = match self.insertion_mode {
                    InsertionMode::InTable
                    | InsertionMode::InCaption
                    | InsertionMode::InTableBody
                    | InsertionMode::InRow
                    | InsertionMode::InCell => InsertionMode::InSelectInTable,
                    _ => InsertionMode::InSelect,
                };
                self.switch_mode(mode);
            }
            "optgroup" | "option" => {
                if self.current_node_is("option") {
                    let _ = self.stack_of_open_elements.pop();
                }
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(token);
            }
            "rb" | "rtc" => {
                if self.has_element_in_scope("ruby", Scope::Default) {
                    self.generate_implied_end_tags(None);
                    if !self.current_node_is("ruby") {
                        self.unexpected_token(token);
                    }
                }
                let _ = self.insert_html_element(token);
            }
            "rp" | "rt" => {
                if self.has_element_in_scope("ruby", Scope::Default) {
                    self.generate_implied_end_tags(Some("rtc"));
                    if !self.current_node_is("rtc") && !self.current_node_is("ruby") {
                        self.unexpected_token(token);
                    }
                }
                let _ = self.insert_html_element(token);
            }
            // "A start tag whose tag name is "math"" / "A start tag whose tag
            // name is "svg""
            // "Reconstruct the active formatting elements, if any. Adjust
            // MathML attributes for the token. Adjust foreign attributes for the
            // token. Insert a foreign element for the token, with MathML
            // namespace. If the token has its self-closing flag set, pop the
            // current node off the stack of open elements and acknowledge the
            // token's self-closing flag."
            "math" | "svg" => {
                self.reconstruct_active_formatting_elements();
                let namespace = if name == "math" {
                    Namespace::MathMl
                } else {
                    Namespace::Svg
                };
                let _ = self.insert_foreign_element(name, token.attributes(), namespace);
                if token.is_self_closing() {
                    let _ = self.stack_of_open_elements.pop();
                    self.acknowledge_self_closing_flag();
                }
            }
            "caption" | "col" | "colgroup" | "frame" | "head" | "tbody" | "td" | "tfoot" | "th"
            | "thead" | "tr" => self.unexpected_token(token),
            // "Any other start tag"
            // "Reconstruct the active formatting elements, if any. Insert an HTML
            // element for the token."
            _ => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(token);
            }
        }
        Flow::Done
    }

    /// The shared loop of the "li", "dd" and "dt" start tags: close the
    /// nearest open list item of a matching kind unless a special element
    /// other than `address`, `div` or `p` is in the way.
    fn close_list_item(&mut self, names: &[&str]) {
        for index in (0..self.stack_of_open_elements.len()).rev() {
            let node = self.stack_of_open_elements[index];
            // "Loop: If node is an li element, then run these substeps: Generate
            // implied end tags, except for li elements. If the current node is
            // not an li element, then this is a parse error. Pop elements from
            // the stack of open elements until an li element has been popped
            // from the stack. Jump to the step labeled done below."
            if self.is_html_element_in(node, names) {
                let name = self.local_name(node).to_string();
                self.generate_implied_end_tags(Some(&name));
                if !self.current_node_is(&name) {
                    self.parse_error(ParseErrorCode::MisnestedTag, &name);
                }
                self.pop_until(&name);
                return;
            }
            // "If node is in the special category, but is not an address, div,
            // or p element, then jump to the step labeled done below."
            if self.is_special(node) && !self.is_html_element_in(node, &["address", "div", "p"]) {
                return;
            }
        }
    }

    /// "Reconstruct the active formatting elements, if any. Insert an HTML
    /// element for the token. Push onto the list of active formatting
    /// elements that element."
    fn insert_formatting_element(&mut self, token: &Token) {
        self.reconstruct_active_formatting_elements();
        let element = self.insert_html_element(token);
        self.push_active_formatting_element(element, token);
    }

    fn in_body_end_tag(&mut self, name: &str, token: &Token) -> Flow {
        match name {
            "template" => return self.process_using_rules_for(InsertionMode::InHead, token),
            // "An end tag whose tag name is "body""
            // "An end tag whose tag name is "html""
            "body" | "html" => {
                // "If the stack of open elements does not have a body element in
                // scope, this is a parse error; ignore the token."
                if !self.has_element_in_scope("body", Scope::Default) {
                    self.unexpected_token(token);
                    return Flow::Done;
                }
                if self.has_unclosed_elements() {
                    self.parse_error(ParseErrorCode::UnexpectedEndTag, "unclosed elements");
                }
                // "Switch the insertion mode to "after body"."
                self.switch_mode(InsertionMode::AfterBody);
                if name == "html" {
                    return Flow::Reprocess;
                }
            }
            _ if BLOCK_END_TAGS.contains(&name) => {
                // "If the stack of open elements does not have an element in scope
                // that is an HTML element with the same tag name as that of the
                // token, then this is a parse error; ignore the token."
                if !self.has_element_in_scope(name, Scope::Default) {
                    self.unexpected_token(token);
                    return Flow::Done;
                }
                self.close_element_in_scope(name);
            }
            // "An end tag whose tag name is "form""
            "form" => self.in_body_form_end_tag(token),
            // "An end tag whose tag name is "p""
            "p" => {
                // "If the stack of open elements does not have a p element in
                // button scope, then this is a parse error; insert an HTML element
                // for a "p" start tag token with no attributes."
                if !self.has_element_in_scope("p", Scope::Button) {
                    self.unexpected_token(token);
                    let _ = self.insert_html_element_named("p");
                }
                self.close_p_element();
            }
            // "An end tag whose tag name is "li""
            "li" => {
                if !self.has_element_in_scope("li", Scope::ListItem) {
                    self.unexpected_token(token);
                    return Flow::Done;
                }
                self.generate_implied_end_tags(Some("li"));
                if !self.current_node_is("li") {
                    self.parse_error(ParseErrorCode::MisnestedTag, name);
                }
                self.pop_until("li");
            }
            "dd" | "dt" => {
                if !self.has_element_in_scope(name, Scope::Default) {
                    self.unexpected_token(token);
                    return Flow::Done;
                }
                self.generate_implied_end_tags(Some(name));
                if !self.current_node_is(name) {
                    self.parse_error(ParseErrorCode::MisnestedTag, name);
                }
                self.pop_until(name);
            }
            _ if HEADINGS.contains(&name) => {
                // "If the stack of open elements does not have an element in scope
                // that is an HTML element and whose tag name is one of "h1", "h2",
                // "h3", "h4", "h5", or "h6", then this is a parse error; ignore the
                // token."
                if !self.has_any_element_in_scope(HEADINGS, Scope::Default) {
                    self.unexpected_token(token);
                    return Flow::Done;
                }
                self.generate_implied_end_tags(None);
                if !self.current_node_is(name) {
                    self.parse_error(ParseErrorCode::MisnestedTag, name);
                }
                self.pop_until_one_of(HEADINGS);
            }
            // "An end tag whose tag name is one of: "a", "b", "big", "code",
            // "em", "font", "i", "nobr", "s", "small", "strike", "strong", "tt",
            // "u""
            // "Run the adoption agency algorithm for the token."
            _ if Self::is_formatting_tag(name) => {
                if self.run_adoption_agency(name) {
                    self.any_other_end_tag(name);
                }
            }
            "applet" | "marquee" | "object" => {
                if !self.has_element_in_scope(name, Scope::Default) {
                    self.unexpected_token(token);
                    return Flow::Done;
                }
                self.close_element_in_scope(name);
                self.clear_active_formatting_elements_to_last_marker();
            }
            // "An end tag whose tag name is "br""
            // "Parse error. Drop the attributes from the token, and act as
            // described in the next entry; i.e. act as if this was a "br" start
            // tag token with no attributes, rather than the end tag token that it
            // actually is."
            "br" => {
                self.unexpected_token(token);
                return Flow::ReprocessAs(Token::start_tag("br", Vec::new()));
            }
            _ => self.any_other_end_tag(name),
        }
        Flow::Done
    }

    /// "Generate implied end tags. If the current node is not an HTML element
    /// with the same tag name as that of the token, then this is a parse
    /// error. Pop elements from the stack of open elements until an HTML
    /// element with the same tag name as the token has been popped from the
    /// stack."
    fn close_element_in_scope(&mut self, name: &str) {
        self.generate_implied_end_tags(None);
        if !self.current_node_is(name) {
            self.parse_error(ParseErrorCode::MisnestedTag, name);
        }
        self.pop_until(name);
    }

    /// "An end tag whose tag name is "form""
    fn in_body_form_end_tag(&mut self, token: &Token) {
        if self.stack_contains("template") {
            // "If there is a template element on the stack of open elements, then
            // run these substeps instead: If the stack of open elements does not
            // have a form element in scope, then this is a parse error; return
            // and ignore the token."
            if !self.has_element_in_scope("form", Scope::Default) {
                self.unexpected_token(token);
                return;
            }
            self.close_element_in_scope("form");
            return;
        }
        // "Let node be the element that the form element pointer is set to, or
        // null if it is not set to an element. Set the form element pointer to
        // null."
        let node = self.form_element_pointer.take();
        // "If node is null or if the stack of open elements does not have node
        // in scope, then this is a parse error; return and ignore the token."
        let Some(node) = node.filter(|&node| self.has_node_in_scope(node, Scope::Default)) else {
            self.unexpected_token(token);
            return;
        };
        // "Generate implied end tags. If the current node is not node, then this
        // is a parse error. Remove node from the stack of open elements."
        self.generate_implied_end_tags(None);
        if self.current_node() != Some(node) {
            self.parse_error(ParseErrorCode::MisnestedTag, "form");
        }
        self.remove_from_stack(node);
    }

    /// [§ 13.2.6.4.7](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    ///
    /// "Any other end tag"
    pub(in crate::parser) fn any_other_end_tag(&mut self, name: &str) {
        // STEP 1: "Initialize node to be the current node (the bottommost node
        //          of the stack)."
        for index in (0..self.stack_of_open_elements.len()).rev() {
            let node = self.stack_of_open_elements[index];
            // STEP 2: "Loop: If node is an HTML element with the same tag name as
            //          the token, then: Generate implied end tags, except for HTML
            //          elements with the same tag name as the token. If node is not
            //          the current node, then this is a parse error. Pop all the
            //          nodes from the current node up to node, including node, then
            //          stop these steps."
            if self.is_html_element(node, name) {
                self.generate_implied_end_tags(Some(name));
                if self.current_node() != Some(node) {
                    self.parse_error(ParseErrorCode::MisnestedTag, name);
                }
                self.pop_until_node(node);
                return;
            }
            // STEP 3: "Otherwise, if node is in the special category, then this is
            //          a parse error; ignore the token, and return."
            if self.is_special(node) {
                self.parse_error(ParseErrorCode::UnexpectedEndTag, name);
                return;
            }
            // STEP 4: "Set node to the previous entry in the stack of open
            //          elements."
        }
    }
}
