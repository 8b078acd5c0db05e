//! [§ 13.2.6.4.9 The "in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable)
//! and the modes nested inside a table: table text, caption, column group,
//! table body, row and cell.

use super::{is_end_tag, is_start_tag};
use crate::error::ParseErrorCode;
use crate::parser::core::{Flow, HTMLParser, InsertionMode};
use crate::parser::tree_builder::Scope;
use crate::tokenizer::Token;

const TABLE_SECTIONS: &[&str] = &["tbody", "tfoot", "thead"];

/// Start tags that close an open caption, cell or row before being
/// reprocessed.
const TABLE_STRUCTURE_START_TAGS: &[&str] = &[
    "caption", "col", "colgroup", "tbody", "td", "tfoot", "th", "thead", "tr",
];

impl HTMLParser {
    /// [§ 13.2.6.4.9 The "in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable)
    pub(in crate::parser) fn handle_in_table_mode(&mut self, token: &Token) -> Flow {
        match token {
            // "A character token, if the current node is table, tbody,
            // template, tfoot, thead, or tr element"
            Token::Character { .. }
                if self.current_node().is_some_and(|id| {
                    self.is_html_element_in(
                        id,
                        &["table", "tbody", "template", "tfoot", "thead", "tr"],
                    )
                }) =>
            {
                // "Let the pending table character tokens be an empty list of
                // tokens. Let the original insertion mode be the current
                // insertion mode. Switch the insertion mode to "in table text"
                // and reprocess the token."
                self.pending_table_characters.clear();
                self.original_insertion_mode = Some(self.insertion_mode);
                self.switch_mode(InsertionMode::InTableText);
                Flow::Reprocess
            }
            Token::Comment { data } => {
                self.insert_comment(data);
                Flow::Done
            }
            Token::Doctype { .. } => {
                self.unexpected_token(token);
                Flow::Done
            }
            Token::StartTag { name, .. } => match name.as_str() {
                // "A start tag whose tag name is "caption""
                "caption" => {
                    self.clear_stack_back_to_table_context();
                    self.insert_marker();
                    let _ = self.insert_html_element(token);
                    self.switch_mode(InsertionMode::InCaption);
                    Flow::Done
                }
                "colgroup" => {
                    self.clear_stack_back_to_table_context();
                    let _ = self.insert_html_element(token);
                    self.switch_mode(InsertionMode::InColumnGroup);
                    Flow::Done
                }
                // "A start tag whose tag name is "col""
                // "Clear the stack back to a table context. Insert an HTML
                // element for a "colgroup" start tag token with no attributes,
                // then switch the insertion mode to "in column group".
                // Reprocess the current token."
                "col" => {
                    self.clear_stack_back_to_table_context();
                    let _ = self.insert_html_element_named("colgroup");
                    self.switch_mode(InsertionMode::InColumnGroup);
                    Flow::Reprocess
                }
                "tbody" | "tfoot" | "thead" => {
                    self.clear_stack_back_to_table_context();
                    let _ = self.insert_html_element(token);
                    self.switch_mode(InsertionMode::InTableBody);
                    Flow::Done
                }
                "td" | "th" | "tr" => {
                    self.clear_stack_back_to_table_context();
                    let _ = self.insert_html_element_named("tbody");
                    self.switch_mode(InsertionMode::InTableBody);
                    Flow::Reprocess
                }
                // "A start tag whose tag name is "table""
                "table" => {
                    self.unexpected_token(token);
                    // "If the stack of open elements does not have a table
                    // element in table scope, ignore the token."
                    if !self.has_element_in_scope("table", Scope::Table) {
                        return Flow::Done;
                    }
                    // "Otherwise: Pop elements from this stack until a table
                    // element has been popped from the stack. Reset the
                    // insertion mode appropriately. Reprocess the token."
                    self.pop_until("table");
                    self.reset_insertion_mode_appropriately();
                    Flow::Reprocess
                }
                "style" | "script" | "template" => {
                    self.process_using_rules_for(InsertionMode::InHead, token)
                }
                // "A start tag whose tag name is "input""
                // "If the token does not have an attribute with the name
                // "type", or if it does, but that attribute's value is not an
                // ASCII case-insensitive match for the string "hidden", then:
                // act as described in the "anything else" entry below."
                "input"
                    if token
                        .attribute("type")
                        .is_some_and(|kind| kind.eq_ignore_ascii_case("hidden")) =>
                {
                    self.unexpected_token(token);
                    let _ = self.insert_html_element(token);
                    let _ = self.stack_of_open_elements.pop();
                    self.acknowledge_self_closing_flag();
                    Flow::Done
                }
                // "A start tag whose tag name is "form""
                "form" => {
                    self.unexpected_token(token);
                    // "If there is a template element on the stack of open
                    // elements, or if the form element pointer is not null,
                    // ignore the token."
                    if self.stack_contains("template") || self.form_element_pointer.is_some() {
                        return Flow::Done;
                    }
                    // "Otherwise: Insert an HTML element for the token, and set
                    // the form element pointer to point to the element created.
                    // Pop that form element off the stack of open elements."
                    let form = self.insert_html_element(token);
                    self.form_element_pointer = Some(form);
                    let _ = self.stack_of_open_elements.pop();
                    Flow::Done
                }
                _ => self.in_table_anything_else(token),
            },
            Token::EndTag { name, .. } => match name.as_str() {
                // "An end tag whose tag name is "table""
                "table" => {
                    if !self.has_element_in_scope("table", Scope::Table) {
                        self.unexpected_token(token);
                        return Flow::Done;
                    }
                    self.pop_until("table");
                    self.reset_insertion_mode_appropriately();
                    Flow::Done
                }
                "body" | "caption" | "col" | "colgroup" | "html" | "tbody" | "td" | "tfoot"
                | "th" | "thead" | "tr" => {
                    self.unexpected_token(token);
                    Flow::Done
                }
                "template" => self.process_using_rules_for(InsertionMode::InHead, token),
                _ => self.in_table_anything_else(token),
            },
            // "An end-of-file token"
            // "Process the token using the rules for the "in body" insertion
            // mode."
            Token::EndOfFile => self.process_using_rules_for(InsertionMode::InBody, token),
            Token::Character { .. } => self.in_table_anything_else(token),
        }
    }

    /// "Anything else"
    ///
    /// "Parse error. Enable foster parenting, process the token using the
    /// rules for the "in body" insertion mode, and then disable foster
    /// parenting."
    fn in_table_anything_else(&mut self, token: &Token) -> Flow {
        self.parse_error(
            ParseErrorCode::FosterParentedContent,
            token.tag_name().unwrap_or("text"),
        );
        self.foster_parenting = true;
        let flow = self.process_using_rules_for(InsertionMode::InBody, token);
        self.foster_parenting = false;
        flow
    }

    /// [§ 13.2.6.4.10 The "in table text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intabletext)
    pub(in crate::parser) fn handle_in_table_text_mode(&mut self, token: &Token) -> Flow {
        match token {
            Token::Character { data: '\0' } => {
                self.parse_error(ParseErrorCode::UnexpectedNullCharacter, "in table text");
                Flow::Done
            }
            // "Any other character token"
            // "Append the character token to the pending table character
            // tokens list."
            Token::Character { data } => {
                self.pending_table_characters.push(*data);
                Flow::Done
            }
            // "Anything else"
            _ => {
                let pending = std::mem::take(&mut self.pending_table_characters);
                // "If any of the tokens in the pending table character tokens
                // list are character tokens that are not ASCII whitespace, then
                // this is a parse error: reprocess the character tokens in the
                // pending table character tokens list using the rules given in
                // the "anything else" entry in the "in table" insertion mode."
                if pending.chars().any(|c| !Self::is_whitespace(c)) {
                    self.parse_error(ParseErrorCode::FosterParentedContent, &pending);
                    self.foster_parenting = true;
                    for data in pending.chars() {
                        let _ = self.process_using_rules_for(
                            InsertionMode::InBody,
                            &Token::Character { data },
                        );
                    }
                    self.foster_parenting = false;
                } else {
                    // "Otherwise, insert the characters given by the pending
                    // table character tokens list."
                    for c in pending.chars() {
                        self.insert_character(c);
                    }
                }
                // "Switch the insertion mode to the original insertion mode and
                // reprocess the token."
                self.return_to_original_insertion_mode();
                Flow::Reprocess
            }
        }
    }

    /// [§ 13.2.6.4.11 The "in caption" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incaption)
    pub(in crate::parser) fn handle_in_caption_mode(&mut self, token: &Token) -> Flow {
        let closes_caption = is_end_tag(token, &["caption", "table"])
            || is_start_tag(token, TABLE_STRUCTURE_START_TAGS);
        if closes_caption {
            // "If the stack of open elements does not have a caption element
            // in table scope, this is a parse error; ignore the token.
            // (fragment case)"
            if !self.has_element_in_scope("caption", Scope::Table) {
                self.unexpected_token(token);
                return Flow::Done;
            }
            // "Otherwise: Generate implied end tags. Now, if the current node
            // is not a caption element, then this is a parse error. Pop
            // elements from this stack until a caption element has been popped
            // from the stack. Clear the list of active formatting elements up
            // to the last marker. Switch the insertion mode to "in table"."
            self.generate_implied_end_tags(None);
            if !self.current_node_is("caption") {
                self.parse_error(ParseErrorCode::MisnestedTag, "caption");
            }
            self.pop_until("caption");
            self.clear_active_formatting_elements_to_last_marker();
            self.switch_mode(InsertionMode::InTable);
            if is_end_tag(token, &["caption"]) {
                return Flow::Done;
            }
            return Flow::Reprocess;
        }
        if is_end_tag(
            token,
            &[
                "body", "col", "colgroup", "html", "tbody", "td", "tfoot", "th", "thead", "tr",
            ],
        ) {
            self.unexpected_token(token);
            return Flow::Done;
        }
        self.process_using_rules_for(InsertionMode::InBody, token)
    }

    /// [§ 13.2.6.4.12 The "in column group" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incolgroup)
    pub(in crate::parser) fn handle_in_column_group_mode(&mut self, token: &Token) -> Flow {
        match token {
            Token::Character { data } if Self::is_whitespace(*data) => {
                self.insert_character(*data);
                Flow::Done
            }
            Token::Comment { data } => {
                self.insert_comment(data);
                Flow::Done
            }
            Token::Doctype { .. } => {
                self.unexpected_token(token);
                Flow::Done
            }
            Token::StartTag { name, .. } if name == "html" => {
                self.process_using_rules_for(InsertionMode::InBody, token)
            }
            // "A start tag whose tag name is "col""
            // "Insert an HTML element for the token. Immediately pop the current
            // node off the stack of open elements. Acknowledge the token's
            // self-closing flag, if it is set."
            Token::StartTag { name, .. } if name == "col" => {
                let _ = self.insert_html_element(token);
                let _ = self.stack_of_open_elements.pop();
                self.acknowledge_self_closing_flag();
                Flow::Done
            }
            Token::EndTag { name, .. } if name == "colgroup" => {
                // "If the current node is not a colgroup element, then this is a
                // parse error; ignore the token."
                if !self.current_node_is("colgroup") {
                    self.unexpected_token(token);
                    return Flow::Done;
                }
                let _ = self.stack_of_open_elements.pop();
                self.switch_mode(InsertionMode::InTable);
                Flow::Done
            }
            Token::EndTag { name, .. } if name == "col" => {
                self.unexpected_token(token);
                Flow::Done
            }
            Token::StartTag { name, .. } | Token::EndTag { name, .. } if name == "template" => {
                self.process_using_rules_for(InsertionMode::InHead, token)
            }
            Token::EndOfFile => self.process_using_rules_for(InsertionMode::InBody, token),
            // "Anything else"
            // "If the current node is not a colgroup element, then this is a
            // parse error; ignore the token. Otherwise, pop the current node
            // from the stack of open elements. Switch the insertion mode to "in
            // table". Reprocess the token."
            _ => {
                if !self.current_node_is("colgroup") {
                    self.unexpected_token(token);
                    return Flow::Done;
                }
                let _ = self.stack_of_open_elements.pop();
                self.switch_mode(InsertionMode::InTable);
                Flow::Reprocess
            }
        }
    }

    /// [§ 13.2.6.4.13 The "in table body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intbody)
    pub(in crate::parser) fn handle_in_table_body_mode(&mut self, token: &Token) -> Flow {
        match token {
            Token::StartTag { name, .. } if name == "tr" => {
                self.clear_stack_back_to_table_body_context();
                let _ = self.insert_html_element(token);
                self.switch_mode(InsertionMode::InRow);
                Flow::Done
            }
            // "A start tag whose tag name is one of: "th", "td""
            // "Parse error. Clear the stack back to a table body context.
            // Insert an HTML element for a "tr" start tag token with no
            // attributes, then switch the insertion mode to "in row".
            // Reprocess the current token."
            Token::StartTag { name, .. } if name == "th" || name == "td" => {
                self.unexpected_token(token);
                self.clear_stack_back_to_table_body_context();
                let _ = self.insert_html_element_named("tr");
                self.switch_mode(InsertionMode::InRow);
                Flow::Reprocess
            }
            Token::EndTag { name, .. } if TABLE_SECTIONS.contains(&name.as_str()) => {
                if !self.has_element_in_scope(name, Scope::Table) {
                    self.unexpected_token(token);
                    return Flow::Done;
                }
                self.clear_stack_back_to_table_body_context();
                let _ = self.stack_of_open_elements.pop();
                self.switch_mode(InsertionMode::InTable);
                Flow::Done
            }
            _ if is_start_tag(
                token,
                &["caption", "col", "colgroup", "tbody", "tfoot", "thead"],
            ) || is_end_tag(token, &["table"]) =>
            {
                // "If the stack of open elements does not have a tbody, thead, or
                // tfoot element in table scope, this is a parse error; ignore
                // the token."
                if !self.has_any_element_in_scope(TABLE_SECTIONS, Scope::Table) {
                    self.unexpected_token(token);
                    return Flow::Done;
                }
                // "Otherwise: Clear the stack back to a table body context. Pop
                // the current node from the stack of open elements. Switch the
                // insertion mode to "in table". Reprocess the token."
                self.clear_stack_back_to_table_body_context();
                let _ = self.stack_of_open_elements.pop();
                self.switch_mode(InsertionMode::InTable);
                Flow::Reprocess
            }
            _ if is_end_tag(
                token,
                &["body", "caption", "col", "colgroup", "html", "td", "th", "tr"],
            ) =>
            {
                self.unexpected_token(token);
                Flow::Done
            }
            _ => self.process_using_rules_for(InsertionMode::InTable, token),
        }
    }

    /// [§ 13.2.6.4.14 The "in row" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intr)
    pub(in crate::parser) fn handle_in_row_mode(&mut self, token: &Token) -> Flow {
        match token {
            // "A start tag whose tag name is one of: "th", "td""
            // "Clear the stack back to a table row context. Insert an HTML
            // element for the token, then switch the insertion mode to "in
            // cell". Insert a marker at the end of the list of active
            // formatting elements."
            Token::StartTag { name, .. } if name == "th" || name == "td" => {
                self.clear_stack_back_to_table_row_context();
                let _ = self.insert_html_element(token);
                self.switch_mode(InsertionMode::InCell);
                self.insert_marker();
                Flow::Done
            }
            Token::EndTag { name, .. } if name == "tr" => {
                let _ = self.close_table_row(token);
                Flow::Done
            }
            _ if is_start_tag(
                token,
                &["caption", "col", "colgroup", "tbody", "tfoot", "thead", "tr"],
            ) || is_end_tag(token, &["table"]) =>
            {
                if self.close_table_row(token) {
                    Flow::Reprocess
                } else {
                    Flow::Done
                }
            }
            Token::EndTag { name, .. } if TABLE_SECTIONS.contains(&name.as_str()) => {
                if !self.has_element_in_scope(name, Scope::Table) {
                    self.unexpected_token(token);
                    return Flow::Done;
                }
                // "If the stack of open elements does not have a tr element in
                // table scope, ignore the token."
                if self.close_table_row(token) {
                    Flow::Reprocess
                } else {
                    Flow::Done
                }
            }
            _ if is_end_tag(
                token,
                &["body", "caption", "col", "colgroup", "html", "td", "th"],
            ) =>
            {
                self.unexpected_token(token);
                Flow::Done
            }
            _ => self.process_using_rules_for(InsertionMode::InTable, token),
        }
    }

    /// "If the stack of open elements does not have a tr element in table
    /// scope, this is a parse error; ignore the token. Otherwise: Clear the
    /// stack back to a table row context. Pop the current node (which will be
    /// a tr element) from the stack of open elements. Switch the insertion
    /// mode to "in table body"."
    ///
    /// Returns whether the row was closed.
    fn close_table_row(&mut self, token: &Token) -> bool {
        if !self.has_element_in_scope("tr", Scope::Table) {
            self.unexpected_token(token);
            return false;
        }
        self.clear_stack_back_to_table_row_context();
        let _ = self.stack_of_open_elements.pop();
        self.switch_mode(InsertionMode::InTableBody);
        true
    }

    /// [§ 13.2.6.4.15 The "in cell" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intd)
    pub(in crate::parser) fn handle_in_cell_mode(&mut self, token: &Token) -> Flow {
        match token {
            // "An end tag whose tag name is one of: "td", "th""
            Token::EndTag { name, .. } if name == "td" || name == "th" => {
                // "If the stack of open elements does not have an element in
                // table scope that is an HTML element with the same tag name as
                // that of the token, then this is a parse error; ignore the
                // token."
                if !self.has_element_in_scope(name, Scope::Table) {
                    self.unexpected_token(token);
                    return Flow::Done;
                }
                // "Otherwise: Generate implied end tags. Now, if the current
                // node is not an HTML element with the same tag name as the
                // token, then this is a parse error. Pop elements from the stack
                // of open elements stack until an HTML element with the same tag
                // name as the token has been popped from the stack. Clear the
                // list of active formatting elements up to the last marker.
                // Switch the insertion mode to "in row"."
                self.generate_implied_end_tags(None);
                if !self.current_node_is(name) {
                    self.parse_error(ParseErrorCode::MisnestedTag, name);
                }
                self.pop_until(name);
                self.clear_active_formatting_elements_to_last_marker();
                self.switch_mode(InsertionMode::InRow);
                Flow::Done
            }
            _ if is_start_tag(token, TABLE_STRUCTURE_START_TAGS) => {
                // "Assert: The stack of open elements has a td or th element in
                // table scope."
                if !self.has_any_element_in_scope(&["td", "th"], Scope::Table) {
                    self.unexpected_token(token);
                    return Flow::Done;
                }
                // "Close the cell and reprocess the token."
                self.close_the_cell();
                Flow::Reprocess
            }
            _ if is_end_tag(token, &["body", "caption", "col", "colgroup", "html"]) => {
                self.unexpected_token(token);
                Flow::Done
            }
            Token::EndTag { name, .. }
                if name == "table" || name == "tr" || TABLE_SECTIONS.contains(&name.as_str()) =>
            {
                if !self.has_element_in_scope(name, Scope::Table) {
                    self.unexpected_token(token);
                    return Flow::Done;
                }
                self.close_the_cell();
                Flow::Reprocess
            }
            _ => self.process_using_rules_for(InsertionMode::InBody, token),
        }
    }
}

