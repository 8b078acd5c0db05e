//! [§ 13.2.6.4.16 The "in select" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselect)

use super::{is_end_tag, is_start_tag};
use crate::error::ParseErrorCode;
use crate::parser::core::{Flow, HTMLParser, InsertionMode};
use crate::parser::tree_builder::Scope;
use crate::tokenizer::Token;

const TABLE_TAGS: &[&str] = &["caption", "table", "tbody", "tfoot", "thead", "tr", "td", "th"];

impl HTMLParser {
    /// [§ 13.2.6.4.16 The "in select" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselect)
    pub(in crate::parser) fn handle_in_select_mode(&mut self, token: &Token) -> Flow {
        match token {
            Token::Character { data: '\0' } => {
                self.parse_error(ParseErrorCode::UnexpectedNullCharacter, "in select");
            }
            Token::Character { data } => self.insert_character(*data),
            Token::Comment { data } => self.insert_comment(data),
            Token::Doctype { .. } => self.unexpected_token(token),
            Token::StartTag { name, .. } => match name.as_str() {
                "html" => return self.process_using_rules_for(InsertionMode::InBody, token),
                // "A start tag whose tag name is "option""
                // "If the current node is an option element, pop that node from
                // the stack of open elements. Insert an HTML element for the
                // token."
                "option" => {
                    self.pop_if_current_is("option");
                    let _ = self.insert_html_element(token);
                }
                "optgroup" => {
                    self.pop_if_current_is("option");
                    self.pop_if_current_is("optgroup");
                    let _ = self.insert_html_element(token);
                }
                "hr" => {
                    self.pop_if_current_is("option");
                    self.pop_if_current_is("optgroup");
                    let _ = self.insert_html_element(token);
                    let _ = self.stack_of_open_elements.pop();
                    self.acknowledge_self_closing_flag();
                }
                // "A start tag whose tag name is "select""
                // "Parse error. If the stack of open elements does not have a
                // select element in select scope, ignore the token. (fragment
                // case) Otherwise: Pop elements from the stack of open elements
                // until a select element has been popped from the stack. Reset
                // the insertion mode appropriately."
                "select" => {
                    self.unexpected_token(token);
                    let _ = self.close_select();
                }
                // "A start tag whose tag name is one of: "input", "keygen",
                // "textarea""
                "input" | "keygen" | "textarea" => {
                    self.unexpected_token(token);
                    if self.close_select() {
                        return Flow::Reprocess;
                    }
                }
                "script" | "template" => {
                    return self.process_using_rules_for(InsertionMode::InHead, token);
                }
                _ => self.unexpected_token(token),
            },
            Token::EndTag { name, .. } => match name.as_str() {
                // "An end tag whose tag name is "optgroup""
                "optgroup" => {
                    // "First, if the current node is an option element, and the
                    // node immediately before it in the stack of open elements is
                    // an optgroup element, then pop the current node from the
                    // stack of open elements."
                    let len = self.stack_of_open_elements.len();
                    if self.current_node_is("option")
                        && len >= 2
                        && self.is_html_element(self.stack_of_open_elements[len - 2], "optgroup")
                    {
                        let _ = self.stack_of_open_elements.pop();
                    }
                    // "If the current node is an optgroup element, then pop that
                    // node from the stack of open elements. Otherwise, this is a
                    // parse error; ignore the token."
                    if self.current_node_is("optgroup") {
                        let _ = self.stack_of_open_elements.pop();
                    } else {
                        self.unexpected_token(token);
                    }
                }
                "option" => {
                    if self.current_node_is("option") {
                        let _ = self.stack_of_open_elements.pop();
                    } else {
                        self.unexpected_token(token);
                    }
                }
                "select" => {
                    if !self.close_select() {
                        self.unexpected_token(token);
                    }
                }
                "template" => return self.process_using_rules_for(InsertionMode::InHead, token),
                _ => self.unexpected_token(token),
            },
            Token::EndOfFile => return self.process_using_rules_for(InsertionMode::InBody, token),
        }
        Flow::Done
    }

    fn pop_if_current_is(&mut self, name: &str) {
        if self.current_node_is(name) {
            let _ = self.stack_of_open_elements.pop();
        }
    }

    /// Pop up to and including the open `select` and reset the insertion
    /// mode. Returns `false` when no select is in select scope.
    fn close_select(&mut self) -> bool {
        if !self.has_element_in_scope("select", Scope::Select) {
            return false;
        }
        self.pop_until("select");
        self.reset_insertion_mode_appropriately();
        true
    }

    /// [§ 13.2.6.4.17 The "in select in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselectintable)
    pub(in crate::parser) fn handle_in_select_in_table_mode(&mut self, token: &Token) -> Flow {
        // "A start tag whose tag name is one of: "caption", "table", "tbody",
        // "tfoot", "thead", "tr", "td", "th""
        // "Parse error. Pop elements from the stack of open elements until a
        // select element has been popped from the stack. Reset the insertion
        // mode appropriately. Reprocess the token."
        if is_start_tag(token, TABLE_TAGS) {
            self.unexpected_token(token);
            self.pop_until("select");
            self.reset_insertion_mode_appropriately();
            return Flow::Reprocess;
        }
        if is_end_tag(token, TABLE_TAGS) {
            self.unexpected_token(token);
            // "If the stack of open elements does not have an element in table
            // scope that is an HTML element with the same tag name as that of
            // the token, then ignore the token."
            let name = token.tag_name().unwrap_or_default();
            if !self.has_element_in_scope(name, Scope::Table) {
                return Flow::Done;
            }
            self.pop_until("select");
            self.reset_insertion_mode_appropriately();
            return Flow::Reprocess;
        }
        self.process_using_rules_for(InsertionMode::InSelect, token)
    }
}
