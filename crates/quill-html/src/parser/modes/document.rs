//! The modes around the body: everything before `<body>`, the text mode,
//! and the modes after `</body>` and `</frameset>`.

use quill_dom::{DocumentTypeData, Namespace, NodeId, NodeType, QuirksMode};

use super::{is_start_tag, is_whitespace_character};
use crate::error::ParseErrorCode;
use crate::parser::core::{Flow, HTMLParser, InsertionMode};
use crate::parser::quirks::{is_conforming_doctype, quirks_mode_for};
use crate::tokenizer::{RawTextKind, Token};

/// Start tags the "in head" mode handles, which "after head" forwards there.
const HEAD_START_TAGS: &[&str] = &[
    "base", "basefont", "bgsound", "link", "meta", "noframes", "script", "style", "template",
    "title",
];

impl HTMLParser {
    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    pub(in crate::parser) fn handle_initial_mode(&mut self, token: &Token) -> Flow {
        match token {
            // "A character token that is one of U+0009 CHARACTER TABULATION, ..."
            // "Ignore the token."
            _ if is_whitespace_character(token) => {}
            // "A comment token"
            // "Insert a comment as the last child of the Document object."
            Token::Comment { data } => self.insert_comment_in(NodeId::ROOT, data),
            // "A DOCTYPE token"
            Token::Doctype {
                name,
                public_identifier,
                system_identifier,
                force_quirks,
            } => {
                let (name, public_id, system_id) = (
                    name.as_deref(),
                    public_identifier.as_deref(),
                    system_identifier.as_deref(),
                );
                if !is_conforming_doctype(name, public_id, system_id) {
                    self.parse_error(ParseErrorCode::NonConformingDoctype, name.unwrap_or_default());
                }
                // "Append a DocumentType node to the Document node, with its
                // name set to the name given in the DOCTYPE token, or the empty
                // string if the name was missing; its public ID set to the public
                // identifier given in the DOCTYPE token, or the empty string if
                // the public identifier was missing; and its system ID set to the
                // system identifier given in the DOCTYPE token, or the empty
                // string if the system identifier was missing."
                let doctype = self.tree.alloc(NodeType::DocumentType(DocumentTypeData {
                    name: name.unwrap_or_default().to_string(),
                    public_id: public_id.unwrap_or_default().to_string(),
                    system_id: system_id.unwrap_or_default().to_string(),
                }));
                self.append_to_document(doctype);
                let mode = quirks_mode_for(name, public_id, system_id, *force_quirks);
                self.tree.set_quirks_mode(mode);
                // "Then, switch the insertion mode to "before html"."
                self.switch_mode(InsertionMode::BeforeHtml);
            }
            // "Anything else"
            // "If the document is not an iframe srcdoc document, then this is a
            // parse error; if the parser cannot change the mode flag is false,
            // set the Document to quirks mode. In any case, switch the insertion
            // mode to "before html", then reprocess the token."
            _ => {
                self.parse_error(ParseErrorCode::MissingDoctype, "");
                self.tree.set_quirks_mode(QuirksMode::Quirks);
                self.switch_mode(InsertionMode::BeforeHtml);
                return Flow::Reprocess;
            }
        }
        Flow::Done
    }

    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    pub(in crate::parser) fn handle_before_html_mode(&mut self, token: &Token) -> Flow {
        match token {
            // "A DOCTYPE token"
            // "Parse error. Ignore the token."
            Token::Doctype { .. } => {
                self.parse_error(ParseErrorCode::UnexpectedDoctype, "before html");
            }
            Token::Comment { data } => self.insert_comment_in(NodeId::ROOT, data),
            _ if is_whitespace_character(token) => {}
            // "A start tag whose tag name is "html""
            // "Create an element for the token in the HTML namespace, with the
            // Document as the intended parent. Append it to the Document object.
            // Put this element in the stack of open elements."
            Token::StartTag { name, .. } if name == "html" => {
                let html = self.create_element_for_token(token);
                self.append_to_document(html);
                self.stack_of_open_elements.push(html);
                self.switch_mode(InsertionMode::BeforeHead);
            }
            // "An end tag whose tag name is one of: "head", "body", "html", "br""
            // "Act as described in the "anything else" entry below."
            Token::EndTag { name, .. }
                if !matches!(name.as_str(), "head" | "body" | "html" | "br") =>
            {
                self.parse_error(ParseErrorCode::UnexpectedEndTag, name);
            }
            // "Anything else"
            // "Create an html element whose node document is the Document object.
            // Append it to the Document object. Put this element in the stack of
            // open elements. Switch the insertion mode to "before head", then
            // reprocess the token."
            _ => {
                let html = self.create_element("html", &[], Namespace::Html);
                self.append_to_document(html);
                self.stack_of_open_elements.push(html);
                self.switch_mode(InsertionMode::BeforeHead);
                return Flow::Reprocess;
            }
        }
        Flow::Done
    }

    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    pub(in crate::parser) fn handle_before_head_mode(&mut self, token: &Token) -> Flow {
        match token {
            _ if is_whitespace_character(token) => {}
            Token::Comment { data } => self.insert_comment(data),
            Token::Doctype { .. } => {
                self.parse_error(ParseErrorCode::UnexpectedDoctype, "before head");
            }
            // "A start tag whose tag name is "html""
            // "Process the token using the rules for the "in body" insertion mode."
            Token::StartTag { name, .. } if name == "html" => {
                return self.process_using_rules_for(InsertionMode::InBody, token);
            }
            // "A start tag whose tag name is "head""
            // "Insert an HTML element for the token. Set the head element pointer
            // to the newly created head element. Switch the insertion mode to
            // "in head"."
            Token::StartTag { name, .. } if name == "head" => {
                let head = self.insert_html_element(token);
                self.head_element_pointer = Some(head);
                self.switch_mode(InsertionMode::InHead);
            }
            Token::EndTag { name, .. }
                if !matches!(name.as_str(), "head" | "body" | "html" | "br") =>
            {
                self.parse_error(ParseErrorCode::UnexpectedEndTag, name);
            }
            // "Anything else"
            // "Insert an HTML element for a "head" start tag token with no
            // attributes. Set the head element pointer to the newly created head
            // element. Switch the insertion mode to "in head". Reprocess the
            // current token."
            _ => {
                let head = self.insert_html_element_named("head");
                self.head_element_pointer = Some(head);
                self.switch_mode(InsertionMode::InHead);
                return Flow::Reprocess;
            }
        }
        Flow::Done
    }

    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    pub(in crate::parser) fn handle_in_head_mode(&mut self, token: &Token) -> Flow {
        match token {
            // "Insert the character."
            Token::Character { data } if Self::is_whitespace(*data) => self.insert_character(*data),
            Token::Comment { data } => self.insert_comment(data),
            Token::Doctype { .. } => {
                self.parse_error(ParseErrorCode::UnexpectedDoctype, "in head");
            }
            Token::StartTag { name, .. } => match name.as_str() {
                "html" => return self.process_using_rules_for(InsertionMode::InBody, token),
                // "A start tag whose tag name is one of: "base", "basefont",
                // "bgsound", "link"" / "A start tag whose tag name is "meta""
                // "Insert an HTML element for the token. Immediately pop the
                // current node off the stack of open elements. Acknowledge the
                // token's self-closing flag, if it is set."
                "base" | "basefont" | "bgsound" | "link" | "meta" => {
                    let _ = self.insert_html_element(token);
                    let _ = self.stack_of_open_elements.pop();
                    self.acknowledge_self_closing_flag();
                }
                // "Follow the generic RCDATA element parsing algorithm."
                "title" => self.parse_generic_text_element(token, RawTextKind::Rcdata),
                // "A start tag whose tag name is "noscript", if the scripting
                // flag is enabled" / "A start tag whose tag name is one of:
                // "noframes", "style""
                // "Follow the generic raw text element parsing algorithm."
                "noscript" if self.scripting_enabled => {
                    self.parse_generic_text_element(token, RawTextKind::Rawtext);
                }
                "noframes" | "style" => {
                    self.parse_generic_text_element(token, RawTextKind::Rawtext);
                }
                // "A start tag whose tag name is "noscript", if the scripting
                // flag is disabled"
                "noscript" => {
                    let _ = self.insert_html_element(token);
                    self.switch_mode(InsertionMode::InHeadNoscript);
                }
                // "A start tag whose tag name is "script""
                // "Switch the tokenizer to the script data state. Set the
                // original insertion mode to the current insertion mode. Switch
                // the insertion mode to "text"."
                "script" => self.parse_generic_text_element(token, RawTextKind::ScriptData),
                // "A start tag whose tag name is "template""
                "template" => {
                    let _ = self.insert_html_element(token);
                    self.insert_marker();
                    self.frameset_ok = false;
                    self.switch_mode(InsertionMode::InTemplate);
                    self.template_insertion_modes.push(InsertionMode::InTemplate);
                }
                // "A start tag whose tag name is "head""
                // "Parse error. Ignore the token."
                "head" => self.parse_error(ParseErrorCode::UnexpectedStartTag, name),
                _ => return self.in_head_anything_else(),
            },
            Token::EndTag { name, .. } => match name.as_str() {
                // "An end tag whose tag name is "head""
                // "Pop the current node (which will be the head element) off the
                // stack of open elements. Switch the insertion mode to "after
                // head"."
                "head" => {
                    let _ = self.stack_of_open_elements.pop();
                    self.switch_mode(InsertionMode::AfterHead);
                }
                "body" | "html" | "br" => return self.in_head_anything_else(),
                "template" => self.close_template_element(),
                _ => self.parse_error(ParseErrorCode::UnexpectedEndTag, name),
            },
            _ => return self.in_head_anything_else(),
        }
        Flow::Done
    }

    /// "Pop the current node (which will be the head element) off the stack of
    /// open elements. Switch the insertion mode to "after head". Reprocess the
    /// token."
    fn in_head_anything_else(&mut self) -> Flow {
        let _ = self.stack_of_open_elements.pop();
        self.switch_mode(InsertionMode::AfterHead);
        Flow::Reprocess
    }

    /// [§ 13.2.6.4.4](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    ///
    /// "An end tag whose tag name is "template"" in the "in head" mode.
    pub(in crate::parser) fn close_template_element(&mut self) {
        // "If there is no template element on the stack of open elements, then
        // this is a parse error; ignore the token."
        if !self.stack_contains("template") {
            self.parse_error(ParseErrorCode::UnexpectedEndTag, "template");
            return;
        }
        // "Generate all implied end tags thoroughly."
        self.generate_all_implied_end_tags_thoroughly();
        // "If the current node is not a template element, then this is a parse
        // error."
        if !self.current_node_is("template") {
            self.parse_error(ParseErrorCode::MisnestedTag, "template");
        }
        // "Pop elements from the stack of open elements until a template
        // element has been popped from the stack."
        self.pop_until("template");
        // "Clear the list of active formatting elements up to the last marker."
        self.clear_active_formatting_elements_to_last_marker();
        // "Pop the current template insertion mode off the stack of template
        // insertion modes."
        let _ = self.template_insertion_modes.pop();
        // "Reset the insertion mode appropriately."
        self.reset_insertion_mode_appropriately();
    }

    /// [§ 13.2.6.4.5 The "in head noscript" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inheadnoscript)
    pub(in crate::parser) fn handle_in_head_noscript_mode(&mut self, token: &Token) -> Flow {
        match token {
            Token::Doctype { .. } => {
                self.parse_error(ParseErrorCode::UnexpectedDoctype, "in head noscript");
            }
            Token::StartTag { name, .. } if name == "html" => {
                return self.process_using_rules_for(InsertionMode::InBody, token);
            }
            // "An end tag whose tag name is "noscript""
            // "Pop the current node (which will be a noscript element) from the
            // stack of open elements; the new current node will be a head
            // element. Switch the insertion mode to "in head"."
            Token::EndTag { name, .. } if name == "noscript" => {
                let _ = self.stack_of_open_elements.pop();
                self.switch_mode(InsertionMode::InHead);
            }
            // "Process the token using the rules for the "in head" insertion mode."
            Token::Comment { .. } => {
                return self.process_using_rules_for(InsertionMode::InHead, token);
            }
            _ if is_whitespace_character(token)
                || is_start_tag(token, &["basefont", "bgsound", "link", "meta", "noframes", "style"]) =>
            {
                return self.process_using_rules_for(InsertionMode::InHead, token);
            }
            Token::StartTag { name, .. } if name == "head" || name == "noscript" => {
                self.parse_error(ParseErrorCode::UnexpectedStartTag, name);
            }
            Token::EndTag { name, .. } if name != "br" => {
                self.parse_error(ParseErrorCode::UnexpectedEndTag, name);
            }
            // "Anything else"
            // "Parse error. Pop the current node (which will be a noscript
            // element) from the stack of open elements; the new current node
            // will be a head element. Switch the insertion mode to "in head".
            // Reprocess the token."
            _ => {
                self.unexpected_token(token);
                let _ = self.stack_of_open_elements.pop();
                self.switch_mode(InsertionMode::InHead);
                return Flow::Reprocess;
            }
        }
        Flow::Done
    }

    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    pub(in crate::parser) fn handle_after_head_mode(&mut self, token: &Token) -> Flow {
        match token {
            Token::Character { data } if Self::is_whitespace(*data) => self.insert_character(*data),
            Token::Comment { data } => self.insert_comment(data),
            Token::Doctype { .. } => {
                self.parse_error(ParseErrorCode::UnexpectedDoctype, "after head");
            }
            Token::StartTag { name, .. } => match name.as_str() {
                "html" => return self.process_using_rules_for(InsertionMode::InBody, token),
                // "Insert an HTML element for the token. Set the frameset-ok flag
                // to "not ok". Switch the insertion mode to "in body"."
                "body" => {
                    let _ = self.insert_html_element(token);
                    self.frameset_ok = false;
                    self.switch_mode(InsertionMode::InBody);
                }
                "frameset" => {
                    let _ = self.insert_html_element(token);
                    self.switch_mode(InsertionMode::InFrameset);
                }
                // "Parse error. Push the node pointed to by the head element
                // pointer onto the stack of open elements. Process the token using
                // the rules for the "in head" insertion mode. Remove the node
                // pointed to by the head element pointer from the stack of open
                // elements. (It might not be the current node at this point.)"
                _ if HEAD_START_TAGS.contains(&name.as_str()) => {
                    self.parse_error(ParseErrorCode::UnexpectedStartTag, name);
                    let Some(head) = self.head_element_pointer else {
                        return self.process_using_rules_for(InsertionMode::InHead, token);
                    };
                    self.stack_of_open_elements.push(head);
                    let flow = self.process_using_rules_for(InsertionMode::InHead, token);
                    self.remove_from_stack(head);
                    return flow;
                }
                "head" => self.parse_error(ParseErrorCode::UnexpectedStartTag, name),
                _ => return self.after_head_anything_else(),
            },
            Token::EndTag { name, .. } => match name.as_str() {
                "template" => return self.process_using_rules_for(InsertionMode::InHead, token),
                "body" | "html" | "br" => return self.after_head_anything_else(),
                _ => self.parse_error(ParseErrorCode::UnexpectedEndTag, name),
            },
            _ => return self.after_head_anything_else(),
        }
        Flow::Done
    }

    /// "Insert an HTML element for a "body" start tag token with no
    /// attributes. Switch the insertion mode to "in body". Reprocess the
    /// current token."
    fn after_head_anything_else(&mut self) -> Flow {
        let _ = self.insert_html_element_named("body");
        self.switch_mode(InsertionMode::InBody);
        Flow::Reprocess
    }

    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    pub(in crate::parser) fn handle_text_mode(&mut self, token: &Token) -> Flow {
        match token {
            // "Insert the token's character."
            Token::Character { data } => self.insert_character(*data),
            // "An end-of-file token"
            // "Parse error. ... Pop the current node off the stack of open
            // elements. Switch the insertion mode to the original insertion mode
            // and reprocess the token."
            Token::EndOfFile => {
                self.unexpected_token(token);
                let _ = self.stack_of_open_elements.pop();
                self.return_to_original_insertion_mode();
                return Flow::Reprocess;
            }
            // "An end tag whose tag name is "script"" / "Any other end tag"
            // "Pop the current node off the stack of open elements. Switch the
            // insertion mode to the original insertion mode."
            //
            // Scripts are never run.
            Token::EndTag { .. } => {
                let _ = self.stack_of_open_elements.pop();
                self.return_to_original_insertion_mode();
            }
            _ => {}
        }
        Flow::Done
    }

    /// "Switch the insertion mode to the original insertion mode."
    pub(in crate::parser) fn return_to_original_insertion_mode(&mut self) {
        let mode = self
            .original_insertion_mode
            .take()
            .unwrap_or(InsertionMode::InBody);
        self.switch_mode(mode);
    }

    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    pub(in crate::parser) fn handle_after_body_mode(&mut self, token: &Token) -> Flow {
        match token {
            _ if is_whitespace_character(token) => {
                return self.process_using_rules_for(InsertionMode::InBody, token);
            }
            // "Insert a comment as the last child of the first element in the
            // stack of open elements (the html element)."
            Token::Comment { data } => {
                let html = self
                    .stack_of_open_elements
                    .first()
                    .copied()
                    .unwrap_or(NodeId::ROOT);
                self.insert_comment_in(html, data);
            }
            Token::Doctype { .. } => {
                self.parse_error(ParseErrorCode::UnexpectedDoctype, "after body");
            }
            Token::StartTag { name, .. } if name == "html" => {
                return self.process_using_rules_for(InsertionMode::InBody, token);
            }
            // "An end tag whose tag name is "html""
            // "If the parser was created as part of the HTML fragment parsing
            // algorithm, this is a parse error; ignore the token. (fragment case)
            // Otherwise, switch the insertion mode to "after after body"."
            Token::EndTag { name, .. } if name == "html" => {
                if self.context_element.is_some() {
                    self.parse_error(ParseErrorCode::UnexpectedEndTag, name);
                } else {
                    self.switch_mode(InsertionMode::AfterAfterBody);
                }
            }
            Token::EndOfFile => self.stop_parsing(),
            // "Parse error. Switch the insertion mode to "in body" and reprocess
            // the token."
            _ => {
                self.unexpected_token(token);
                self.switch_mode(InsertionMode::InBody);
                return Flow::Reprocess;
            }
        }
        Flow::Done
    }

    /// [§ 13.2.6.4.20 The "in frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inframeset)
    pub(in crate::parser) fn handle_in_frameset_mode(&mut self, token: &Token) -> Flow {
        match token {
            Token::Character { data } if Self::is_whitespace(*data) => self.insert_character(*data),
            Token::Comment { data } => self.insert_comment(data),
            Token::Doctype { .. } => {
                self.parse_error(ParseErrorCode::UnexpectedDoctype, "in frameset");
            }
            Token::StartTag { name, .. } => match name.as_str() {
                "html" => return self.process_using_rules_for(InsertionMode::InBody, token),
                "frameset" => {
                    let _ = self.insert_html_element(token);
                }
                // "Insert an HTML element for the token. Immediately pop the
                // current node off the stack of open elements. Acknowledge the
                // token's self-closing flag, if it is set."
                "frame" => {
                    let _ = self.insert_html_element(token);
                    let _ = self.stack_of_open_elements.pop();
                    self.acknowledge_self_closing_flag();
                }
                "noframes" => return self.process_using_rules_for(InsertionMode::InHead, token),
                _ => self.parse_error(ParseErrorCode::UnexpectedStartTag, name),
            },
            // "An end tag whose tag name is "frameset""
            Token::EndTag { name, .. } if name == "frameset" => {
                // "If the current node is the root html element, then this is a
                // parse error; ignore the token. (fragment case)"
                if self.stack_of_open_elements.len() <= 1 {
                    self.parse_error(ParseErrorCode::UnexpectedEndTag, name);
                    return Flow::Done;
                }
                // "Otherwise, pop the current node from the stack of open
                // elements."
                let _ = self.stack_of_open_elements.pop();
                // "If the parser was not created as part of the HTML fragment
                // parsing algorithm (fragment case), and the current node is no
                // longer a frameset element, then switch the insertion mode to
                // "after frameset"."
                if self.context_element.is_none() && !self.current_node_is("frameset") {
                    self.switch_mode(InsertionMode::AfterFrameset);
                }
            }
            // "An end-of-file token"
            // "If the current node is not the root html element, then this is a
            // parse error. Note: The current node can only be the root html
            // element in the fragment case. Stop parsing."
            Token::EndOfFile => {
                if self.stack_of_open_elements.len() > 1 {
                    self.parse_error(ParseErrorCode::UnexpectedEndOfFile, "in frameset");
                }
                self.stop_parsing();
            }
            // "Anything else"
            // "Parse error. Ignore the token."
            _ => self.unexpected_token(token),
        }
        Flow::Done
    }

    /// [§ 13.2.6.4.21 The "after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterframeset)
    pub(in crate::parser) fn handle_after_frameset_mode(&mut self, token: &Token) -> Flow {
        match token {
            Token::Character { data } if Self::is_whitespace(*data) => self.insert_character(*data),
            Token::Comment { data } => self.insert_comment(data),
            Token::Doctype { .. } => {
                self.parse_error(ParseErrorCode::UnexpectedDoctype, "after frameset");
            }
            Token::StartTag { name, .. } if name == "html" => {
                return self.process_using_rules_for(InsertionMode::InBody, token);
            }
            Token::EndTag { name, .. } if name == "html" => {
                self.switch_mode(InsertionMode::AfterAfterFrameset);
            }
            Token::StartTag { name, .. } if name == "noframes" => {
                return self.process_using_rules_for(InsertionMode::InHead, token);
            }
            Token::EndOfFile => self.stop_parsing(),
            _ => self.unexpected_token(token),
        }
        Flow::Done
    }

    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    pub(in crate::parser) fn handle_after_after_body_mode(&mut self, token: &Token) -> Flow {
        match token {
            // "Insert a comment as the last child of the Document object."
            Token::Comment { data } => self.insert_comment_in(NodeId::ROOT, data),
            // "A DOCTYPE token" / whitespace / "A start tag whose tag name is
            // "html"": "Process the token using the rules for the "in body"
            // insertion mode."
            Token::Doctype { .. } => {
                return self.process_using_rules_for(InsertionMode::InBody, token);
            }
            _ if is_whitespace_character(token) || is_start_tag(token, &["html"]) => {
                return self.process_using_rules_for(InsertionMode::InBody, token);
            }
            Token::EndOfFile => self.stop_parsing(),
            _ => {
                self.unexpected_token(token);
                self.switch_mode(InsertionMode::InBody);
                return Flow::Reprocess;
            }
        }
        Flow::Done
    }

    /// [§ 13.2.6.4.23 The "after after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-frameset-insertion-mode)
    pub(in crate::parser) fn handle_after_after_frameset_mode(&mut self, token: &Token) -> Flow {
        match token {
            Token::Comment { data } => self.insert_comment_in(NodeId::ROOT, data),
            Token::Doctype { .. } => {
                return self.process_using_rules_for(InsertionMode::InBody, token);
            }
            _ if is_whitespace_character(token) || is_start_tag(token, &["html"]) => {
                return self.process_using_rules_for(InsertionMode::InBody, token);
            }
            Token::EndOfFile => self.stop_parsing(),
            Token::StartTag { name, .. } if name == "noframes" => {
                return self.process_using_rules_for(InsertionMode::InHead, token);
            }
            _ => self.unexpected_token(token),
        }
        Flow::Done
    }
}
