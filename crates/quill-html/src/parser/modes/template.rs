//! [§ 13.2.6.4.18 The "in template" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intemplate)

use crate::error::ParseErrorCode;
use crate::parser::core::{Flow, HTMLParser, InsertionMode};
use crate::tokenizer::Token;

impl HTMLParser {
    /// [§ 13.2.6.4.18 The "in template" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intemplate)
    pub(in crate::parser) fn handle_in_template_mode(&mut self, token: &Token) -> Flow {
        match token {
            // "A character token / A comment token / A DOCTYPE token"
            // "Process the token using the rules for the "in body" insertion
            // mode."
            Token::Character { .. } | Token::Comment { .. } | Token::Doctype { .. } => {
                self.process_using_rules_for(InsertionMode::InBody, token)
            }
            Token::StartTag { name, .. } => match name.as_str() {
                "base" | "basefont" | "bgsound" | "link" | "meta" | "noframes" | "script"
                | "style" | "template" | "title" => {
                    self.process_using_rules_for(InsertionMode::InHead, token)
                }
                // "A start tag whose tag name is one of: "caption", "colgroup",
                // "tbody", "tfoot", "thead""
                // "Pop the current template insertion mode off the stack of
                // template insertion modes. Push "in table" onto the stack of
                // template insertion modes so that it is the new current
                // template insertion mode. Switch the insertion mode to "in
                // table", and reprocess the token."
                "caption" | "colgroup" | "tbody" | "tfoot" | "thead" => {
                    self.replace_template_mode(InsertionMode::InTable)
                }
                "col" => self.replace_template_mode(InsertionMode::InColumnGroup),
                "tr" => self.replace_template_mode(InsertionMode::InTableBody),
                "td" | "th" => self.replace_template_mode(InsertionMode::InRow),
                // "Any other start tag"
                _ => self.replace_template_mode(InsertionMode::InBody),
            },
            Token::EndTag { name, .. } if name == "template" => {
                self.process_using_rules_for(InsertionMode::InHead, token)
            }
            // "Any other end tag"
            // "Parse error. Ignore the token."
            Token::EndTag { .. } => {
                self.unexpected_token(token);
                Flow::Done
            }
            // "An end-of-file token"
            Token::EndOfFile => {
                // "If there is no template element on the stack of open
                // elements, then stop parsing. (fragment case)"
                if !self.stack_contains("template") {
                    self.stop_parsing();
                    return Flow::Done;
                }
                // "Otherwise, this is a parse error. Pop elements from the stack
                // of open elements until a template element has been popped from
                // the stack. Clear the list of active formatting elements up to
                // the last marker. Pop the current template insertion mode off
                // the stack of template insertion modes. Reset the insertion
                // mode appropriately. Reprocess the token."
                self.parse_error(ParseErrorCode::UnexpectedEndOfFile, "in template");
                self.pop_until("template");
                self.clear_active_formatting_elements_to_last_marker();
                let _ = self.template_insertion_modes.pop();
                self.reset_insertion_mode_appropriately();
                Flow::Reprocess
            }
        }
    }

    fn replace_template_mode(&mut self, mode: InsertionMode) -> Flow {
        let _ = self.template_insertion_modes.pop();
        self.template_insertion_modes.push(mode);
        self.switch_mode(mode);
        Flow::Reprocess
    }
}
