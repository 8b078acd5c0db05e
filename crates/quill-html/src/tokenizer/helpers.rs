//! Helper functions for the HTML tokenizer.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! This module contains utility functions used throughout the tokenizer:
//! - State transitions ("Reconsume in")
//! - Token emission ("Emit the current token")
//! - End tag helpers for the raw text states
//! - Parse error recording

use std::collections::HashSet;

use super::LOG_TARGET;
use super::core::{HTMLTokenizer, TokenizerState};
use super::token::Token;
use crate::error::ParseErrorCode;

// =============================================================================
// State Transition Helpers
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    ///
    /// "Reconsume in the X state"
    ///
    /// Transitions to a new state without consuming the current character.
    /// The same character will be processed again in the new state.
    pub(super) fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.reconsume = true;
        self.switch_to(new_state);
    }

    /// "Switch to the return state." / "Reconsume in the return state."
    pub(super) fn take_return_state(&mut self) -> TokenizerState {
        self.return_state.take().unwrap_or(TokenizerState::Data)
    }

    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    ///
    /// "If the next few characters are ...": on a match the characters are
    /// consumed. The current input character is not part of the lookahead.
    pub(super) fn consume_if_next_few_characters_are(
        &mut self,
        target: &str,
        case_insensitive: bool,
    ) -> bool {
        if self.input.starts_with(target, case_insensitive) {
            self.input.consume_str(target.chars().count());
            true
        } else {
            false
        }
    }

    /// [§ 12.1.4 ASCII whitespace](https://infra.spec.whatwg.org/#ascii-whitespace)
    ///
    /// The tokenizer's whitespace set. CR never reaches the tokenizer.
    pub(super) const fn is_whitespace_char(input_char: char) -> bool {
        // "U+0009 CHARACTER TABULATION (tab)"
        // "U+000A LINE FEED (LF)"
        // "U+000C FORM FEED (FF)"
        // "U+0020 SPACE"
        matches!(input_char, ' ' | '\t' | '\n' | '\x0C')
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    ///
    /// "Emit the current token". A start tag always ends the step that emits
    /// it, so the tree constructor can switch states before any character
    /// after the `>` is read.
    pub(super) fn emit_token(&mut self) {
        let Some(mut token) = self.current_token.take() else {
            return;
        };
        if let Token::StartTag { name, .. } = &token {
            self.last_start_tag_name = Some(name.clone());
        }
        // "When an end tag token is emitted with attributes, that is an
        // end-tag-with-attributes parse error."
        if let Token::EndTag { attributes, .. } = &token
            && !attributes.is_empty()
        {
            self.parse_error(ParseErrorCode::EndTagWithAttributes);
        }
        self.drop_duplicate_attributes(&mut token);
        log::trace!(target: LOG_TARGET, "emit {token}");
        self.pending.push_back(token);
    }

    /// "Emit the current input character as a character token."
    pub(super) fn emit_character_token(&mut self, c: char) {
        self.pending.push_back(Token::new_character(c));
    }

    /// Emit each character of a string as its own character token.
    pub(super) fn emit_characters(&mut self, s: &str) {
        self.pending.extend(s.chars().map(Token::new_character));
    }

    /// "Emit an end-of-file token."
    pub(super) fn emit_eof_token(&mut self) {
        log::trace!(target: LOG_TARGET, "emit EOF at {}", self.input.position());
        self.pending.push_back(Token::EndOfFile);
        self.at_eof = true;
    }

    /// "This is an eof-in-tag parse error. Emit an end-of-file token."
    ///
    /// The unfinished tag token is discarded.
    pub(super) fn eof_in_tag(&mut self) {
        self.parse_error(ParseErrorCode::EofInTag);
        self.current_token = None;
        self.emit_eof_token();
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    ///
    /// "If there is already an attribute on the token with the exact same
    /// name, then this is a duplicate-attribute parse error and the new
    /// attribute must be removed from the token."
    ///
    /// Checked once the tag is complete so that a dropped attribute's value
    /// can still be consumed normally.
    fn drop_duplicate_attributes(&mut self, token: &mut Token) {
        let (Token::StartTag { attributes, .. } | Token::EndTag { attributes, .. }) = token else {
            return;
        };
        let mut seen = HashSet::new();
        let before = attributes.len();
        attributes.retain(|attr| seen.insert(attr.name.clone()));
        for _ in attributes.len()..before {
            self.parse_error(ParseErrorCode::DuplicateAttribute);
        }
    }
}

// =============================================================================
// End Tag Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "An appropriate end tag token is an end tag token whose tag name matches
    /// the tag name of the last start tag to have been emitted from this
    /// tokenizer, if any. If no start tag has been emitted from this
    /// tokenizer, then no end tag token is appropriate."
    pub(super) fn is_appropriate_end_tag_token(&self) -> bool {
        if let (Some(last_start_tag), Some(Token::EndTag { name, .. })) =
            (&self.last_start_tag_name, &self.current_token)
        {
            return name == last_start_tag;
        }
        false
    }

    /// The shared tail of the RCDATA, RAWTEXT, script data and script data
    /// escaped end tag name states.
    ///
    /// Returns true if the character was handled. Otherwise the caller falls
    /// through to "anything else".
    pub(super) fn handle_end_tag_name_character(&mut self) -> bool {
        match self.current_input_character {
            // "U+0009 CHARACTER TABULATION (tab)" "U+000A LINE FEED (LF)"
            // "U+000C FORM FEED (FF)" "U+0020 SPACE"
            // "If the current end tag token is an appropriate end tag token, then switch to the
            // before attribute name state."
            Some(c) if Self::is_whitespace_char(c) && self.is_appropriate_end_tag_token() => {
                self.switch_to(TokenizerState::BeforeAttributeName);
                true
            }
            // "U+002F SOLIDUS (/)"
            // "If the current end tag token is an appropriate end tag token, then switch to the
            // self-closing start tag state."
            Some('/') if self.is_appropriate_end_tag_token() => {
                self.switch_to(TokenizerState::SelfClosingStartTag);
                true
            }
            // "U+003E GREATER-THAN SIGN (>)"
            // "If the current end tag token is an appropriate end tag token, then switch to the
            // data state and emit the current tag token."
            Some('>') if self.is_appropriate_end_tag_token() => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
                true
            }
            // "ASCII upper alpha"
            // "Append the lowercase version of the current input character to the current
            // tag token's tag name. Append the current input character to the temporary buffer."
            // "ASCII lower alpha"
            // "Append the current input character to the current tag token's tag name. Append
            // the current input character to the temporary buffer."
            Some(c) if c.is_ascii_alphabetic() => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_tag_name(c.to_ascii_lowercase());
                }
                self.temporary_buffer.push(c);
                true
            }
            _ => false,
        }
    }

    /// "Anything else" of the end tag name states:
    /// "Emit a U+003C LESS-THAN SIGN character token, a U+002F SOLIDUS character
    /// token, and a character token for each of the characters in the temporary
    /// buffer (in the order they were added to the buffer). Reconsume in the
    /// X state."
    pub(super) fn emit_end_tag_name_anything_else(&mut self, text_state: TokenizerState) {
        self.emit_character_token('<');
        self.emit_character_token('/');
        let buffer = std::mem::take(&mut self.temporary_buffer);
        self.emit_characters(&buffer);
        self.temporary_buffer = buffer;
        // The unfinished end tag token is discarded.
        self.current_token = None;
        self.reconsume_in(text_state);
    }
}

// =============================================================================
// Error Handling
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
    ///
    /// Parse errors in HTML are not fatal: the tokenizer records them and
    /// carries on.
    pub(super) fn parse_error(&mut self, code: ParseErrorCode) {
        self.record_issue(LOG_TARGET, code, String::new());
    }
}
