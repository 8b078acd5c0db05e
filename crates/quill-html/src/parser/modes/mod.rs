//! [§ 13.2.6.4 The rules for parsing tokens in HTML content](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhtml)
//!
//! One file per family of insertion modes. Every handler returns a
//! [`Flow`](super::core::Flow) telling the dispatcher whether the token was
//! consumed.

mod document;
mod in_body;
mod select;
mod table;
mod template;

use super::core::HTMLParser;
use crate::tokenizer::Token;

/// "A character token that is one of U+0009 CHARACTER TABULATION, U+000A
/// LINE FEED (LF), U+000C FORM FEED (FF), U+000D CARRIAGE RETURN (CR), or
/// U+0020 SPACE"
fn is_whitespace_character(token: &Token) -> bool {
    matches!(token, Token::Character { data } if HTMLParser::is_whitespace(*data))
}

/// "A start tag whose tag name is one of: ..."
fn is_start_tag(token: &Token, names: &[&str]) -> bool {
    matches!(token, Token::StartTag { name, .. } if names.contains(&name.as_str()))
}

/// "An end tag whose tag name is one of: ..."
fn is_end_tag(token: &Token, names: &[&str]) -> bool {
    matches!(token, Token::EndTag { name, .. } if names.contains(&name.as_str()))
}
