//! HTML tokenizer and parser for Quill.
//!
//! # Scope
//!
//! This crate implements:
//! - **Character Source** ([WHATWG § 13.2.3.5](https://html.spec.whatwg.org/multipage/parsing.html#preprocessing-the-input-stream))
//!   - Newline normalization, lookahead and push back
//!
//! - **HTML Tokenizer** ([WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization))
//!   - Every tokenizer state, including script data escapes and CDATA
//!   - Named and numeric character references
//!   - Duplicate attribute detection (first one wins)
//!
//! - **HTML Parser / Tree Builder** ([WHATWG § 13.2.6](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction))
//!   - All 23 insertion modes and the rules for foreign content
//!   - Foster parenting, the adoption agency algorithm and reconstruction
//!     of active formatting elements
//!   - Quirks mode detection and fragment parsing
//!
//! Markup errors never fail a parse. They are collected as
//! [`ParseIssue`]s next to the tree.
//!
//! ```
//! use quill_html::parse_document;
//!
//! let tree = parse_document("<p>A<b>B<p>C</b>D");
//! let body = tree.body().unwrap();
//! assert_eq!(quill_dom::serialize::inner_html(&tree, body), "<p>A<b>B</b></p><p><b>C</b>D</p>");
//! ```

/// Parser options.
pub mod config;
/// Caller errors and recoverable parse issues.
pub mod error;
/// The newline-normalized character stream.
pub mod input;
/// HTML parser and tree construction.
pub mod parser;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;

use quill_dom::DomTree;

pub use config::{DEFAULT_MAX_ISSUES, ParserConfig};
pub use error::{Error, ParseErrorCode, ParseIssue};
pub use parser::{HTMLParser, InsertionMode, ParseStatus, print_tree};
pub use tokenizer::{HTMLTokenizer, TagAttribute, Token};

/// A finished parse: the tree and the issues found while building it.
#[derive(Debug)]
pub struct ParseOutput {
    /// The document tree.
    pub tree: DomTree,
    /// Recovered markup errors, in input order.
    pub issues: Vec<ParseIssue>,
}

/// Parse a complete document with the default configuration.
#[must_use]
pub fn parse_document(input: &str) -> DomTree {
    HTMLParser::new(input).run()
}

/// Parse a document (or a fragment, if `config` names a context) and keep
/// the parse issues.
///
/// # Errors
///
/// Returns [`Error::InvalidConfig`] if `config` does not validate.
pub fn parse_document_with(input: &str, config: &ParserConfig) -> Result<ParseOutput, Error> {
    let (tree, issues) = HTMLParser::with_config(input, config)?.run_with_issues();
    Ok(ParseOutput { tree, issues })
}

/// Parse a document given as UTF-8 bytes.
///
/// # Errors
///
/// Returns [`Error::InvalidUtf8`] if `bytes` is not valid UTF-8.
pub fn parse_bytes(bytes: &[u8]) -> Result<DomTree, Error> {
    let input = std::str::from_utf8(bytes)?;
    Ok(parse_document(input))
}

/// [§ 13.4 Parsing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#parsing-html-fragments)
///
/// Parse `input` as the contents of an element named `context`. The
/// fragment's top-level nodes become the children of the returned tree's
/// Document node.
///
/// # Errors
///
/// Returns [`Error::InvalidConfig`] if `context` is not a tag name.
pub fn parse_fragment(input: &str, context: &str) -> Result<DomTree, Error> {
    let config = ParserConfig::default().with_fragment_context(context);
    Ok(HTMLParser::with_config(input, &config)?.run())
}
