//! HTML parser module for tree construction.
//!
//! [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)

/// Parser state, the public entry points and the token dispatcher.
mod core;
/// SVG and MathML handling.
pub mod foreign_content;
/// The insertion mode handlers.
mod modes;
/// DOCTYPE-driven quirks mode detection.
mod quirks;
/// Node insertion, the element stacks and the recovery algorithms.
mod tree_builder;

pub use self::core::{HTMLParser, InsertionMode, ParseStatus, print_tree};

/// Log target for tree construction diagnostics.
pub(crate) const LOG_TARGET: &str = "quill_html::parser";
