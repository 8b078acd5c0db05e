//! HTML tokenizer module.
//!
//! Implements [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//! of the WHATWG HTML Living Standard.

/// Character reference states per § 13.2.5.72 - § 13.2.5.80.
mod character_reference;
/// HTML tokenizer state machine implementation.
mod core;
/// Helper methods for tokenizer state transitions.
mod helpers;
/// Comment, DOCTYPE and CDATA states.
mod markup_states;
/// Named character reference lookup table per § 13.5.
pub mod named_character_references;
/// Tag and attribute states.
mod tag_states;
/// Data, RCDATA, RAWTEXT, script data and PLAINTEXT states.
mod text_states;
/// Token types produced by the tokenizer.
pub mod token;

pub use self::core::{HTMLTokenizer, RawTextKind, TokenizerState};
pub use token::{TagAttribute, Token};

/// Log target for tokenizer diagnostics.
pub(crate) const LOG_TARGET: &str = "quill_html::tokenizer";
