//! Errors and parse issues.
//!
//! [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
//!
//! Markup errors never fail a parse. They are collected as [`ParseIssue`]s
//! next to the tree. Only problems with the caller's input (bytes that are
//! not UTF-8, an unusable configuration) are returned as [`Error`].

use std::fmt;

use quill_common::warning::WarningSet;
use strum_macros::{Display, EnumString, IntoStaticStr};
use thiserror::Error;

/// Failures reported before parsing starts.
#[derive(Debug, Error)]
pub enum Error {
    /// Byte input was not valid UTF-8. Encoding sniffing is out of scope.
    #[error("input is not valid UTF-8")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    /// The parser configuration cannot be used.
    #[error("invalid parser configuration: {0}")]
    InvalidConfig(String),
}

/// Named parse errors.
///
/// Tokenizer codes are the names used by the HTML standard. Tree construction
/// errors are not named there, so they get descriptive names of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum ParseErrorCode {
    // Tokenizer
    /// `abrupt-closing-of-empty-comment`
    AbruptClosingOfEmptyComment,
    /// `abrupt-doctype-public-identifier`
    AbruptDoctypePublicIdentifier,
    /// `abrupt-doctype-system-identifier`
    AbruptDoctypeSystemIdentifier,
    /// `absence-of-digits-in-numeric-character-reference`
    AbsenceOfDigitsInNumericCharacterReference,
    /// `cdata-in-html-content`
    CdataInHtmlContent,
    /// `character-reference-outside-unicode-range`
    CharacterReferenceOutsideUnicodeRange,
    /// `control-character-reference`
    ControlCharacterReference,
    /// `duplicate-attribute`
    DuplicateAttribute,
    /// `end-tag-with-attributes`
    EndTagWithAttributes,
    /// `end-tag-with-trailing-solidus`
    EndTagWithTrailingSolidus,
    /// `eof-before-tag-name`
    EofBeforeTagName,
    /// `eof-in-cdata`
    EofInCdata,
    /// `eof-in-comment`
    EofInComment,
    /// `eof-in-doctype`
    EofInDoctype,
    /// `eof-in-script-html-comment-like-text`
    EofInScriptHtmlCommentLikeText,
    /// `eof-in-tag`
    EofInTag,
    /// `incorrectly-closed-comment`
    IncorrectlyClosedComment,
    /// `incorrectly-opened-comment`
    IncorrectlyOpenedComment,
    /// `invalid-character-sequence-after-doctype-name`
    InvalidCharacterSequenceAfterDoctypeName,
    /// `invalid-first-character-of-tag-name`
    InvalidFirstCharacterOfTagName,
    /// `missing-attribute-value`
    MissingAttributeValue,
    /// `missing-doctype-name`
    MissingDoctypeName,
    /// `missing-doctype-public-identifier`
    MissingDoctypePublicIdentifier,
    /// `missing-doctype-system-identifier`
    MissingDoctypeSystemIdentifier,
    /// `missing-end-tag-name`
    MissingEndTagName,
    /// `missing-quote-before-doctype-public-identifier`
    MissingQuoteBeforeDoctypePublicIdentifier,
    /// `missing-quote-before-doctype-system-identifier`
    MissingQuoteBeforeDoctypeSystemIdentifier,
    /// `missing-semicolon-after-character-reference`
    MissingSemicolonAfterCharacterReference,
    /// `missing-whitespace-after-doctype-public-keyword`
    MissingWhitespaceAfterDoctypePublicKeyword,
    /// `missing-whitespace-after-doctype-system-keyword`
    MissingWhitespaceAfterDoctypeSystemKeyword,
    /// `missing-whitespace-before-doctype-name`
    MissingWhitespaceBeforeDoctypeName,
    /// `missing-whitespace-between-attributes`
    MissingWhitespaceBetweenAttributes,
    /// `missing-whitespace-between-doctype-public-and-system-identifiers`
    MissingWhitespaceBetweenDoctypePublicAndSystemIdentifiers,
    /// `nested-comment`
    NestedComment,
    /// `noncharacter-character-reference`
    NoncharacterCharacterReference,
    /// `non-void-html-element-start-tag-with-trailing-solidus`
    NonVoidHtmlElementStartTagWithTrailingSolidus,
    /// `null-character-reference`
    NullCharacterReference,
    /// `surrogate-character-reference`
    SurrogateCharacterReference,
    /// `unexpected-character-after-doctype-system-identifier`
    UnexpectedCharacterAfterDoctypeSystemIdentifier,
    /// `unexpected-character-in-attribute-name`
    UnexpectedCharacterInAttributeName,
    /// `unexpected-character-in-unquoted-attribute-value`
    UnexpectedCharacterInUnquotedAttributeValue,
    /// `unexpected-equals-sign-before-attribute-name`
    UnexpectedEqualsSignBeforeAttributeName,
    /// `unexpected-null-character`
    UnexpectedNullCharacter,
    /// `unexpected-question-mark-instead-of-tag-name`
    UnexpectedQuestionMarkInsteadOfTagName,
    /// `unexpected-solidus-in-tag`
    UnexpectedSolidusInTag,
    /// `unknown-named-character-reference`
    UnknownNamedCharacterReference,
    // Tree construction
    /// `missing-doctype`
    MissingDoctype,
    /// `non-conforming-doctype`
    NonConformingDoctype,
    /// `unexpected-doctype`
    UnexpectedDoctype,
    /// `unexpected-start-tag`
    UnexpectedStartTag,
    /// `unexpected-end-tag`
    UnexpectedEndTag,
    /// `unexpected-character`
    UnexpectedCharacter,
    /// `unexpected-end-of-file`
    UnexpectedEndOfFile,
    /// `misnested-tag`
    MisnestedTag,
    /// `foster-parented-content`
    FosterParentedContent,
}

/// One recovered markup error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// Which error this is.
    pub code: ParseErrorCode,
    /// Character offset into the (newline-normalized) input.
    pub position: usize,
    /// Extra detail, such as the offending tag name. May be empty.
    pub message: String,
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.code, self.position)?;
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        Ok(())
    }
}

/// Collects issues for one parse, honoring the configured limit.
///
/// Issues past the limit are dropped before they are stored or printed.
#[derive(Debug, Clone, Default)]
pub(crate) struct IssueSink {
    issues: Vec<ParseIssue>,
    limit: Option<usize>,
    warnings: Option<WarningSet>,
}

impl IssueSink {
    pub(crate) fn new(limit: Option<usize>, report: bool) -> Self {
        Self {
            issues: Vec::new(),
            limit,
            warnings: report.then(|| WarningSet::new("HTML Parser")),
        }
    }

    pub(crate) fn record(&mut self, target: &str, issue: ParseIssue) {
        if self.limit.is_some_and(|limit| self.issues.len() >= limit) {
            return;
        }
        log::debug!(target: target, "parse error: {issue}");
        if let Some(warnings) = self.warnings.as_mut() {
            // Same code and detail at another offset is the same warning.
            let summary = if issue.message.is_empty() {
                issue.code.to_string()
            } else {
                format!("{}: {}", issue.code, issue.message)
            };
            let _ = warnings.warn_once(&summary);
        }
        self.issues.push(issue);
    }

    #[cfg(test)]
    fn reported(&self) -> usize {
        self.warnings.as_ref().map_or(0, WarningSet::len)
    }

    pub(crate) fn as_slice(&self) -> &[ParseIssue] {
        &self.issues
    }

    pub(crate) fn take(&mut self) -> Vec<ParseIssue> {
        std::mem::take(&mut self.issues)
    }
}

#[cfg(test)]
mod tests {
    use super::{IssueSink, ParseErrorCode, ParseIssue};

    /// Helper to build an unexpected-end-tag issue
    fn end_tag_issue(position: usize, name: &str) -> ParseIssue {
        ParseIssue {
            code: ParseErrorCode::UnexpectedEndTag,
            position,
            message: name.to_string(),
        }
    }

    #[test]
    fn test_limit_bounds_stored_and_reported_issues() {
        let mut sink = IssueSink::new(Some(10), true);
        for i in 0..5000 {
            sink.record("test", end_tag_issue(i * 4, &format!("x{i}")));
        }
        assert_eq!(sink.as_slice().len(), 10);
        assert_eq!(sink.reported(), 10);
    }

    #[test]
    fn test_repeated_issue_is_reported_once_per_parse() {
        let mut sink = IssueSink::new(None, true);
        for i in 0..100 {
            sink.record("test", end_tag_issue(i, "p"));
        }
        assert_eq!(sink.as_slice().len(), 100);
        assert_eq!(sink.reported(), 1);

        let other = IssueSink::new(None, true);
        assert_eq!(other.reported(), 0);
    }

    #[test]
    fn test_silent_sink_reports_nothing() {
        let mut sink = IssueSink::new(Some(3), false);
        sink.record("test", end_tag_issue(0, "p"));
        assert_eq!(sink.as_slice().len(), 1);
        assert_eq!(sink.reported(), 0);
    }
}
