//! Parser configuration.

use crate::error::Error;

/// Default cap on the number of issues kept for one parse.
pub const DEFAULT_MAX_ISSUES: usize = 10_000;

/// Options for one parse.
///
/// ```
/// use quill_html::ParserConfig;
///
/// let config = ParserConfig::default()
///     .with_scripting()
///     .with_fragment_context("td");
/// assert!(config.scripting_enabled);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// [§ 13.2.4.5 Other parsing state flags](https://html.spec.whatwg.org/multipage/parsing.html#other-parsing-state-flags)
    ///
    /// "The scripting flag is set to "enabled" if scripting was enabled for
    /// the Document with which the parser is associated when the parser was
    /// created, and "disabled" otherwise."
    ///
    /// Only changes how `<noscript>` is parsed. Nothing is executed.
    pub scripting_enabled: bool,
    /// Echo kept issues to stderr, each distinct message once per parse.
    pub report_issues: bool,
    /// Maximum number of issues kept. `None` keeps all of them.
    pub max_issues: Option<usize>,
    /// Context element name for fragment parsing. `None` parses a document.
    pub fragment_context: Option<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            scripting_enabled: false,
            report_issues: false,
            max_issues: Some(DEFAULT_MAX_ISSUES),
            fragment_context: None,
        }
    }
}

impl ParserConfig {
    /// Parse as if scripting were enabled.
    #[must_use]
    pub const fn with_scripting(mut self) -> Self {
        self.scripting_enabled = true;
        self
    }

    /// Print issues to stderr as they are found.
    #[must_use]
    pub const fn with_issue_reporting(mut self) -> Self {
        self.report_issues = true;
        self
    }

    /// Change the issue cap.
    #[must_use]
    pub const fn with_max_issues(mut self, max: Option<usize>) -> Self {
        self.max_issues = max;
        self
    }

    /// Parse a fragment in the context of an element with this name.
    #[must_use]
    pub fn with_fragment_context(mut self, context: impl Into<String>) -> Self {
        self.fragment_context = Some(context.into());
        self
    }

    /// Check the configuration before a parse starts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the issue cap is zero or the
    /// fragment context is not a plain ASCII tag name.
    pub fn validate(&self) -> Result<(), Error> {
        if self.max_issues == Some(0) {
            return Err(Error::InvalidConfig(
                "max_issues must be at least 1, or None for no limit".to_string(),
            ));
        }
        if let Some(context) = &self.fragment_context {
            let valid = context
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic())
                && context.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
            if !valid {
                return Err(Error::InvalidConfig(format!(
                    "fragment context {context:?} is not a tag name"
                )));
            }
        }
        Ok(())
    }
}
