//! Parser warnings with colored terminal output.
//!
//! Deduplicates messages so a document with a thousand stray `</p>` tags
//! reports the problem once. Each parse owns its own [`WarningSet`], so
//! concurrent parses never share state.

use std::collections::HashSet;

use owo_colors::OwoColorize;

/// The warnings one component has already printed.
#[derive(Debug, Clone)]
pub struct WarningSet {
    component: &'static str,
    seen: HashSet<String>,
}

impl WarningSet {
    /// An empty set for `component`, e.g. `"HTML Parser"`.
    #[must_use]
    pub fn new(component: &'static str) -> Self {
        Self {
            component,
            seen: HashSet::new(),
        }
    }

    /// Print `message` to stderr unless this set already printed it.
    ///
    /// Returns `true` if the message was new and got printed.
    ///
    /// # Example
    /// ```
    /// use quill_common::warning::WarningSet;
    ///
    /// let mut warnings = WarningSet::new("HTML Tokenizer");
    /// assert!(warnings.warn_once("eof-in-comment"));
    /// assert!(!warnings.warn_once("eof-in-comment"));
    /// assert_eq!(warnings.len(), 1);
    /// ```
    pub fn warn_once(&mut self, message: &str) -> bool {
        if self.seen.contains(message) {
            return false;
        }
        let _ = self.seen.insert(message.to_string());
        eprintln!(
            "{}",
            format!("[Quill {}] ⚠ {message}", self.component).yellow()
        );
        true
    }

    /// Forget every recorded warning.
    pub fn clear(&mut self) {
        self.seen.clear();
    }

    /// Number of distinct warnings printed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Whether nothing has been printed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
