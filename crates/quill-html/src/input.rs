//! The character source the tokenizer reads from.
//!
//! [§ 13.2.3.5 Preprocessing the input stream](https://html.spec.whatwg.org/multipage/parsing.html#preprocessing-the-input-stream)

/// A decoded, newline-normalized character stream with lookahead and
/// one-step push back.
#[derive(Debug, Clone)]
pub struct CharacterSource {
    chars: Vec<char>,
    pos: usize,
    last_was_eof: bool,
}

impl CharacterSource {
    /// [§ 13.2.3.5 Preprocessing the input stream](https://html.spec.whatwg.org/multipage/parsing.html#preprocessing-the-input-stream)
    ///
    /// "Before the tokenization stage, the input stream must be preprocessed
    /// by normalizing newlines." CRLF pairs and lone CRs both become LF.
    #[must_use]
    pub fn new(input: &str) -> Self {
        let mut chars = Vec::with_capacity(input.len());
        let mut iter = input.chars().peekable();
        while let Some(c) = iter.next() {
            if c == '\r' {
                if iter.peek() == Some(&'\n') {
                    let _ = iter.next();
                }
                chars.push('\n');
            } else {
                chars.push(c);
            }
        }
        Self {
            chars,
            pos: 0,
            last_was_eof: false,
        }
    }

    /// "Consume the next input character". `None` is EOF, and stays EOF.
    pub fn advance(&mut self) -> Option<char> {
        if let Some(&c) = self.chars.get(self.pos) {
            self.pos += 1;
            self.last_was_eof = false;
            Some(c)
        } else {
            self.last_was_eof = true;
            None
        }
    }

    /// Un-consume the character most recently returned by [`advance`](Self::advance).
    pub const fn push_back(&mut self) {
        if self.last_was_eof {
            self.last_was_eof = false;
        } else if self.pos > 0 {
            self.pos -= 1;
        }
    }

    /// Up to `n` upcoming characters, without consuming them.
    #[must_use]
    pub fn peek(&self, n: usize) -> &[char] {
        let end = self.pos.saturating_add(n).min(self.chars.len());
        &self.chars[self.pos..end]
    }

    /// The character `offset` places ahead, without consuming it.
    #[must_use]
    pub fn peek_char(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    /// "If the next few characters are ..."
    #[must_use]
    pub fn starts_with(&self, target: &str, case_insensitive: bool) -> bool {
        let mut upcoming = self.chars[self.pos..].iter();
        target.chars().all(|expected| {
            upcoming.next().is_some_and(|&c| {
                if case_insensitive {
                    c.eq_ignore_ascii_case(&expected)
                } else {
                    c == expected
                }
            })
        })
    }

    /// Consume `len` characters at once, after a successful lookahead.
    pub fn consume_str(&mut self, len: usize) {
        self.pos = self.pos.saturating_add(len).min(self.chars.len());
        self.last_was_eof = false;
    }

    /// Offset of the next character to be consumed.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// True once every character has been consumed.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newlines_are_normalized() {
        let mut source = CharacterSource::new("a\r\nb\rc\n");
        let collected: String = std::iter::from_fn(|| source.advance()).collect();
        assert_eq!(collected, "a\nb\nc\n");
    }

    #[test]
    fn test_eof_is_sticky_and_push_back_after_eof() {
        let mut source = CharacterSource::new("x");
        assert_eq!(source.advance(), Some('x'));
        assert_eq!(source.advance(), None);
        assert_eq!(source.advance(), None);
        source.push_back();
        assert_eq!(source.advance(), None);
        assert_eq!(source.position(), 1);
    }

    #[test]
    fn test_push_back_reconsumes() {
        let mut source = CharacterSource::new("ab");
        assert_eq!(source.advance(), Some('a'));
        source.push_back();
        assert_eq!(source.advance(), Some('a'));
        assert_eq!(source.advance(), Some('b'));
    }

    #[test]
    fn test_lookahead() {
        let mut source = CharacterSource::new("<!DocType html>");
        assert_eq!(source.advance(), Some('<'));
        assert_eq!(source.advance(), Some('!'));
        assert!(source.starts_with("DOCTYPE", true));
        assert!(!source.starts_with("DOCTYPE", false));
        assert!(!source.starts_with("DOCTYPE html>!", true));
        assert_eq!(source.peek(3), &['D', 'o', 'c']);
        assert_eq!(source.peek_char(7), Some(' '));

        source.consume_str(7);
        assert_eq!(source.position(), 9);
        assert_eq!(source.peek(100).len(), 6);
        source.consume_str(100);
        assert!(source.is_at_end());
    }
}
