//! Scanner: the cursor and the matching primitives of the recognizer.
//!
//! Every primitive is anchored at the cursor. On success it advances past the
//! match and returns the matched text as a slice of the input; on failure the
//! cursor is left untouched. The cursor is a byte offset and only ever moves
//! forward.
//!
//! The number and string primitives reproduce what an anchored backtracking
//! regex would match, without a regex engine:
//!
//! - number: `[-+]?[0-9]*\.?[0-9]+([eE][-+]?[0-9]+)?`
//! - string: `"(?:[^"\\\n\r]|\\[^\n\r])*"`, returning the content only
//!
//! ```ignore
//! let mut s = Scanner::new("-1.5e3,", false);
//! assert_eq!(s.match_number(), Some("-1.5e3"));
//! assert!(s.match_byte(b','));
//! assert!(s.is_at_end());
//! ```

/// Cursor over borrowed input.
#[derive(Debug, Clone)]
pub(crate) struct Scanner<'src> {
    input: &'src str,
    pos: usize,
    unicode_whitespace: bool,
}

impl<'src> Scanner<'src> {
    pub(crate) fn new(input: &'src str, unicode_whitespace: bool) -> Self {
        Self {
            input,
            pos: 0,
            unicode_whitespace,
        }
    }

    #[inline]
    pub(crate) fn input(&self) -> &'src str {
        self.input
    }

    /// Byte offset of the next unconsumed character.
    #[inline]
    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(crate) fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    #[inline]
    fn rest(&self) -> &'src [u8] {
        &self.input.as_bytes()[self.pos..]
    }

    /// First unconsumed byte, if any.
    #[inline]
    pub(crate) fn peek(&self) -> Option<u8> {
        self.rest().first().copied()
    }

    /// Matches the literal `lit` at the cursor.
    pub(crate) fn match_literal(&mut self, lit: &str) -> bool {
        if self.rest().starts_with(lit.as_bytes()) {
            self.pos += lit.len();
            true
        } else {
            false
        }
    }

    /// Matches one ASCII delimiter byte at the cursor.
    #[inline]
    pub(crate) fn match_byte(&mut self, b: u8) -> bool {
        debug_assert!(b.is_ascii());
        if self.peek() == Some(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consumes a maximal run of whitespace. Never fails.
    pub(crate) fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C) {
                self.pos += 1;
            } else if self.unicode_whitespace && !b.is_ascii() {
                match self.input[self.pos..].chars().next() {
                    Some(ch) if ch.is_whitespace() => self.pos += ch.len_utf8(),
                    _ => break,
                }
            } else {
                break;
            }
        }
    }

    /// Matches the number pattern at the cursor and returns the lexeme.
    ///
    /// The integer and fraction runs behave like the regex: `1.` matches `1`,
    /// `.5` matches `.5`, and an exponent marker without digits (`1e`, `1e+`)
    /// is not part of the match.
    pub(crate) fn match_number(&mut self) -> Option<&'src str> {
        let bytes = self.rest();
        let mut len = 0;

        if matches!(bytes.first(), Some(b'-' | b'+')) {
            len += 1;
        }

        let int_digits = count_digits(&bytes[len..]);
        len += int_digits;

        // `\.?[0-9]+`: a fraction only counts when a digit follows the dot;
        // otherwise the last integer digit satisfies `[0-9]+` on its own.
        if bytes.get(len) == Some(&b'.') {
            let frac_digits = count_digits(&bytes[len + 1..]);
            if frac_digits > 0 {
                len += 1 + frac_digits;
            } else if int_digits == 0 {
                return None;
            }
        } else if int_digits == 0 {
            return None;
        }

        if matches!(bytes.get(len), Some(b'e' | b'E')) {
            let mut exp = len + 1;
            if matches!(bytes.get(exp), Some(b'-' | b'+')) {
                exp += 1;
            }
            let exp_digits = count_digits(&bytes[exp..]);
            if exp_digits > 0 {
                len = exp + exp_digits;
            }
        }

        Some(self.take(len))
    }

    /// Matches a double-quoted string at the cursor and returns its content
    /// without the quotes.
    ///
    /// The closing quote is the first one not preceded by a backslash escape.
    /// Escapes are not decoded. A raw line feed or carriage return before the
    /// closing quote is a mismatch, as is an unterminated string.
    pub(crate) fn match_quoted(&mut self) -> Option<&'src str> {
        let bytes = self.rest();
        if bytes.first() != Some(&b'"') {
            return None;
        }

        let mut i = 1;
        loop {
            match *bytes.get(i)? {
                b'"' => break,
                b'\n' | b'\r' => return None,
                b'\\' => match *bytes.get(i + 1)? {
                    b'\n' | b'\r' => return None,
                    _ => i += 2,
                },
                _ => i += 1,
            }
        }

        // Quotes and backslashes are ASCII, so `1..i` lies on char boundaries
        // even when the escaped character is multi-byte: `i` only ever stops
        // on a quote.
        let content = &self.input[self.pos + 1..self.pos + i];
        self.pos += i + 1;
        Some(content)
    }

    fn take(&mut self, len: usize) -> &'src str {
        let text = &self.input[self.pos..self.pos + len];
        self.pos += len;
        text
    }
}

#[inline]
fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
