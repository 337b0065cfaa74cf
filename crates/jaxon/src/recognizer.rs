//! Recursive-descent recognizer.
//!
//! The recognizer walks a cursor over borrowed input and hands every token it
//! recognizes to a [`TokenSink`] as soon as the production matches. Nothing is
//! buffered. Alternatives are tried in a fixed order:
//!
//! ```text
//! value   := null | boolean | number | string | array | object
//! array   := "[" ws (value (ws "," ws value)*)? ws "]"
//! object  := "{" ws (key ws ":" ws value (ws "," ws key ws ":" ws value)*)? ws "}"
//! ```
//!
//! Every alternative is decided by its first token, so once a production has
//! consumed its opening token a later mismatch fails the whole parse rather
//! than falling through to the next alternative.
//!
//! Failure leaves the cursor wherever the last partial match put it, and the
//! sink has already seen every token matched before the failure. `parse`
//! consumes the recognizer so a failed instance cannot be retried.

use core::convert::Infallible;

use tracing::{debug, trace};

use crate::{
    ParseError, ParserOptions, SyntaxError,
    scanner::Scanner,
    token::{Token, TokenKind},
};

/// Receives the tokens emitted by a [`Recognizer`].
///
/// Closures taking a [`Token`] are sinks that never fail. Implement the trait
/// directly to stop the parse from inside the sink: the first error returned
/// unwinds the recognizer and is reported as [`ParseError::Sink`].
pub trait TokenSink<'src> {
    /// Error returned to abort the parse.
    type Error;

    /// Handles one token.
    ///
    /// # Errors
    ///
    /// Any error aborts the parse.
    fn accept(&mut self, token: Token<'src>) -> Result<(), Self::Error>;
}

impl<'src, F> TokenSink<'src> for F
where
    F: FnMut(Token<'src>),
{
    type Error = Infallible;

    #[inline]
    fn accept(&mut self, token: Token<'src>) -> Result<(), Infallible> {
        self(token);
        Ok(())
    }
}

/// `Ok(true)`: matched. `Ok(false)`: the first token did not match and the
/// cursor is untouched. `Err`: committed and failed, or stopped.
type Step<E> = Result<bool, ParseError<E>>;

/// Single-use recursive-descent JSON recognizer.
///
/// # Examples
///
/// ```
/// use jaxon::{Recognizer, TokenKind};
///
/// let mut kinds = Vec::new();
/// let ok = Recognizer::new("[ 0, 1, 2 ]", |t| kinds.push(t.kind())).parse();
/// assert!(ok);
/// assert_eq!(
///     kinds,
///     [
///         TokenKind::ArrayBegin,
///         TokenKind::Number,
///         TokenKind::Number,
///         TokenKind::Number,
///         TokenKind::ArrayEnd,
///     ]
/// );
/// ```
#[derive(Debug)]
pub struct Recognizer<'src, S> {
    scanner: Scanner<'src>,
    sink: S,
    options: ParserOptions,
    depth: usize,
}

impl<'src, F> Recognizer<'src, F>
where
    F: FnMut(Token<'src>),
{
    /// Binds a recognizer to `input` and a token callback.
    pub fn new(input: &'src str, callback: F) -> Self {
        Self::with_sink(input, callback)
    }
}

impl<'src, S> Recognizer<'src, S>
where
    S: TokenSink<'src>,
{
    /// Binds a recognizer to `input` and any [`TokenSink`].
    pub fn with_sink(input: &'src str, sink: S) -> Self {
        let options = ParserOptions::default();
        Self {
            scanner: Scanner::new(input, options.allow_unicode_whitespace),
            sink,
            options,
            depth: 0,
        }
    }

    /// Replaces the default options.
    #[must_use]
    pub fn with_options(mut self, options: ParserOptions) -> Self {
        self.scanner = Scanner::new(self.scanner.input(), options.allow_unicode_whitespace);
        self.options = options;
        self
    }

    pub(crate) fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Recognizes the input and reports whether it was valid.
    ///
    /// With default options, `true` means the input *starts* with a valid JSON
    /// value; anything after it is left unread. Leading whitespace is not
    /// skipped.
    #[must_use]
    pub fn parse(self) -> bool {
        self.try_parse().is_ok()
    }

    /// Recognizes the input and reports why it was rejected.
    ///
    /// # Errors
    ///
    /// - [`ParseError::Syntax`] when the grammar rejects the input, the depth
    ///   limit is exceeded, or trailing input is rejected.
    /// - [`ParseError::Sink`] when the sink aborts the parse.
    pub fn try_parse(mut self) -> Result<(), ParseError<S::Error>> {
        let result = self.document();
        match &result {
            Ok(()) => debug!(consumed = self.scanner.position(), "recognized JSON input"),
            Err(e) => debug!(
                consumed = self.scanner.position(),
                syntax = ?e.as_syntax(),
                "rejected JSON input"
            ),
        }
        result
    }

    fn document(&mut self) -> Result<(), ParseError<S::Error>> {
        if !self.value()? {
            return Err(SyntaxError::Mismatch.into());
        }

        if self.options.allow_multiple_json_values {
            loop {
                self.scanner.skip_whitespace();
                if self.scanner.is_at_end() {
                    break;
                }
                self.expect_value()?;
            }
        }

        if self.options.reject_trailing_input {
            self.scanner.skip_whitespace();
            if !self.scanner.is_at_end() {
                return Err(SyntaxError::TrailingInput.into());
            }
        }

        #[cfg(any(test, feature = "fuzzing"))]
        assert_eq!(self.depth, 0, "Internal error: unbalanced depth after a match");
        Ok(())
    }

    #[inline]
    fn emit(&mut self, kind: TokenKind, text: &'src str) -> Result<(), ParseError<S::Error>> {
        self.sink
            .accept(Token::new(kind, text))
            .map_err(ParseError::Sink)
    }

    fn value(&mut self) -> Step<S::Error> {
        Ok(self.null()?
            || self.boolean()?
            || self.number()?
            || self.string()?
            || self.array()?
            || self.object()?)
    }

    fn expect_value(&mut self) -> Result<(), ParseError<S::Error>> {
        if self.value()? {
            Ok(())
        } else {
            Err(SyntaxError::Mismatch.into())
        }
    }

    fn null(&mut self) -> Step<S::Error> {
        if self.scanner.match_literal("null") {
            self.emit(TokenKind::Null, "null")?;
            return Ok(true);
        }
        Ok(false)
    }

    fn boolean(&mut self) -> Step<S::Error> {
        for literal in ["true", "false"] {
            if self.scanner.match_literal(literal) {
                self.emit(TokenKind::Boolean, literal)?;
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn number(&mut self) -> Step<S::Error> {
        match self.scanner.match_number() {
            Some(text) => {
                self.emit(TokenKind::Number, text)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn string(&mut self) -> Step<S::Error> {
        match self.scanner.match_quoted() {
            Some(content) => {
                self.emit(TokenKind::String, content)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn array(&mut self) -> Step<S::Error> {
        if self.scanner.peek() != Some(b'[') {
            return Ok(false);
        }
        self.enter()?;
        self.scanner.match_byte(b'[');
        self.emit(TokenKind::ArrayBegin, "[")?;
        self.scanner.skip_whitespace();

        if !self.array_end()? {
            self.expect_value()?;
            self.scanner.skip_whitespace();
            while self.scanner.match_byte(b',') {
                self.scanner.skip_whitespace();
                self.expect_value()?;
                self.scanner.skip_whitespace();
            }
            if !self.array_end()? {
                return Err(SyntaxError::Mismatch.into());
            }
        }

        self.depth -= 1;
        Ok(true)
    }

    fn array_end(&mut self) -> Step<S::Error> {
        if self.scanner.match_byte(b']') {
            self.emit(TokenKind::ArrayEnd, "]")?;
            return Ok(true);
        }
        Ok(false)
    }

    fn object(&mut self) -> Step<S::Error> {
        if self.scanner.peek() != Some(b'{') {
            return Ok(false);
        }
        self.enter()?;
        self.scanner.match_byte(b'{');
        self.emit(TokenKind::ObjectBegin, "{")?;
        self.scanner.skip_whitespace();

        if !self.object_end()? {
            self.member()?;
            self.scanner.skip_whitespace();
            while self.scanner.match_byte(b',') {
                self.scanner.skip_whitespace();
                self.member()?;
                self.scanner.skip_whitespace();
            }
            if !self.object_end()? {
                return Err(SyntaxError::Mismatch.into());
            }
        }

        self.depth -= 1;
        Ok(true)
    }

    /// `key ws ":" ws value`
    fn member(&mut self) -> Result<(), ParseError<S::Error>> {
        let Some(key) = self.scanner.match_quoted() else {
            return Err(SyntaxError::Mismatch.into());
        };
        self.emit(TokenKind::ObjectKey, key)?;
        self.scanner.skip_whitespace();
        if !self.scanner.match_byte(b':') {
            return Err(SyntaxError::Mismatch.into());
        }
        self.scanner.skip_whitespace();
        self.expect_value()
    }

    fn object_end(&mut self) -> Step<S::Error> {
        if self.scanner.match_byte(b'}') {
            self.emit(TokenKind::ObjectEnd, "}")?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Checked before the opening bracket is consumed.
    fn enter(&mut self) -> Result<(), ParseError<S::Error>> {
        if let Some(max) = self.options.max_depth {
            if self.depth >= max {
                trace!(max, "nesting depth limit reached");
                return Err(SyntaxError::DepthLimitExceeded(max).into());
            }
        }
        self.depth += 1;
        Ok(())
    }
}
