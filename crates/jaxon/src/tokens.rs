//! Pull-style tokenizer.
//!
//! [`Tokens`] recognizes the same grammar as [`Recognizer`](crate::Recognizer)
//! but keeps its position in the grammar on an explicit stack, so tokens are
//! produced one at a time on demand. For any input and options the two yield
//! the same token sequence; on failure `Tokens` yields one `Err` after the
//! last good token and then ends.

use alloc::vec::Vec;
use core::iter::FusedIterator;

use crate::{
    ParserOptions, SyntaxError,
    scanner::Scanner,
    token::{Token, TokenKind},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Array,
    Object,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// The root value has not been read.
    Start,
    /// After `[`: a value or `]`.
    BeforeArrayValue,
    /// After an array element: `,` or `]`.
    AfterArrayValue,
    /// After `{`: a key or `}`.
    BeforePropertyName,
    /// After a key: `:` then a value.
    AfterPropertyName,
    /// After a member value: `,` or `}`.
    AfterPropertyValue,
    /// A root value has been read.
    End,
    /// Input exhausted or an error has been reported.
    Done,
}

/// Lazy, single-pass iterator over the tokens of one JSON input.
///
/// # Examples
///
/// ```
/// use jaxon::{SyntaxError, Token, TokenKind, tokenize};
///
/// let tokens: Vec<_> = tokenize(r#"{"a": }"#).collect();
/// assert_eq!(
///     tokens,
///     [
///         Ok(Token::new(TokenKind::ObjectBegin, "{")),
///         Ok(Token::new(TokenKind::ObjectKey, "a")),
///         Err(SyntaxError::Mismatch),
///     ]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Tokens<'src> {
    scanner: Scanner<'src>,
    options: ParserOptions,
    stack: Vec<Container>,
    state: ParseState,
}

/// Shorthand for [`Tokens::new`].
#[must_use]
pub fn tokenize(input: &str) -> Tokens<'_> {
    Tokens::new(input)
}

impl<'src> Tokens<'src> {
    /// Creates a tokenizer over `input` with default options.
    #[must_use]
    pub fn new(input: &'src str) -> Self {
        Self::with_options(input, ParserOptions::default())
    }

    /// Creates a tokenizer over `input`.
    #[must_use]
    pub fn with_options(input: &'src str, options: ParserOptions) -> Self {
        Self {
            scanner: Scanner::new(input, options.allow_unicode_whitespace),
            options,
            stack: Vec::new(),
            state: ParseState::Start,
        }
    }

    /// Current nesting depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn step(&mut self) -> Result<Option<Token<'src>>, SyntaxError> {
        match self.state {
            ParseState::Start => self.value().map(Some),
            ParseState::BeforeArrayValue => {
                self.scanner.skip_whitespace();
                if self.scanner.match_byte(b']') {
                    return Ok(Some(self.close(TokenKind::ArrayEnd, "]")));
                }
                self.value().map(Some)
            }
            ParseState::AfterArrayValue => {
                self.scanner.skip_whitespace();
                if self.scanner.match_byte(b',') {
                    self.scanner.skip_whitespace();
                    return self.value().map(Some);
                }
                if self.scanner.match_byte(b']') {
                    return Ok(Some(self.close(TokenKind::ArrayEnd, "]")));
                }
                Err(SyntaxError::Mismatch)
            }
            ParseState::BeforePropertyName => {
                self.scanner.skip_whitespace();
                if self.scanner.match_byte(b'}') {
                    return Ok(Some(self.close(TokenKind::ObjectEnd, "}")));
                }
                self.key().map(Some)
            }
            ParseState::AfterPropertyName => {
                self.scanner.skip_whitespace();
                if !self.scanner.match_byte(b':') {
                    return Err(SyntaxError::Mismatch);
                }
                self.scanner.skip_whitespace();
                self.value().map(Some)
            }
            ParseState::AfterPropertyValue => {
                self.scanner.skip_whitespace();
                if self.scanner.match_byte(b',') {
                    self.scanner.skip_whitespace();
                    return self.key().map(Some);
                }
                if self.scanner.match_byte(b'}') {
                    return Ok(Some(self.close(TokenKind::ObjectEnd, "}")));
                }
                Err(SyntaxError::Mismatch)
            }
            ParseState::End => self.after_root(),
            ParseState::Done => Ok(None),
        }
    }

    fn after_root(&mut self) -> Result<Option<Token<'src>>, SyntaxError> {
        if self.options.allow_multiple_json_values {
            self.scanner.skip_whitespace();
            if !self.scanner.is_at_end() {
                return self.value().map(Some);
            }
        }
        if self.options.reject_trailing_input {
            self.scanner.skip_whitespace();
            if !self.scanner.is_at_end() {
                return Err(SyntaxError::TrailingInput);
            }
        }
        self.state = ParseState::Done;
        Ok(None)
    }

    /// Reads one required value, or the opening token of one.
    fn value(&mut self) -> Result<Token<'src>, SyntaxError> {
        if self.scanner.match_literal("null") {
            return Ok(self.scalar(TokenKind::Null, "null"));
        }
        for literal in ["true", "false"] {
            if self.scanner.match_literal(literal) {
                return Ok(self.scalar(TokenKind::Boolean, literal));
            }
        }
        if let Some(text) = self.scanner.match_number() {
            return Ok(self.scalar(TokenKind::Number, text));
        }
        if let Some(content) = self.scanner.match_quoted() {
            return Ok(self.scalar(TokenKind::String, content));
        }
        match self.scanner.peek() {
            Some(b'[') => self.open(Container::Array),
            Some(b'{') => self.open(Container::Object),
            _ => Err(SyntaxError::Mismatch),
        }
    }

    fn key(&mut self) -> Result<Token<'src>, SyntaxError> {
        let key = self.scanner.match_quoted().ok_or(SyntaxError::Mismatch)?;
        self.state = ParseState::AfterPropertyName;
        Ok(Token::new(TokenKind::ObjectKey, key))
    }

    fn scalar(&mut self, kind: TokenKind, text: &'src str) -> Token<'src> {
        self.state = self.after_value();
        Token::new(kind, text)
    }

    fn open(&mut self, container: Container) -> Result<Token<'src>, SyntaxError> {
        if let Some(max) = self.options.max_depth {
            if self.stack.len() >= max {
                return Err(SyntaxError::DepthLimitExceeded(max));
            }
        }
        self.stack.push(container);
        Ok(match container {
            Container::Array => {
                self.scanner.match_byte(b'[');
                self.state = ParseState::BeforeArrayValue;
                Token::new(TokenKind::ArrayBegin, "[")
            }
            Container::Object => {
                self.scanner.match_byte(b'{');
                self.state = ParseState::BeforePropertyName;
                Token::new(TokenKind::ObjectBegin, "{")
            }
        })
    }

    fn close(&mut self, kind: TokenKind, text: &'static str) -> Token<'src> {
        let closed = self.stack.pop();
        debug_assert_eq!(
            closed,
            Some(match kind {
                TokenKind::ArrayEnd => Container::Array,
                _ => Container::Object,
            }),
            "Internal error: close does not match the open container"
        );
        self.state = self.after_value();
        Token::new(kind, text)
    }

    fn after_value(&self) -> ParseState {
        match self.stack.last() {
            Some(Container::Array) => ParseState::AfterArrayValue,
            Some(Container::Object) => ParseState::AfterPropertyValue,
            None => ParseState::End,
        }
    }
}

impl<'src> Iterator for Tokens<'src> {
    type Item = Result<Token<'src>, SyntaxError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.step() {
            Ok(token) => token.map(Ok),
            Err(e) => {
                self.state = ParseState::Done;
                Some(Err(e))
            }
        }
    }
}

impl FusedIterator for Tokens<'_> {}
