//! Tokens emitted by the recognizer.
//!
//! A [`Token`] pairs a [`TokenKind`] with the text it was recognized from. The
//! text always borrows from the input: for strings and object keys it is the
//! content between the quotes, for everything else it is the full lexeme.
//!
//! ```
//! use jaxon::{Recognizer, Token, TokenKind};
//!
//! let mut tokens = Vec::new();
//! assert!(Recognizer::new(r#"{"a": [true]}"#, |t| tokens.push(t)).parse());
//! assert_eq!(
//!     tokens,
//!     vec![
//!         Token::new(TokenKind::ObjectBegin, "{"),
//!         Token::new(TokenKind::ObjectKey, "a"),
//!         Token::new(TokenKind::ArrayBegin, "["),
//!         Token::new(TokenKind::Boolean, "true"),
//!         Token::new(TokenKind::ArrayEnd, "]"),
//!         Token::new(TokenKind::ObjectEnd, "}"),
//!     ]
//! );
//! ```
use core::fmt;

/// The grammatical category of a [`Token`].
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// The literal `null`.
    Null,
    /// The literal `true` or `false`.
    Boolean,
    /// A number lexeme, e.g. `-12.5` or `1e10`.
    Number,
    /// A string value; the token text excludes the quotes.
    String,
    /// `[`
    ArrayBegin,
    /// `]`
    ArrayEnd,
    /// `{`
    ObjectBegin,
    /// `}`
    ObjectEnd,
    /// A string in key position; the token text excludes the quotes.
    ObjectKey,
}

impl TokenKind {
    /// Returns `true` for the four kinds that carry a scalar value.
    #[must_use]
    pub fn is_scalar(self) -> bool {
        matches!(self, Self::Null | Self::Boolean | Self::Number | Self::String)
    }

    /// Returns `true` for `[` and `{`.
    #[must_use]
    pub fn is_begin(self) -> bool {
        matches!(self, Self::ArrayBegin | Self::ObjectBegin)
    }

    /// Returns `true` for `]` and `}`.
    #[must_use]
    pub fn is_end(self) -> bool {
        matches!(self, Self::ArrayEnd | Self::ObjectEnd)
    }
}

/// One recognized lexical unit.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token<'src> {
    kind: TokenKind,
    text: &'src str,
}

impl<'src> Token<'src> {
    /// Creates a token. The recognizer is the usual source of tokens; this is
    /// public so callers can build expected sequences.
    #[must_use]
    pub const fn new(kind: TokenKind, text: &'src str) -> Self {
        Self { kind, text }
    }

    /// The token's category.
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The matched source text. Strings and keys exclude their quotes.
    #[must_use]
    pub const fn text(&self) -> &'src str {
        self.text
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::String | TokenKind::ObjectKey => write!(f, "{:?}(\"{}\")", self.kind, self.text),
            _ => write!(f, "{:?}({})", self.kind, self.text),
        }
    }
}
