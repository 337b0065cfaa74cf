use alloc::string::String;
use core::convert::Infallible;

use thiserror::Error;

/// Why the input was rejected by the grammar.
///
/// No position is carried: a failed recognizer leaves its cursor wherever the
/// last partial match put it, which says little about the actual defect.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxError {
    /// A literal, pattern or required delimiter did not match.
    #[error("input is not a valid JSON value")]
    Mismatch,
    /// Arrays and objects are nested deeper than the configured limit.
    #[error("nesting depth exceeds the limit of {0}")]
    DepthLimitExceeded(usize),
    /// Non-whitespace input follows the value and trailing input is rejected.
    #[error("unexpected input after the JSON value")]
    TrailingInput,
}

/// The error returned by `try_parse`.
///
/// `E` is the error type of the token sink or handler; it is [`Infallible`]
/// for plain closures and handlers that never abort.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError<E = Infallible> {
    /// The grammar rejected the input.
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    /// A number lexeme matched the number pattern but is not a valid `f64`.
    #[error("invalid number literal {0:?}")]
    InvalidNumber(String),
    /// A string or key contained an escape that could not be decoded.
    #[error("invalid escape sequence in {0:?}")]
    InvalidEscape(String),
    /// The sink or handler returned an error and the parse stopped.
    #[error("aborted by handler: {0}")]
    Sink(E),
}

impl<E> ParseError<E> {
    /// Returns the syntax error, if the grammar rejected the input.
    #[must_use]
    pub fn as_syntax(&self) -> Option<SyntaxError> {
        match self {
            Self::Syntax(e) => Some(*e),
            _ => None,
        }
    }
}

impl<E> ParseError<ParseError<E>> {
    /// Collapses an error raised inside a sink that itself reports
    /// `ParseError`s, as the event layer's dispatcher does.
    pub(crate) fn flatten(self) -> ParseError<E> {
        match self {
            Self::Syntax(e) => ParseError::Syntax(e),
            Self::InvalidNumber(n) => ParseError::InvalidNumber(n),
            Self::InvalidEscape(s) => ParseError::InvalidEscape(s),
            Self::Sink(inner) => inner,
        }
    }
}
